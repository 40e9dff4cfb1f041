// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-command arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args};

use crate::config::types::BuildCommand;
use crate::host::{DEFAULT_HTML_ENTRY, DEFAULT_MODULE_GLOB};

/// Plugin option flags shared by commands that resolve the plugin.
///
/// Each flag becomes a `host.runtime_env.*` override.
#[derive(Debug, Clone, Default, Args)]
pub struct PluginArgs {
    /// Member name on the runtime global (window.<NAME>).
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Also emit <NAME>.template.js with $KEY placeholders.
    #[arg(long = "envsubst-template", action = ArgAction::SetTrue)]
    pub envsubst_template: bool,

    /// Do not inject the bootstrap script into the HTML entry.
    #[arg(long = "no-inject-html", action = ArgAction::SetTrue)]
    pub no_inject_html: bool,
}

impl PluginArgs {
    /// Overrides for the build-tool-level options block.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();
        if let Some(ref name) = self.name {
            overrides.push(format!("host.runtime_env.name={name}"));
        }
        if self.envsubst_template {
            overrides.push("host.runtime_env.envsubst_template=true".to_string());
        }
        if self.no_inject_html {
            overrides.push("host.runtime_env.inject_html=false".to_string());
        }
        overrides
    }
}

/// Arguments for the `build` command.
#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Plugin options.
    #[command(flatten)]
    pub plugin: PluginArgs,

    /// Built output directory, rewritten in place.
    #[arg(short = 'o', long = "out-dir", value_name = "DIR", default_value = "dist")]
    pub out_dir: PathBuf,

    /// Glob (relative to the output dir) of modules to rewrite. Can repeat.
    #[arg(long = "include", value_name = "GLOB", action = ArgAction::Append, default_value = DEFAULT_MODULE_GLOB)]
    pub include: Vec<String>,

    /// HTML entry point, relative to the output dir.
    #[arg(long = "html-entry", value_name = "FILE", default_value = DEFAULT_HTML_ENTRY)]
    pub html_entry: String,

    /// Report what would change without writing anything.
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,
}

/// Arguments for the `dev` command.
#[derive(Debug, Clone, Default, Args)]
pub struct DevArgs {
    /// Plugin options.
    #[command(flatten)]
    pub plugin: PluginArgs,

    /// Write <NAME>.d.ts (same as generate_types = true).
    #[arg(short = 't', long = "types", action = ArgAction::SetTrue)]
    pub types: bool,

    /// Directory for the declaration file.
    #[arg(long = "types-dir", value_name = "DIR")]
    pub types_dir: Option<PathBuf>,
}

impl DevArgs {
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.plugin.to_config_overrides();
        if self.types {
            overrides.push("host.runtime_env.generate_types=true".to_string());
        }
        if let Some(ref dir) = self.types_dir {
            overrides.push(format!(
                "host.runtime_env.generated_types_path={}",
                dir.display()
            ));
        }
        overrides
    }
}

/// Arguments for the `transform` command.
#[derive(Debug, Clone, Args)]
pub struct TransformArgs {
    /// Member name on the runtime global (window.<NAME>).
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Rewrite the file in place instead of printing it.
    #[arg(short = 'i', long = "in-place", action = ArgAction::SetTrue)]
    pub in_place: bool,

    /// Module to rewrite.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the `env` command.
#[derive(Debug, Clone, Default, Args)]
pub struct EnvArgs {
    /// Host command whose default mode applies when --mode is not given.
    #[arg(long = "command", value_name = "COMMAND", default_value_t = BuildCommand::Build)]
    pub command: BuildCommand,

    /// Print raw string values instead of coerced ones.
    #[arg(long = "raw", action = ArgAction::SetTrue)]
    pub raw: bool,
}

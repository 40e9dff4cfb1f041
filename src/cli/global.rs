// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --root DIR        ← host.root
//! --env-dir DIR     ← host.env_dir
//! --mode MODE       ← host.mode
//! --set KEY=VAL     ← Direct config override
//! --log-level N     ← Console verbosity (0-5)
//! --log-file FILE   ← Also log to FILE
//! --log-format FMT  ← pretty | json
//!
//! Precedence: CLI flags > --set > env vars > --config > runtime-env.toml > defaults
//! ```

use std::path::PathBuf;

use clap::Args;

use crate::logging::LogFormat;

/// Default config file looked up in the root.
pub const DEFAULT_CONFIG_FILE: &str = "runtime-env.toml";

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Additional TOML configuration file(s), loaded after runtime-env.toml.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append, global = true)]
    pub configs: Vec<PathBuf>,

    /// Project root (where runtime-env.toml and .env files live).
    #[arg(short = 'r', long = "root", value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Directory holding the .env files, relative to the root.
    #[arg(long = "env-dir", value_name = "DIR", global = true)]
    pub env_dir: Option<PathBuf>,

    /// Mode selecting .env.<MODE>.
    #[arg(short = 'm', long = "mode", value_name = "MODE", global = true)]
    pub mode: Option<String>,

    /// Sets an option, such as 'host.runtime_env.name=runtimeEnv'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append, global = true)]
    pub options: Vec<String>,

    /// Disables loading runtime-env.toml from the root, only uses --config.
    #[arg(long = "no-default-config", global = true)]
    pub no_default_config: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5), global = true)]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Console log format.
    #[arg(long = "log-format", value_name = "FORMAT", global = true)]
    pub log_format: Option<LogFormat>,
}

impl GlobalOptions {
    /// Root directory, defaulting to the current directory.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Converts command-line options to configuration overrides.
    ///
    /// `--set` entries come first so dedicated flags win over them.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(ref root) = self.root {
            overrides.push(format!("host.root={}", root.display()));
        }

        if let Some(ref env_dir) = self.env_dir {
            overrides.push(format!("host.env_dir={}", env_dir.display()));
        }

        if let Some(ref mode) = self.mode {
            overrides.push(format!("host.mode={mode}"));
        }

        overrides
    }
}

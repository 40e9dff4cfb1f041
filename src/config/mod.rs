// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Option Precedence
//!
//! ```text
//! Priority (low → high)
//! 1. PluginOptions defaults
//! 2. [plugin]             user-supplied options
//! 3. [host.runtime_env]   build-tool-level block (wins)
//! ```
//!
//! # Source Precedence (CLI)
//!
//! ```text
//! 1. defaults
//! 2. runtime-env.toml (root)
//! 3. --config FILE...
//! 4. RUNTIME_ENV__* env vars
//! 5. --set KEY=VALUE, --mode, --root, ...
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! RUNTIME_ENV__HOST__MODE=staging          → host.mode = "staging"
//! RUNTIME_ENV__HOST__ENV_PREFIX=VITE_,APP_ → host.env_prefix = ["VITE_", "APP_"]
//! RUNTIME_ENV__PLUGIN__NAME=runtime        → plugin.name = "runtime"
//! ```

pub mod loader;
pub mod merge;
pub mod types;


use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::Result;

use loader::ConfigLoader;
use merge::{PluginOptionsOverride, merge_options};
use types::{HostConfig, OptionSource, PluginOptions};

/// Everything a config file can hold.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// User-supplied plugin options.
    pub plugin: PluginOptionsOverride,
    /// Host build configuration.
    pub host: HostConfig,
}

impl Settings {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use runtime_env::config::Settings;
    ///
    /// let settings = Settings::builder()
    ///     .add_toml_file_optional("runtime-env.toml")
    ///     .with_env_prefix("RUNTIME_ENV")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Settings` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Plugin options from the `[plugin]` table over the defaults.
    #[must_use]
    pub fn plugin_options(&self) -> PluginOptions {
        merge_options(&PluginOptions::default(), &self.plugin)
    }
}

/// Plugin options after merging the build-tool-level block.
///
/// Function-valued options are resolved once, on first read.
#[derive(Debug)]
pub struct ResolvedOptions {
    options: PluginOptions,
    name: OnceLock<String>,
    generated_types_path: OnceLock<PathBuf>,
}

impl ResolvedOptions {
    /// Merges `host_block` over `options`; the host block wins field by field.
    #[must_use]
    pub fn resolve(options: &PluginOptions, host_block: &PluginOptionsOverride) -> Self {
        Self {
            options: merge_options(options, host_block),
            name: OnceLock::new(),
            generated_types_path: OnceLock::new(),
        }
    }

    /// Member name on the runtime global.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.get_or_init(|| self.options.name.resolve())
    }

    /// Directory the declaration file is written to.
    #[must_use]
    pub fn generated_types_path(&self) -> &Path {
        self.generated_types_path.get_or_init(|| {
            self.options
                .generated_types_path
                .as_ref()
                .map_or_else(current_dir, OptionSource::resolve)
        })
    }

    #[must_use]
    pub const fn generate_types(&self) -> bool {
        self.options.generate_types
    }

    #[must_use]
    pub const fn inject_html(&self) -> bool {
        self.options.inject_html
    }

    #[must_use]
    pub const fn envsubst_template(&self) -> bool {
        self.options.envsubst_template
    }

    #[must_use]
    pub fn types_formatter(&self) -> Option<&[String]> {
        self.options.types_formatter.as_deref()
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Format resolved options for display, one `key = value` line each.
///
/// Output is deterministically ordered using `BTreeMap`.
#[must_use]
pub fn format_options(resolved: &ResolvedOptions, host: &HostConfig) -> Vec<String> {
    let mut options = BTreeMap::new();

    options.insert("plugin.name", resolved.name().to_string());
    options.insert(
        "plugin.generate_types",
        resolved.generate_types().to_string(),
    );
    options.insert(
        "plugin.generated_types_path",
        resolved.generated_types_path().display().to_string(),
    );
    options.insert("plugin.inject_html", resolved.inject_html().to_string());
    options.insert(
        "plugin.envsubst_template",
        resolved.envsubst_template().to_string(),
    );
    if let Some(formatter) = resolved.types_formatter() {
        options.insert("plugin.types_formatter", formatter.join(" "));
    }

    options.insert("host.root", host.root.display().to_string());
    options.insert("host.env_dir", host.env_dir().display().to_string());
    options.insert("host.mode", host.mode().to_string());
    options.insert("host.command", host.command.to_string());
    options.insert("host.env_prefix", host.env_prefix.join(","));
    options.insert("host.marker", host.marker.clone());
    options.insert("host.global_object", host.global_object.clone());

    let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

    options
        .into_iter()
        .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
        .collect()
}

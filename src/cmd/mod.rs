// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command handlers.
//!
//! ```text
//! GlobalOptions + command overrides
//!        |
//!        v  build_config_loader()
//!   ConfigLoader --build()--> Settings
//!        |
//!        v  resolve_plugin()
//!   ResolvedPlugin --> build | dev | transform | env | options
//! ```

pub mod build;
pub mod config;
pub mod dev;
pub mod env;
pub mod transform;


use crate::cli::global::{DEFAULT_CONFIG_FILE, GlobalOptions};
use crate::config::Settings;
use crate::config::loader::ConfigLoader;
use crate::config::types::BuildCommand;
use crate::error::Result;
use crate::plugin::{Plugin, ResolvedPlugin};

/// Prefix for `RUNTIME_ENV__SECTION__KEY` environment overrides.
pub const ENV_PREFIX: &str = "RUNTIME_ENV";

/// Config loader for the global options, without CLI overrides applied.
#[must_use]
pub fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(global.root().join(DEFAULT_CONFIG_FILE));
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

/// Loads settings for `command`, applying global and command overrides.
///
/// # Errors
///
/// Returns an error if a config file is missing or invalid, or an override
/// is malformed.
pub fn load_settings(
    global: &GlobalOptions,
    command: BuildCommand,
    command_overrides: &[String],
) -> Result<Settings> {
    build_config_loader(global)
        .apply_overrides(&global.to_config_overrides())?
        .apply_overrides(command_overrides)?
        .set("host.command", command.to_string())?
        .build()
}

/// Resolves the plugin for loaded settings.
///
/// # Errors
///
/// Returns an error if the env files cannot be loaded.
pub fn resolve_plugin(settings: &Settings) -> Result<ResolvedPlugin> {
    Plugin::new(settings.plugin_options()).resolve(&settings.host)
}

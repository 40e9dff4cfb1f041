// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands.

use crate::cli::global::GlobalOptions;
use crate::config::types::BuildCommand;
use crate::config::{ResolvedOptions, format_options};
use crate::error::Result;

use super::{build_config_loader, load_settings};

/// Display resolved options.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded.
pub fn run_options_command(global: &GlobalOptions) -> Result<()> {
    let settings = load_settings(global, BuildCommand::Build, &[])?;
    let resolved = ResolvedOptions::resolve(&settings.plugin_options(), &settings.host.runtime_env);
    for line in format_options(&resolved, &settings.host) {
        println!("{line}");
    }
    Ok(())
}

/// Display loaded configuration files.
pub fn run_config_files_command(global: &GlobalOptions) {
    let files = build_config_loader(global).format_loaded_files();
    if files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in files {
            println!("{line}");
        }
    }
}

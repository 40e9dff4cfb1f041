// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Env command: print the filtered environment map.

use crate::cli::args::EnvArgs;
use crate::cli::global::GlobalOptions;
use crate::error::Result;

use super::{load_settings, resolve_plugin};

/// Run the env command.
///
/// # Errors
///
/// Returns an error if settings or env files cannot be loaded.
pub fn run_env_command(args: &EnvArgs, global: &GlobalOptions) -> Result<()> {
    let settings = load_settings(global, args.command, &[])?;
    let plugin = resolve_plugin(&settings)?;

    let json = if args.raw {
        serde_json::to_string_pretty(plugin.env())?
    } else {
        serde_json::to_string_pretty(&plugin.env().to_coerced_json())?
    };
    println!("{json}");
    Ok(())
}

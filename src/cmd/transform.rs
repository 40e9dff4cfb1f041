// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transform command: rewrite a single module.

use anyhow::Context;

use crate::cli::args::TransformArgs;
use crate::cli::global::GlobalOptions;
use crate::config::ResolvedOptions;
use crate::config::types::BuildCommand;
use crate::env::EnvMap;
use crate::error::Result;
use crate::plugin::ResolvedPlugin;
use crate::utility::fs::write_atomic;

use super::load_settings;

/// Run the transform command.
///
/// Env files are not read: rewriting only depends on the name, marker and
/// reserved prefixes.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded or the file cannot be read
/// or written.
pub fn run_transform_command(args: &TransformArgs, global: &GlobalOptions) -> Result<()> {
    let overrides: Vec<String> = args
        .name
        .iter()
        .map(|name| format!("host.runtime_env.name={name}"))
        .collect();
    let settings = load_settings(global, BuildCommand::Build, &overrides)?;
    let options = ResolvedOptions::resolve(&settings.plugin_options(), &settings.host.runtime_env);
    let plugin = ResolvedPlugin::new(options, settings.host, EnvMap::new());

    let code = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let id = args.file.display().to_string();

    match plugin.transform(&code, &id) {
        Some(rewritten) if args.in_place => write_atomic(&args.file, &rewritten)?,
        Some(rewritten) => print!("{rewritten}"),
        None if args.in_place => {}
        None => print!("{code}"),
    }
    Ok(())
}

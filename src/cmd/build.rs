// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build command: production pass over an output directory.

use crate::cli::args::BuildArgs;
use crate::cli::global::GlobalOptions;
use crate::config::types::BuildCommand;
use crate::error::Result;
use crate::host::{DistOptions, DistReport, run_build};

use super::{load_settings, resolve_plugin};

/// Run the build command.
///
/// # Errors
///
/// Returns an error if settings or env files cannot be loaded, or the output
/// directory cannot be processed.
pub fn run_build_command(args: &BuildArgs, global: &GlobalOptions) -> Result<()> {
    let settings = load_settings(global, BuildCommand::Build, &args.plugin.to_config_overrides())?;
    let plugin = resolve_plugin(&settings)?;

    let out_dir = settings.host.root.join(&args.out_dir);
    let options = DistOptions::builder()
        .with_out_dir(out_dir)
        .with_include(args.include.clone())
        .with_html_entry(args.html_entry.clone())
        .with_dry_run(args.dry_run)
        .build();

    let report = run_build(&plugin, &options)?;
    print_report(&report, args.dry_run);
    Ok(())
}

fn print_report(report: &DistReport, dry_run: bool) {
    let verb = if dry_run { "would rewrite" } else { "rewrote" };
    println!(
        "{verb} {} of {} modules",
        report.modules_rewritten.len(),
        report.modules_scanned
    );
    for module in &report.modules_rewritten {
        println!("  {}", module.display());
    }
    if report.html_injected {
        println!("injected bootstrap script into HTML entry");
    }
    for asset in &report.assets {
        println!("emitted {asset}");
    }
}

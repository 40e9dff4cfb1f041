// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dev command: the serve-mode hooks without a dev server.
//!
//! Writes `<name>.d.ts` when type generation is enabled and prints the
//! inline bootstrap script a dev server would inject.

use tracing::warn;

use crate::cli::args::DevArgs;
use crate::cli::global::GlobalOptions;
use crate::config::types::BuildCommand;
use crate::error::Result;

use super::{load_settings, resolve_plugin};

/// Run the dev command.
///
/// # Errors
///
/// Returns an error if settings or env files cannot be loaded. Declaration
/// write failures are logged, not returned.
pub async fn run_dev_command(args: &DevArgs, global: &GlobalOptions) -> Result<()> {
    let settings = load_settings(global, BuildCommand::Serve, &args.to_config_overrides())?;
    let plugin = resolve_plugin(&settings)?;

    let types_task = plugin.configure_server();

    if let Some(tag) = plugin.transform_index_html() {
        println!("{}", tag.render());
    }

    // The process exits right after this; wait so the file is not lost.
    if let Some(task) = types_task
        && let Err(e) = task.join().await
    {
        warn!(error = %format!("{e:#}"), "type declaration task did not complete");
    }
    Ok(())
}

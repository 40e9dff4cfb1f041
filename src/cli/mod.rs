// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! runtime-env [global options] <command>
//! build [--out-dir DIR] [--include GLOB]... [--dry-run]
//! dev [--types] [--types-dir DIR]
//! transform FILE [--in-place]
//! env [--command serve|build] [--raw]
//! options
//! config-files
//! version
//! ```

pub mod args;
pub mod global;


use clap::{Parser, Subcommand};

use crate::cli::args::{BuildArgs, DevArgs, EnvArgs, TransformArgs};
use crate::cli::global::GlobalOptions;

/// Inject .env values into a built web bundle at runtime.
#[derive(Debug, Parser)]
#[command(
    name = "runtime-env",
    author,
    version,
    about = "Runtime environment injection for web bundles",
    long_about = "runtime-env Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Rewrites `import.meta.env.KEY` references in a built bundle to\n\
                  `window.env.KEY`, emits `env.js` with the values from the .env\n\
                  files and injects a bootstrap script into index.html, so one\n\
                  build can be configured per deployment.",
    after_help = "CONFIG FILES:\n\n\
                  runtime-env looks for `runtime-env.toml` in the root (--root,\n\
                  default: current directory). Additional files can be given with\n\
                  --config and are loaded after it; later files override earlier\n\
                  ones. RUNTIME_ENV__SECTION__KEY environment variables and --set\n\
                  override all files. Use --no-default-config to only use --config."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Rewrites modules in a built output dir, injects HTML, emits assets.
    Build(BuildArgs),

    /// Serve-mode pass: writes type declarations, prints the inline script.
    Dev(DevArgs),

    /// Rewrites env references in a single module.
    Transform(TransformArgs),

    /// Prints the filtered environment map as JSON.
    Env(EnvArgs),

    /// Lists all resolved options and their values.
    Options,

    /// Lists the config files used.
    #[command(name = "config-files")]
    ConfigFiles,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

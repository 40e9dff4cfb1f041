// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Build | Dev | Transform | Env | Options | ConfigFiles | Version
//! ```

use std::process::ExitCode;

use runtime_env::cli::global::GlobalOptions;
use runtime_env::cli::{self, Command};
use runtime_env::cmd::build::run_build_command;
use runtime_env::cmd::config::{run_config_files_command, run_options_command};
use runtime_env::cmd::dev::run_dev_command;
use runtime_env::cmd::env::run_env_command;
use runtime_env::cmd::transform::run_transform_command;
use runtime_env::logging::{LogConfig, LogLevel, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(console_level.max(LogLevel::DEBUG))
        .maybe_with_log_file(global.log_file.clone())
        .with_format(global.log_format.unwrap_or_default())
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let global = &cli.global;
    let result = match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Build(args)) => run_build_command(args, global),
        Some(Command::Dev(args)) => run_dev_command(args, global).await,
        Some(Command::Transform(args)) => run_transform_command(args, global),
        Some(Command::Env(args)) => run_env_command(args, global),
        Some(Command::Options) => run_options_command(global),
        Some(Command::ConfigFiles) => {
            run_config_files_command(global);
            Ok(())
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! TypeScript declarations for the runtime global.
//!
//! ```text
//! EnvMap --infer--> declaration text --formatter--> <dir>/<name>.d.ts
//!
//! name = "env"                      name = "runtime"
//! interface ImportMetaEnv {         interface ImportMetaRuntime {
//!   readonly PORT: number;            readonly PORT: number;
//! }                                 }
//! interface ImportMeta {            interface ImportMeta {
//!   readonly env: ImportMetaEnv;      readonly runtime: ImportMetaRuntime;
//! }                                 }
//! ```
//!
//! Writing runs detached, on the caller's tokio runtime or on its own
//! thread when there is none; failures are logged, never returned to the
//! build.


use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::types::DEFAULT_NAME;
use crate::env::EnvMap;
use crate::error::{FormatError, Result};
use crate::rewrite::is_identifier;

/// File name of the declaration file.
#[must_use]
pub fn declaration_file_name(name: &str) -> String {
    format!("{name}.d.ts")
}

/// Interface name for the runtime global's shape.
#[must_use]
pub fn interface_name(name: &str) -> String {
    if name == DEFAULT_NAME {
        return "ImportMetaEnv".to_string();
    }
    let pascal: String = name
        .split(|c: char| c == '_' || c == '-' || c == '$')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect();
    format!("ImportMeta{pascal}")
}

/// Renders the declaration block for `env`.
#[must_use]
pub fn render_declarations(name: &str, env: &EnvMap) -> String {
    let interface = interface_name(name);

    let mut out = format!("interface {interface} {{\n");
    for (key, kind) in env.kinds() {
        let key = if is_identifier(key) {
            key.to_string()
        } else {
            serde_json::Value::String(key.to_string()).to_string()
        };
        let _ = writeln!(out, "  readonly {key}: {kind};");
    }
    out.push_str("}\n\n");
    let _ = write!(
        out,
        "interface ImportMeta {{\n  readonly {name}: {interface};\n}}\n"
    );
    out
}

/// External formatter the declaration text is piped through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeclarationFormatter {
    /// Write the text as generated.
    #[default]
    None,
    /// Run `program args...` with the text on stdin, read stdout.
    Command { program: String, args: Vec<String> },
}

impl DeclarationFormatter {
    /// Builds a formatter from a command line, program first.
    #[must_use]
    pub fn from_command_line(command_line: Option<&[String]>) -> Self {
        match command_line {
            Some([program, args @ ..]) => Self::Command {
                program: program.clone(),
                args: args.to_vec(),
            },
            _ => Self::None,
        }
    }

    /// Formats `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the program cannot be found or spawned,
    /// exits non-zero, or prints non UTF-8 output.
    pub async fn format(&self, source: String) -> Result<String> {
        let Self::Command { program, args } = self else {
            return Ok(source);
        };

        let resolved = which::which(program).map_err(|_| FormatError::NotFound {
            name: program.clone(),
        })?;
        let command_line = std::iter::once(program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        debug!(command = %command_line, "running declaration formatter");

        let mut child = Command::new(resolved)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| FormatError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .await
                .with_context(|| format!("failed to write to formatter '{command_line}'"))?;
        }

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("failed to wait for formatter '{command_line}'"))?;

        if !output.status.success() {
            return Err(FormatError::Failed {
                command: command_line,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        String::from_utf8(output.stdout)
            .map_err(|_| FormatError::Output { command: command_line }.into())
    }
}

/// Formats and writes the declaration file, returning its path.
///
/// # Errors
///
/// Returns an error if formatting fails or the file cannot be written.
pub async fn write_declarations(
    dir: &Path,
    name: &str,
    env: &EnvMap,
    formatter: &DeclarationFormatter,
) -> Result<PathBuf> {
    let source = formatter.format(render_declarations(name, env)).await?;
    let path = dir.join(declaration_file_name(name));
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;
    tokio::fs::write(&path, source)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// A detached [`write_declarations`] run.
#[derive(Debug)]
pub enum DeclarationTask {
    /// Spawned on the caller's tokio runtime.
    Runtime(JoinHandle<()>),
    /// Running on its own thread because no runtime was entered.
    Thread(std::thread::JoinHandle<()>),
}

impl DeclarationTask {
    /// Waits for the write to finish.
    ///
    /// The write itself never fails here; its errors were already logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the task panicked or was cancelled.
    pub async fn join(self) -> Result<()> {
        match self {
            Self::Runtime(handle) => handle.await.context("declaration task did not complete"),
            Self::Thread(handle) => tokio::task::spawn_blocking(move || handle.join())
                .await
                .context("declaration task did not complete")?
                .map_err(|_| anyhow::anyhow!("declaration thread panicked")),
        }
    }
}

/// Starts [`write_declarations`] without waiting on it.
///
/// Inside a tokio runtime the write is spawned there. Otherwise it runs on a
/// dedicated thread with its own current-thread runtime. Failures are logged
/// at `warn`; callers that need the file before exiting can join the task.
///
/// Returns `None` only if no thread could be started, which is logged too.
#[must_use = "join the task if the process may exit before the write finishes"]
pub fn spawn_write_declarations(
    dir: PathBuf,
    name: String,
    env: EnvMap,
    formatter: DeclarationFormatter,
) -> Option<DeclarationTask> {
    let write = async move {
        match write_declarations(&dir, &name, &env, &formatter).await {
            Ok(path) => info!(path = %path.display(), "wrote type declarations"),
            Err(e) => warn!(error = %format!("{e:#}"), "failed to write type declarations"),
        }
    };

    if let Ok(runtime) = tokio::runtime::Handle::try_current() {
        return Some(DeclarationTask::Runtime(runtime.spawn(write)));
    }

    debug!("no tokio runtime, writing declarations on a thread");
    let spawned = std::thread::Builder::new()
        .name("runtime-env-dts".to_string())
        .spawn(move || {
            match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(write),
                Err(e) => warn!(error = %e, "failed to start runtime for type declarations"),
            }
        });
    match spawned {
        Ok(handle) => Some(DeclarationTask::Thread(handle)),
        Err(e) => {
            warn!(error = %e, "failed to spawn type declaration thread");
            None
        }
    }
}

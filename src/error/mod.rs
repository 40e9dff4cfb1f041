// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          RuntimeEnvError (~24 bytes)
//!                     |
//!   +--------+--------+--------+-------+
//!   |        |        |        |       |
//!   v        v        v        v       v
//! Config  EnvFile   Format    Fs      Io
//!  Box      Box      Box      Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Config   InvalidValue, InvalidOverride
//!   EnvFile  Read, Parse
//!   Format   NotFound, Spawn, Failed, Output
//!   Fs       NotFound, IoError
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`RuntimeEnvError`].
pub type RuntimeEnvResult<T> = std::result::Result<T, RuntimeEnvError>;

/// Top-level error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum RuntimeEnvError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Environment file could not be read or parsed.
    #[error("env file error: {0}")]
    EnvFile(#[from] Box<EnvFileError>),

    /// Declaration formatter failed.
    #[error("format error: {0}")]
    Format(#[from] Box<FormatError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for RuntimeEnvError {
                fn from(err: $error) -> Self {
                    RuntimeEnvError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    EnvFileError => EnvFile,
    FormatError => Format,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Malformed `KEY=VALUE` override.
    #[error("invalid override '{0}', expected KEY=VALUE")]
    InvalidOverride(String),
}

// --- Env File Errors ---

/// Errors reading `.env` files.
///
/// Missing files are not errors; these only cover files that exist.
#[derive(Debug, Error)]
pub enum EnvFileError {
    /// File exists but could not be opened or read.
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed.
    #[error("failed to parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

// --- Format Errors ---

/// Errors from the external declaration formatter.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Formatter executable not found in PATH.
    #[error("formatter not found: '{name}' (not in PATH)")]
    NotFound { name: String },

    /// Failed to spawn the formatter.
    #[error("failed to spawn formatter '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Formatter exited with non-zero status.
    #[error("formatter '{command}' exited with code {code}: {stderr}")]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Formatter produced output that is not UTF-8.
    #[error("formatter '{command}' produced non UTF-8 output")]
    Output { command: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// General I/O error.
    #[error("I/O error on '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities.
//!
//! ```text
//! walk:  collect_files()   ignore::WalkParallel + flume, sorted
//!        WalkOptions       max_depth, hidden, gitignore, skip_dirs
//! write: write_atomic()    tempfile in the target dir, then persist
//! ```

pub mod walk;

#[cfg(test)]
mod tests;

use std::io::Write as _;
use std::path::Path;

use crate::error::{FsError, RuntimeEnvResult};

/// Replaces `path` with `contents` via a temp file in the same directory.
///
/// Readers never observe a half-written file.
///
/// # Errors
///
/// Returns `FsError::IoError` if the temp file cannot be created, written
/// or renamed over `path`.
pub fn write_atomic(path: &Path, contents: &str) -> RuntimeEnvResult<()> {
    let io_error = |source: std::io::Error| FsError::IoError {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(contents.as_bytes()).map_err(io_error)?;
    // Temp files are created 0600; keep what the replaced file had.
    if let Ok(metadata) = std::fs::metadata(path) {
        file.as_file()
            .set_permissions(metadata.permissions())
            .map_err(io_error)?;
    }
    file.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}

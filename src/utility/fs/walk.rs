// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bon::Builder;
use flume::bounded;
use ignore::WalkBuilder;
use tracing::warn;

use crate::error::{FsError, Result};

/// Options for parallel directory traversal.
///
/// Hidden entries are always skipped and ignore files are never consulted.
#[derive(Debug, Clone, Default, Builder)]
pub struct WalkOptions {
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl WalkOptions {
    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Options for scanning a build output directory.
    ///
    /// Output dirs are usually gitignored themselves, so ignore files are not
    /// consulted; `node_modules` is skipped.
    #[must_use]
    pub fn for_output_dir() -> Self {
        Self::builder()
            .with_skip_dirs(vec!["node_modules".to_string()])
            .build()
    }
}

/// Files found by [`collect_files`], sorted, plus the number of walk errors.
#[derive(Debug)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.standard_filters(false);
    builder.hidden(true);

    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            // Evaluated before descending
            !(entry.file_type().is_some_and(|ft| ft.is_dir())
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| skip_dirs.iter().any(|skip| skip == name)))
        });
    }

    builder
}

/// Collects every regular file below `root` using `ignore::WalkParallel`.
///
/// Results arrive over a flume channel in nondeterministic order and are
/// sorted before returning.
///
/// # Errors
///
/// Returns `FsError::NotFound` if `root` does not exist.
///
/// # Example
/// ```no_run
/// use runtime_env::utility::fs::walk::{collect_files, WalkOptions};
///
/// let result = collect_files("dist", &WalkOptions::for_output_dir())?;
/// println!("Found {} files", result.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn collect_files<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<WalkResult> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(FsError::NotFound(root.to_path_buf()).into());
    }

    let (file_tx, file_rx) = bounded::<PathBuf>(1000);
    let error_count = Arc::new(AtomicUsize::new(0));

    let walker = build_walker(root, options).build_parallel();

    // The receiver must drain while the walk runs or the bounded channel
    // fills up and blocks the walker threads.
    let files = std::thread::scope(|scope| {
        let collector = scope.spawn(move || file_rx.iter().collect::<Vec<_>>());

        walker.run(|| {
            let file_tx = file_tx.clone();
            let error_count = Arc::clone(&error_count);

            Box::new(move |entry_result| {
                match entry_result {
                    Ok(entry) => {
                        if entry.file_type().is_some_and(|ft| ft.is_file()) {
                            let _ = file_tx.send(entry.into_path());
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "walk error");
                        error_count.fetch_add(1, Ordering::Relaxed);
                    }
                }
                ignore::WalkState::Continue
            })
        });
        drop(file_tx);

        collector.join().unwrap_or_default()
    });

    let mut files = files;
    files.sort();

    Ok(WalkResult {
        files,
        error_count: error_count.load(Ordering::Relaxed),
    })
}

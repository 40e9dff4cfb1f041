// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Standalone host running the plugin hooks over a built output directory.
//!
//! ```text
//! out_dir
//!   collect_files()  --filter globs-->  modules (sorted)
//!        |
//!        v   transform(code, path)      rewrite in place (atomic)
//!   index.html
//!        |
//!        v   transform_index_html()     head-prepend script
//!   generate_bundle()  --> <name>.js, <name>.template.js
//! ```

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::Context;
use bon::Builder;
use tracing::{debug, info, warn};
use wax::Program as _;

use crate::emit::Bundle;
use crate::error::Result;
use crate::html::inject_tags;
use crate::plugin::ResolvedPlugin;
use crate::utility::fs::walk::{WalkOptions, collect_files};
use crate::utility::fs::write_atomic;

/// Modules the transform hook sees by default.
pub const DEFAULT_MODULE_GLOB: &str = "**/*.{js,mjs,cjs,jsx,ts,tsx}";

/// HTML entry point by default.
pub const DEFAULT_HTML_ENTRY: &str = "index.html";

/// Options for [`run_build`].
#[derive(Debug, Clone, Builder)]
pub struct DistOptions {
    /// Built output directory, rewritten in place.
    #[builder(setters(name = with_out_dir), into)]
    out_dir: PathBuf,
    /// Globs (relative to `out_dir`) of modules to transform.
    #[builder(setters(name = with_include), default = vec![DEFAULT_MODULE_GLOB.to_string()])]
    include: Vec<String>,
    /// HTML entry relative to `out_dir`.
    #[builder(setters(name = with_html_entry), into, default = DEFAULT_HTML_ENTRY.to_string())]
    html_entry: String,
    /// Report what would change without writing.
    #[builder(setters(name = with_dry_run), default = false)]
    dry_run: bool,
}

impl DistOptions {
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    #[must_use]
    pub fn include(&self) -> &[String] {
        &self.include
    }

    #[must_use]
    pub fn html_entry(&self) -> &str {
        &self.html_entry
    }

    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// What a [`run_build`] pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistReport {
    /// Modules matching the include globs.
    pub modules_scanned: usize,
    /// Modules the transform hook changed.
    pub modules_rewritten: Vec<PathBuf>,
    /// Whether this pass added the bootstrap script to the HTML entry.
    pub html_injected: bool,
    /// Emitted asset file names.
    pub assets: Vec<String>,
}

/// Runs transform, HTML and bundle hooks over `options.out_dir()`.
///
/// # Errors
///
/// Returns an error if the directory does not exist, an include glob is
/// invalid, or a file cannot be read or written.
pub fn run_build(plugin: &ResolvedPlugin, options: &DistOptions) -> Result<DistReport> {
    let out_dir = options.out_dir();
    let globs = options
        .include()
        .iter()
        .map(|pattern| {
            wax::Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("invalid include glob '{pattern}': {e}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut bundle = Bundle::new();
    plugin.generate_bundle(&mut bundle);

    let mut report = DistReport::default();
    let files = collect_files(out_dir, &WalkOptions::for_output_dir())?;
    if files.error_count() > 0 {
        warn!(errors = files.error_count(), "errors while scanning output directory");
    }

    for path in files.files() {
        let Ok(relative) = path.strip_prefix(out_dir) else {
            continue;
        };
        // Assets from an earlier run are regenerated below.
        if relative
            .to_str()
            .is_some_and(|rel| bundle.get(&rel.replace('\\', "/")).is_some())
        {
            continue;
        }
        if !globs.iter().any(|glob| glob.is_match(relative)) {
            continue;
        }
        report.modules_scanned += 1;

        let Ok(code) = std::fs::read_to_string(path) else {
            warn!(path = %path.display(), "skipping unreadable or non UTF-8 module");
            continue;
        };
        let id = relative.display().to_string();
        if let Some(rewritten) = plugin.transform(&code, &id) {
            if !options.dry_run() {
                write_atomic(path, &rewritten)?;
            }
            report.modules_rewritten.push(relative.to_path_buf());
        }
    }

    let html_path = out_dir.join(options.html_entry());
    if let Some(tag) = plugin.transform_index_html()
        && html_path.is_file()
    {
        let html = std::fs::read_to_string(&html_path)
            .with_context(|| format!("failed to read {}", html_path.display()))?;
        if html.contains(&tag.render()) {
            debug!(path = %html_path.display(), "bootstrap script already present");
        } else {
            let injected = inject_tags(&html, &[tag])?;
            if !options.dry_run() {
                write_atomic(&html_path, &injected)?;
            }
            debug!(path = %html_path.display(), "injected bootstrap script");
            report.html_injected = true;
        }
    }

    if !options.dry_run() {
        bundle.write_to(out_dir)?;
    }
    report.assets = bundle
        .assets()
        .iter()
        .map(|asset| asset.file_name().to_string())
        .collect();

    info!(
        scanned = report.modules_scanned,
        rewritten = report.modules_rewritten.len(),
        html = report.html_injected,
        assets = report.assets.len(),
        dry_run = options.dry_run(),
        "build pass finished"
    );
    Ok(report)
}

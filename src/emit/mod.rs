// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runtime data assets.
//!
//! ```text
//! <name>.js            export default {"PORT":8080,"DEBUG":true};
//! <name>.template.js   export default {"PORT":"$PORT","DEBUG":"$DEBUG"};
//! ```
//!
//! The template asset is meant for `envsubst` (or any `$VAR` templating)
//! run against a deployed container's environment.

#[cfg(test)]
mod tests;

use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use tracing::info;

use crate::env::EnvMap;
use crate::error::Result;
use crate::utility::fs::write_atomic;

/// A file added to the build output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedAsset {
    file_name: String,
    source: String,
}

impl EmittedAsset {
    #[must_use]
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Output path relative to the build's output directory.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// The build's output set, as far as this crate adds to it.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    assets: Vec<EmittedAsset>,
}

impl Bundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset, replacing any earlier one with the same file name.
    pub fn emit_file(&mut self, asset: EmittedAsset) {
        self.assets.retain(|a| a.file_name != asset.file_name);
        self.assets.push(asset);
    }

    #[must_use]
    pub fn assets(&self) -> &[EmittedAsset] {
        &self.assets
    }

    #[must_use]
    pub fn get(&self, file_name: &str) -> Option<&EmittedAsset> {
        self.assets.iter().find(|a| a.file_name == file_name)
    }

    /// Writes every asset below `out_dir`, each replaced atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written.
    pub fn write_to(&self, out_dir: &Path) -> Result<()> {
        for asset in &self.assets {
            let path = out_dir.join(asset.file_name());
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            write_atomic(&path, asset.source())?;
            info!(path = %path.display(), "emitted asset");
        }
        Ok(())
    }
}

/// File name of the runtime asset.
#[must_use]
pub fn runtime_asset_name(name: &str) -> String {
    format!("{name}.js")
}

/// File name of the envsubst template asset.
#[must_use]
pub fn template_asset_name(name: &str) -> String {
    format!("{name}.template.js")
}

/// `<name>.js`: the env map with coerced values as the default export.
#[must_use]
pub fn runtime_asset(name: &str, env: &EnvMap) -> EmittedAsset {
    EmittedAsset::new(
        runtime_asset_name(name),
        default_export(&env.to_coerced_json()),
    )
}

/// `<name>.template.js`: every key mapped to `$KEY`.
#[must_use]
pub fn template_asset(name: &str, env: &EnvMap) -> EmittedAsset {
    EmittedAsset::new(
        template_asset_name(name),
        default_export(&env.to_placeholder_json()),
    )
}

fn default_export(object: &Value) -> String {
    format!("export default {object};\n")
}

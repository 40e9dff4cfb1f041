// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plugin options merging.
//!
//! ```text
//! PluginOptions + PluginOptionsOverride --> field-by-field merge
//! ```
//!
//! Only explicitly set fields (`Some`) in the override replace base values.

use std::path::PathBuf;

use serde::Deserialize;

use super::types::{OptionSource, PluginOptions};

/// Plugin options with every field optional.
///
/// Used for both the `[plugin]` table of a config file and the
/// build-tool-level `[host.runtime_env]` block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginOptionsOverride {
    pub name: Option<OptionSource<String>>,
    pub generate_types: Option<bool>,
    pub generated_types_path: Option<OptionSource<PathBuf>>,
    pub inject_html: Option<bool>,
    pub envsubst_template: Option<bool>,
    pub types_formatter: Option<Vec<String>>,
}

impl PluginOptionsOverride {
    /// Whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.generate_types.is_none()
            && self.generated_types_path.is_none()
            && self.inject_html.is_none()
            && self.envsubst_template.is_none()
            && self.types_formatter.is_none()
    }
}

/// Merge an override block over base options.
///
/// `Some` values in the override win; `None` keeps the base value.
#[must_use]
pub fn merge_options(base: &PluginOptions, override_options: &PluginOptionsOverride) -> PluginOptions {
    PluginOptions {
        name: override_options
            .name
            .clone()
            .unwrap_or_else(|| base.name.clone()),
        generate_types: override_options
            .generate_types
            .unwrap_or(base.generate_types),
        generated_types_path: override_options
            .generated_types_path
            .clone()
            .or_else(|| base.generated_types_path.clone()),
        inject_html: override_options.inject_html.unwrap_or(base.inject_html),
        envsubst_template: override_options
            .envsubst_template
            .unwrap_or(base.envsubst_template),
        types_formatter: override_options
            .types_formatter
            .clone()
            .or_else(|| base.types_formatter.clone()),
    }
}

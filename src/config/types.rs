// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration type definitions.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize};

use super::merge::PluginOptionsOverride;
use crate::error::ConfigError;

/// Default runtime global member name.
pub const DEFAULT_NAME: &str = "env";

/// Default compile-time accessor marker.
pub const DEFAULT_MARKER: &str = "import.meta.env";

/// Default runtime global object.
pub const DEFAULT_GLOBAL_OBJECT: &str = "window";

/// Default reserved key prefix owned by the host tool.
pub const DEFAULT_ENV_PREFIX: &str = "VITE_";

// =============================================================================
// OptionSource
// =============================================================================

/// An option given either as a literal or as a zero-argument function.
///
/// Functions are called at most once, when the option is first read from
/// [`ResolvedOptions`](super::ResolvedOptions).
#[derive(Clone)]
pub enum OptionSource<T> {
    Value(T),
    Lazy(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T> OptionSource<T> {
    /// Wraps a function producing the value.
    pub fn lazy(f: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self::Lazy(Arc::new(f))
    }
}

impl<T: Clone> OptionSource<T> {
    /// Produces the value, calling the function for `Lazy`.
    #[must_use]
    pub fn resolve(&self) -> T {
        match self {
            Self::Value(value) => value.clone(),
            Self::Lazy(f) => f(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OptionSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Lazy(_) => f.write_str("Lazy(<fn>)"),
        }
    }
}

impl From<&str> for OptionSource<String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for OptionSource<String> {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<PathBuf> for OptionSource<PathBuf> {
    fn from(value: PathBuf) -> Self {
        Self::Value(value)
    }
}

impl From<&Path> for OptionSource<PathBuf> {
    fn from(value: &Path) -> Self {
        Self::Value(value.to_path_buf())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OptionSource<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Value)
    }
}

// =============================================================================
// PluginOptions
// =============================================================================

/// User-supplied plugin options.
#[derive(Debug, Clone, Builder)]
pub struct PluginOptions {
    /// Member name on the global object, also the emitted asset stem.
    #[builder(setters(name = with_name), into, default = OptionSource::from(DEFAULT_NAME))]
    pub name: OptionSource<String>,
    /// Write `<name>.d.ts` in serve mode.
    #[builder(setters(name = with_generate_types), default = false)]
    pub generate_types: bool,
    /// Directory for the declaration file (cwd when unset).
    #[builder(setters(name = with_generated_types_path), into)]
    pub generated_types_path: Option<OptionSource<PathBuf>>,
    /// Prepend the bootstrap script to the HTML entry's head.
    #[builder(setters(name = with_inject_html), default = true)]
    pub inject_html: bool,
    /// Emit `<name>.template.js` with `$KEY` placeholders.
    #[builder(setters(name = with_envsubst_template), default = false)]
    pub envsubst_template: bool,
    /// Formatter command line (program first) for the declaration file.
    #[builder(setters(name = with_types_formatter))]
    pub types_formatter: Option<Vec<String>>,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

// =============================================================================
// BuildCommand
// =============================================================================

/// Host command the plugin runs under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildCommand {
    /// Development server.
    Serve,
    /// Production bundle.
    #[default]
    Build,
}

impl BuildCommand {
    /// Mode used when none is configured.
    #[must_use]
    pub const fn default_mode(self) -> &'static str {
        match self {
            Self::Serve => "development",
            Self::Build => "production",
        }
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serve => write!(f, "serve"),
            Self::Build => write!(f, "build"),
        }
    }
}

impl FromStr for BuildCommand {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "serve" | "dev" => Ok(Self::Serve),
            "build" => Ok(Self::Build),
            _ => Err(ConfigError::InvalidValue {
                key: "host.command".to_string(),
                message: format!("expected 'serve' or 'build', got '{s}'"),
            }),
        }
    }
}

// =============================================================================
// HostConfig
// =============================================================================

/// Resolved host build configuration handed to the plugin.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Project root.
    pub root: PathBuf,
    /// Directory holding `.env*` files, relative to `root` (defaults to `root`).
    pub env_dir: Option<PathBuf>,
    /// Mode selecting `.env.<mode>` (defaults per command).
    pub mode: Option<String>,
    /// Serve or build.
    pub command: BuildCommand,
    /// Reserved key prefixes, excluded from runtime exposure.
    pub env_prefix: Vec<String>,
    /// Compile-time accessor marker.
    pub marker: String,
    /// Runtime global object.
    pub global_object: String,
    /// Build-tool-level options block; wins over plugin options.
    pub runtime_env: PluginOptionsOverride,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            env_dir: None,
            mode: None,
            command: BuildCommand::default(),
            env_prefix: vec![DEFAULT_ENV_PREFIX.to_string()],
            marker: DEFAULT_MARKER.to_string(),
            global_object: DEFAULT_GLOBAL_OBJECT.to_string(),
            runtime_env: PluginOptionsOverride::default(),
        }
    }
}

impl HostConfig {
    /// Directory the env files are read from.
    #[must_use]
    pub fn env_dir(&self) -> PathBuf {
        self.env_dir
            .as_ref()
            .map_or_else(|| self.root.clone(), |dir| self.root.join(dir))
    }

    /// Effective mode.
    #[must_use]
    pub fn mode(&self) -> &str {
        self.mode
            .as_deref()
            .unwrap_or_else(|| self.command.default_mode())
    }
}

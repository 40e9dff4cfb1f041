// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment file loading.
//!
//! # Load Order
//!
//! ```text
//! Priority (low → high), missing files skipped
//! 1. .env
//! 2. .env.local          (include_local)
//! 3. .env.<mode>
//! 4. .env.<mode>.local   (include_local)
//!        |
//!        v
//!   drop keys matching any reserved prefix
//!        |
//!        v
//!     EnvMap (insertion ordered, immutable)
//! ```

pub mod value;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use bon::Builder;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{EnvFileError, RuntimeEnvResult};

use value::{ValueKind, coerce, infer};

/// Filtered environment variables, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvMap {
    vars: IndexMap<String, String>,
}

impl EnvMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Raw value of a variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Iterates `(key, raw value)` pairs in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates keys in map order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Iterates `(key, inferred kind)` pairs in map order.
    pub fn kinds(&self) -> impl Iterator<Item = (&str, ValueKind)> {
        self.iter().map(|(k, v)| (k, infer(v)))
    }

    /// JSON object with values coerced to number/boolean where they lex as one.
    #[must_use]
    pub fn to_coerced_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.to_string(), coerce(v)))
                .collect::<Map<_, _>>(),
        )
    }

    /// JSON object mapping every key to its `$KEY` placeholder.
    #[must_use]
    pub fn to_placeholder_json(&self) -> Value {
        Value::Object(
            self.keys()
                .map(|k| (k.to_string(), Value::String(format!("${k}"))))
                .collect::<Map<_, _>>(),
        )
    }

    /// Drops every key starting with one of `prefixes`.
    fn retain_unreserved(&mut self, prefixes: &[String]) {
        self.vars.retain(|key, _| {
            let reserved = is_reserved(key, prefixes);
            if reserved {
                trace!(key = %key, "dropping reserved key");
            }
            !reserved
        });
    }

    /// Inserts or replaces; replaced keys keep their position.
    fn insert(&mut self, key: String, value: String) {
        self.vars.insert(key, value);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Whether `key` starts with any reserved prefix (case-sensitive).
#[must_use]
pub fn is_reserved(key: &str, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|prefix| !prefix.is_empty() && key.starts_with(prefix.as_str()))
}

/// Options for [`load_env`].
#[derive(Debug, Clone, Builder)]
pub struct LoadOptions {
    /// Mode selecting `.env.<mode>`.
    #[builder(setters(name = with_mode), into)]
    mode: String,
    /// Reserved key prefixes.
    #[builder(setters(name = with_reserved_prefixes), default)]
    reserved_prefixes: Vec<String>,
    /// Also read `.env.local` and `.env.<mode>.local`.
    #[builder(setters(name = with_include_local), default = true)]
    include_local: bool,
}

impl LoadOptions {
    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    #[must_use]
    pub fn reserved_prefixes(&self) -> &[String] {
        &self.reserved_prefixes
    }

    #[must_use]
    pub const fn include_local(&self) -> bool {
        self.include_local
    }

    /// Candidate env files, lowest precedence first.
    #[must_use]
    pub fn env_files(&self, env_dir: &Path) -> Vec<PathBuf> {
        let mode = self.mode.as_str();
        let mut names = vec![".env".to_string()];
        if self.include_local {
            names.push(".env.local".to_string());
        }
        names.push(format!(".env.{mode}"));
        if self.include_local {
            names.push(format!(".env.{mode}.local"));
        }
        names.into_iter().map(|name| env_dir.join(name)).collect()
    }
}

/// Loads and merges the env files in `env_dir`.
///
/// Later files override earlier ones; missing files contribute nothing.
///
/// # Errors
///
/// Returns `EnvFileError::Read` if an existing file cannot be read and
/// `EnvFileError::Parse` if it contains a malformed line.
///
/// # Example
///
/// ```no_run
/// use runtime_env::env::{LoadOptions, load_env};
///
/// let options = LoadOptions::builder()
///     .with_mode("production")
///     .with_reserved_prefixes(vec!["VITE_".to_string()])
///     .build();
/// let env = load_env("./", &options)?;
/// println!("{} variables", env.len());
/// # Ok::<(), runtime_env::error::RuntimeEnvError>(())
/// ```
pub fn load_env<P: AsRef<Path>>(env_dir: P, options: &LoadOptions) -> RuntimeEnvResult<EnvMap> {
    let mut env = EnvMap::new();

    for path in options.env_files(env_dir.as_ref()) {
        if !path.is_file() {
            trace!(path = %path.display(), "env file not present");
            continue;
        }
        let before = env.len();
        read_env_file(&path, &mut env)?;
        debug!(
            path = %path.display(),
            new_keys = env.len() - before,
            "loaded env file"
        );
    }

    env.retain_unreserved(options.reserved_prefixes());
    Ok(env)
}

/// Parses one file into `env`.
///
/// The keys merged so far are replayed ahead of the file's own lines, so a
/// `${VAR}` reference resolves against earlier files too. The process
/// environment still wins, as it does inside a single file.
fn read_env_file(path: &Path, env: &mut EnvMap) -> RuntimeEnvResult<()> {
    let contents = std::fs::read_to_string(path).map_err(|source| EnvFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);

    let mut source = substitution_prelude(env);
    source.push_str(contents);

    let replayed = env.len();
    for item in dotenvy::from_read_iter(source.as_bytes()).skip(replayed) {
        let (key, value) = item.map_err(|e| read_error(path, e))?;
        env.insert(key, value);
    }
    Ok(())
}

/// One double-quoted `KEY="value"` line per merged variable.
fn substitution_prelude(env: &EnvMap) -> String {
    let mut prelude = String::new();
    for (key, value) in env.iter() {
        prelude.push_str(key);
        prelude.push_str("=\"");
        for c in value.chars() {
            match c {
                '\\' | '"' | '$' => {
                    prelude.push('\\');
                    prelude.push(c);
                }
                '\n' => prelude.push_str("\\n"),
                _ => prelude.push(c),
            }
        }
        prelude.push_str("\"\n");
    }
    prelude
}

fn read_error(path: &Path, error: dotenvy::Error) -> EnvFileError {
    match error {
        dotenvy::Error::Io(source) => EnvFileError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => EnvFileError::Parse {
            path: path.to_path_buf(),
            source: other,
        },
    }
}

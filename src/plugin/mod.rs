// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The plugin and its lifecycle hooks.
//!
//! # Lifecycle
//!
//! ```text
//! Plugin::new(PluginOptions)
//!        |
//!        v  resolve(&HostConfig)     options merge, load env files
//! ResolvedPlugin
//!   configure_server()        serve: spawn .d.ts write
//!   transform(code, id)       every module
//!   transform_index_html()    HTML entry
//!   generate_bundle(&mut b)   build end: <name>.js (+ template)
//! ```
//!
//! All state lives on the [`ResolvedPlugin`] built once per build; hooks
//! only borrow it.


use tracing::{debug, info, warn};

use crate::config::ResolvedOptions;
use crate::config::types::{BuildCommand, HostConfig, PluginOptions};
use crate::dts::{DeclarationFormatter, DeclarationTask, spawn_write_declarations};
use crate::emit::{Bundle, runtime_asset, template_asset};
use crate::env::{EnvMap, LoadOptions, load_env};
use crate::error::Result;
use crate::html::{HtmlTag, build_script, dev_script};
use crate::rewrite::{ReferenceRewriter, is_identifier};

/// Plugin before the host configuration is known.
#[derive(Debug, Clone, Default)]
pub struct Plugin {
    options: PluginOptions,
}

impl Plugin {
    #[must_use]
    pub const fn new(options: PluginOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Resolves options against the host and loads the env files.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing env file cannot be read or parsed.
    pub fn resolve(&self, host: &HostConfig) -> Result<ResolvedPlugin> {
        let options = ResolvedOptions::resolve(&self.options, &host.runtime_env);

        let load_options = LoadOptions::builder()
            .with_mode(host.mode())
            .with_reserved_prefixes(host.env_prefix.clone())
            .build();
        let env = load_env(host.env_dir(), &load_options)?;

        Ok(ResolvedPlugin::new(options, host.clone(), env))
    }
}

/// Plugin with its resolved options, host configuration and env map.
#[derive(Debug)]
pub struct ResolvedPlugin {
    options: ResolvedOptions,
    host: HostConfig,
    env: EnvMap,
    rewriter: ReferenceRewriter,
}

impl ResolvedPlugin {
    /// Assembles a resolved plugin from already loaded parts.
    #[must_use]
    pub fn new(options: ResolvedOptions, host: HostConfig, env: EnvMap) -> Self {
        let name = options.name();
        if !is_identifier(name) {
            warn!(name = %name, "runtime env name is not a valid identifier");
        }
        let rewriter = ReferenceRewriter::new(
            &host.marker,
            &host.global_object,
            name,
            host.env_prefix.clone(),
        );
        info!(
            name = %name,
            mode = %host.mode(),
            command = %host.command,
            variables = env.len(),
            "runtime env resolved"
        );
        Self {
            options,
            host,
            env,
            rewriter,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    #[must_use]
    pub const fn host(&self) -> &HostConfig {
        &self.host
    }

    #[must_use]
    pub const fn env(&self) -> &EnvMap {
        &self.env
    }

    /// Resolved global member name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.options.name()
    }

    /// Serve-mode hook: starts writing `<name>.d.ts` when enabled.
    ///
    /// Returns the detached write task, or `None` when nothing was started.
    /// Works with or without an entered tokio runtime.
    #[must_use]
    pub fn configure_server(&self) -> Option<DeclarationTask> {
        if self.host.command != BuildCommand::Serve || !self.options.generate_types() {
            return None;
        }
        let formatter = DeclarationFormatter::from_command_line(self.options.types_formatter());
        spawn_write_declarations(
            self.options.generated_types_path().to_path_buf(),
            self.name().to_string(),
            self.env.clone(),
            formatter,
        )
    }

    /// Transform hook: rewrites env accessors in one module.
    ///
    /// `None` means the module is unchanged.
    #[must_use]
    pub fn transform(&self, code: &str, id: &str) -> Option<String> {
        let rewritten = self.rewriter.rewrite(code)?;
        debug!(module = %id, "rewrote env references");
        Some(rewritten)
    }

    /// HTML hook: the bootstrap script for the current command.
    #[must_use]
    pub fn transform_index_html(&self) -> Option<HtmlTag> {
        if !self.options.inject_html() {
            return None;
        }
        let tag = match self.host.command {
            BuildCommand::Serve => dev_script(&self.host.global_object, self.name(), &self.env),
            BuildCommand::Build => build_script(&self.host.global_object, self.name()),
        };
        Some(tag)
    }

    /// Bundle hook: adds the runtime asset and, when enabled, the template.
    pub fn generate_bundle(&self, bundle: &mut Bundle) {
        bundle.emit_file(runtime_asset(self.name(), &self.env));
        if self.options.envsubst_template() {
            bundle.emit_file(template_asset(self.name(), &self.env));
        }
    }
}

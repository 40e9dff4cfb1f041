// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |      build / dev / transform / env
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, layered, overrides |
//!              '-------------+-------------'
//!                            v
//!                 plugin (ResolvedPlugin)  <---  host (output dir driver)
//!                            |
//!        +--------+----------+---------+--------+
//!        v        v          v         v        v
//!       env    rewrite      emit      html     dts
//!    .env load  marker    <name>.js  <script> .d.ts
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```
//!
//! # Library Use
//!
//! ```no_run
//! use runtime_env::config::types::{HostConfig, PluginOptions};
//! use runtime_env::emit::Bundle;
//! use runtime_env::plugin::Plugin;
//!
//! let plugin = Plugin::new(PluginOptions::builder().with_envsubst_template(true).build())
//!     .resolve(&HostConfig::default())?;
//!
//! let code = plugin.transform("fetch(import.meta.env.API_URL)", "main.js");
//! assert_eq!(code.as_deref(), Some("fetch(window.env.API_URL)"));
//!
//! let mut bundle = Bundle::new();
//! plugin.generate_bundle(&mut bundle);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod dts;
pub mod emit;
pub mod env;
pub mod error;
pub mod host;
pub mod html;
pub mod logging;
pub mod plugin;
pub mod rewrite;
pub mod utility;

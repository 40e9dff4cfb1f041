// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTML bootstrap script.
//!
//! ```text
//! serve:  <script type="module">
//!         window.env = {...window.env, ...{"PORT":8080}};
//!         </script>
//!
//! build:  <script type="module">
//!         import runtimeEnv from '/env.js';
//!         window.env = {...window.env, ...runtimeEnv};
//!         </script>
//! ```
//!
//! Both forms spread into the existing global, never replace it.


use anyhow::Context;
use regex::Regex;

use crate::emit::runtime_asset_name;
use crate::env::EnvMap;
use crate::error::Result;

/// Binding the production script imports the runtime asset as.
const IMPORT_BINDING: &str = "runtimeEnv";

const HEAD_OPEN: &str = r"(?i)<head(?:\s[^>]*)?>";
const DOCTYPE: &str = r"(?i)^\s*<!doctype[^>]*>";

/// Where a tag goes in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectTo {
    /// First child of `<head>`.
    HeadPrepend,
}

/// A tag for the host to place into the HTML entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTag {
    tag: String,
    attrs: Vec<(String, String)>,
    children: String,
    inject_to: InjectTo,
}

impl HtmlTag {
    /// `<script type="module">` prepended to head.
    #[must_use]
    pub fn module_script(children: String) -> Self {
        Self {
            tag: "script".to_string(),
            attrs: vec![("type".to_string(), "module".to_string())],
            children,
            inject_to: InjectTo::HeadPrepend,
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    #[must_use]
    pub fn children(&self) -> &str {
        &self.children
    }

    #[must_use]
    pub const fn inject_to(&self) -> InjectTo {
        self.inject_to
    }

    /// Serializes the tag.
    #[must_use]
    pub fn render(&self) -> String {
        let attrs: String = self
            .attrs
            .iter()
            .map(|(key, value)| format!(" {key}=\"{value}\""))
            .collect();
        format!(
            "<{tag}{attrs}>\n{children}\n</{tag}>",
            tag = self.tag,
            children = self.children
        )
    }
}

/// Inline script merging a JSON snapshot of `env` into `<global>.<name>`.
#[must_use]
pub fn dev_script(global_object: &str, name: &str, env: &EnvMap) -> HtmlTag {
    let target = format!("{global_object}.{name}");
    let snapshot = escape_script_text(&env.to_coerced_json().to_string());
    HtmlTag::module_script(format!("{target} = {{...{target}, ...{snapshot}}};"))
}

/// Script importing `/<name>.js` and merging it into `<global>.<name>`.
#[must_use]
pub fn build_script(global_object: &str, name: &str) -> HtmlTag {
    let target = format!("{global_object}.{name}");
    let asset = runtime_asset_name(name);
    HtmlTag::module_script(format!(
        "import {IMPORT_BINDING} from '/{asset}';\n{target} = {{...{target}, ...{IMPORT_BINDING}}};"
    ))
}

/// Keeps embedded JSON from closing the surrounding script element or
/// switching it into the escaped script state.
fn escape_script_text(text: &str) -> String {
    text.replace("</", "<\\/").replace("<!--", "<\\!--")
}

/// Places `tags` into `html`.
///
/// Head-prepend tags go right after the opening `<head>`; without a head,
/// after the doctype, or at the very start.
///
/// # Errors
///
/// Returns an error if the head/doctype patterns fail to compile.
pub fn inject_tags(html: &str, tags: &[HtmlTag]) -> Result<String> {
    let rendered: String = tags
        .iter()
        .filter(|tag| tag.inject_to() == InjectTo::HeadPrepend)
        .map(|tag| format!("\n{}", tag.render()))
        .collect();
    if rendered.is_empty() {
        return Ok(html.to_string());
    }

    let head = Regex::new(HEAD_OPEN).context("failed to compile head regex")?;
    let doctype = Regex::new(DOCTYPE).context("failed to compile doctype regex")?;
    let at = head
        .find(html)
        .or_else(|| doctype.find(html))
        .map_or(0, |m| m.end());

    let mut out = String::with_capacity(html.len() + rendered.len() + 1);
    out.push_str(&html[..at]);
    if at == 0 {
        out.push_str(rendered.trim_start_matches('\n'));
        out.push('\n');
    } else {
        out.push_str(&rendered);
    }
    out.push_str(&html[at..]);
    Ok(out)
}

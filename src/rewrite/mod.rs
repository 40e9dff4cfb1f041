// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Source text rewriting of compile-time env accessors.
//!
//! ```text
//! import.meta.env.PORT      -> window.env.PORT
//! import.meta.env.VITE_URL  -> (reserved, untouched)
//! import.meta.env["PORT"]   -> (no dot accessor, untouched)
//! import.meta.env.-x        -> (no identifier, untouched)
//! ```
//!
//! One left-to-right pass per call. The scan cursor is a local, so a
//! [`ReferenceRewriter`] can be shared across any number of modules.

#[cfg(test)]
mod tests;

use std::borrow::Cow;

/// Rewrites `<marker>.<ident>` into `<global>.<name>.<ident>`.
#[derive(Debug, Clone)]
pub struct ReferenceRewriter {
    /// `<marker>.`, searched for as one needle.
    needle: String,
    replacement: String,
    reserved_prefixes: Vec<String>,
}

impl ReferenceRewriter {
    /// Creates a rewriter replacing `marker` with `<global_object>.<name>`.
    #[must_use]
    pub fn new(marker: &str, global_object: &str, name: &str, reserved_prefixes: Vec<String>) -> Self {
        Self {
            needle: format!("{marker}."),
            replacement: format!("{global_object}.{name}"),
            reserved_prefixes,
        }
    }

    /// The text each rewritten marker becomes.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Rewrites `code`, returning `None` when nothing changed.
    #[must_use]
    pub fn rewrite(&self, code: &str) -> Option<String> {
        match self.rewrite_cow(code) {
            Cow::Borrowed(_) => None,
            Cow::Owned(rewritten) => Some(rewritten),
        }
    }

    /// Rewrites `code`, borrowing it when nothing changed.
    #[must_use]
    pub fn rewrite_cow<'a>(&self, code: &'a str) -> Cow<'a, str> {
        let marker_len = self.needle.len() - 1;
        let mut out: Option<String> = None;
        // `copied` is where the next verbatim copy starts, `cursor` where the
        // next search starts.
        let mut copied = 0;
        let mut cursor = 0;

        while let Some(offset) = code[cursor..].find(self.needle.as_str()) {
            let start = cursor + offset;
            let ident_start = start + self.needle.len();

            let Some(ident) = leading_identifier(&code[ident_start..]) else {
                cursor = start + marker_len;
                continue;
            };

            if crate::env::is_reserved(ident, &self.reserved_prefixes) {
                cursor = ident_start + ident.len();
                continue;
            }

            let buf = out.get_or_insert_with(|| String::with_capacity(code.len() + 16));
            buf.push_str(&code[copied..start]);
            buf.push_str(&self.replacement);
            copied = start + marker_len;
            cursor = copied;
        }

        match out {
            Some(mut buf) => {
                buf.push_str(&code[copied..]);
                Cow::Owned(buf)
            }
            None => Cow::Borrowed(code),
        }
    }
}

/// Returns the identifier at the start of `text`, if any.
///
/// Follows the ECMAScript `IdentifierName` character classes: `ID_Start`,
/// `$` or `_` first, then `ID_Continue`, `$`, ZWNJ or ZWJ.
#[must_use]
pub fn leading_identifier(text: &str) -> Option<&str> {
    let mut chars = text.char_indices();
    let (_, first) = chars.next()?;
    if !is_identifier_start(first) {
        return None;
    }
    let end = chars
        .find(|&(_, c)| !is_identifier_continue(c))
        .map_or(text.len(), |(i, _)| i);
    Some(&text[..end])
}

/// Whether all of `text` is one identifier.
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    leading_identifier(text).is_some_and(|ident| ident.len() == text.len())
}

fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

fn is_identifier_continue(c: char) -> bool {
    c == '$' || c == '\u{200C}' || c == '\u{200D}' || unicode_ident::is_xid_continue(c)
}

// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lexical type inference for raw env values.
//!
//! ```text
//! "8080"  -> Number   8080
//! "1.5e3" -> Number   1500.0
//! "true"  -> Boolean  true
//! "True"  -> String   "True"
//! "0x10"  -> String   "0x10"
//! ""      -> String   ""
//! ```

use std::fmt;

use serde_json::{Number, Value};

/// Declared type of an env value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Boolean,
    String,
}

impl ValueKind {
    /// TypeScript type name.
    #[must_use]
    pub const fn as_ts_type(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ts_type())
    }
}

/// Infers the kind of a raw value: numeric literal, then `true`/`false`, then string.
#[must_use]
pub fn infer(raw: &str) -> ValueKind {
    if parse_number(raw).is_some() {
        ValueKind::Number
    } else if raw == "true" || raw == "false" {
        ValueKind::Boolean
    } else {
        ValueKind::String
    }
}

/// Converts a raw value to the JSON value of its inferred kind.
#[must_use]
pub fn coerce(raw: &str) -> Value {
    if let Some(number) = parse_number(raw) {
        Value::Number(number)
    } else if raw == "true" {
        Value::Bool(true)
    } else if raw == "false" {
        Value::Bool(false)
    } else {
        Value::String(raw.to_string())
    }
}

/// Parses a full decimal numeric literal.
///
/// Integers stay integers so `8080` serializes as `8080`, not `8080.0`.
fn parse_number(raw: &str) -> Option<Number> {
    if !raw.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) {
        return None;
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Number::from(int));
    }
    if let Ok(uint) = raw.parse::<u64>() {
        return Some(Number::from(uint));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|float| float.is_finite())
        .and_then(Number::from_f64)
}

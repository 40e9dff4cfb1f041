// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use tempfile::TempDir;

use super::value::{ValueKind, coerce, infer};
use super::{EnvMap, LoadOptions, is_reserved, load_env};
use crate::error::{EnvFileError, RuntimeEnvError};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

fn options(mode: &str) -> LoadOptions {
    LoadOptions::builder()
        .with_mode(mode)
        .with_reserved_prefixes(vec!["VITE_".to_string()])
        .build()
}

// =============================================================================
// load_env
// =============================================================================

#[test]
fn test_mode_file_overrides_base() {
    let temp = temp_dir();
    write(temp.path(), ".env", "APP_NAME=dev-app\nPORT=8080\n");
    write(temp.path(), ".env.production", "APP_NAME=prod-app\n");

    let env = load_env(temp.path(), &options("production")).unwrap();

    assert_eq!(env.get("APP_NAME"), Some("prod-app"));
    assert_eq!(env.get("PORT"), Some("8080"));
    // Overridden keys keep their first position.
    assert_eq!(env.keys().collect::<Vec<_>>(), ["APP_NAME", "PORT"]);
}

#[test]
fn test_other_mode_file_ignored() {
    let temp = temp_dir();
    write(temp.path(), ".env", "APP_NAME=dev-app\n");
    write(temp.path(), ".env.production", "APP_NAME=prod-app\n");

    let env = load_env(temp.path(), &options("development")).unwrap();

    assert_eq!(env.get("APP_NAME"), Some("dev-app"));
}

#[test]
fn test_reserved_prefix_filtered() {
    let temp = temp_dir();
    write(
        temp.path(),
        ".env",
        "VITE_PUBLIC=1\nAPI_URL=https://api.example.com\nVITE_OTHER=x\n",
    );

    let env = load_env(temp.path(), &options("production")).unwrap();

    assert!(!env.contains_key("VITE_PUBLIC"));
    assert!(!env.contains_key("VITE_OTHER"));
    assert_eq!(env.get("API_URL"), Some("https://api.example.com"));
    assert_eq!(env.len(), 1);
}

#[test]
fn test_reserved_prefix_filtered_after_merge() {
    let temp = temp_dir();
    write(temp.path(), ".env", "VITE_KEY=a\n");
    write(temp.path(), ".env.staging", "VITE_KEY=b\nKEY=c\n");

    let env = load_env(temp.path(), &options("staging")).unwrap();

    assert_eq!(env.iter().collect::<Vec<_>>(), [("KEY", "c")]);
}

#[test]
fn test_no_files_gives_empty_map() {
    let temp = temp_dir();
    let env = load_env(temp.path(), &options("production")).unwrap();
    assert!(env.is_empty());
}

#[test]
fn test_missing_dir_gives_empty_map() {
    let temp = temp_dir();
    let env = load_env(temp.path().join("nope"), &options("production")).unwrap();
    assert!(env.is_empty());
}

#[test]
fn test_local_files_precedence() {
    let temp = temp_dir();
    write(temp.path(), ".env", "A=env\nB=env\nC=env\nD=env\n");
    write(temp.path(), ".env.local", "B=local\nC=local\nD=local\n");
    write(temp.path(), ".env.production", "C=mode\nD=mode\n");
    write(temp.path(), ".env.production.local", "D=mode-local\n");

    let env = load_env(temp.path(), &options("production")).unwrap();

    assert_eq!(
        env.iter().collect::<Vec<_>>(),
        [("A", "env"), ("B", "local"), ("C", "mode"), ("D", "mode-local")]
    );
}

#[test]
fn test_local_files_skipped_when_disabled() {
    let temp = temp_dir();
    write(temp.path(), ".env", "A=env\n");
    write(temp.path(), ".env.local", "A=local\n");

    let options = LoadOptions::builder()
        .with_mode("production")
        .with_include_local(false)
        .build();
    let env = load_env(temp.path(), &options).unwrap();

    assert_eq!(env.get("A"), Some("env"));
}

#[test]
fn test_env_files_order() {
    let files: Vec<String> = options("staging")
        .env_files(Path::new(""))
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    assert_eq!(
        files,
        [".env", ".env.local", ".env.staging", ".env.staging.local"]
    );
}

#[test]
fn test_dotenv_syntax() {
    let temp = temp_dir();
    write(
        temp.path(),
        ".env",
        "# comment\n\nexport GREETING=\"hello world\"\nSINGLE='a b'\nEMPTY=\n",
    );

    let env = load_env(temp.path(), &options("production")).unwrap();

    assert_eq!(env.get("GREETING"), Some("hello world"));
    assert_eq!(env.get("SINGLE"), Some("a b"));
    assert_eq!(env.get("EMPTY"), Some(""));
}

#[test]
fn test_reference_resolves_across_files() {
    let temp = temp_dir();
    write(temp.path(), ".env", "RUNTIME_ENV_TEST_HOST=api.example.com\n");
    write(
        temp.path(),
        ".env.production",
        "URL=https://${RUNTIME_ENV_TEST_HOST}/v1\n",
    );

    let env = load_env(temp.path(), &options("production")).unwrap();

    assert_eq!(env.get("URL"), Some("https://api.example.com/v1"));
}

#[test]
fn test_reference_sees_overridden_value() {
    let temp = temp_dir();
    write(temp.path(), ".env", "RUNTIME_ENV_TEST_TIER=base\n");
    write(temp.path(), ".env.local", "RUNTIME_ENV_TEST_TIER=local\n");
    write(
        temp.path(),
        ".env.production",
        "LABEL=\"${RUNTIME_ENV_TEST_TIER}-prod\"\n",
    );

    let env = load_env(temp.path(), &options("production")).unwrap();

    assert_eq!(env.get("LABEL"), Some("local-prod"));
}

#[test]
fn test_earlier_values_survive_later_files() {
    let temp = temp_dir();
    write(
        temp.path(),
        ".env",
        "QUOTED='say \"hi\" for $5'\nSLASHES='C:\\dir'\nAPOS=\"it's\"\nLINES=\"a\\nb\"\n",
    );
    write(temp.path(), ".env.production", "COPY=${APOS}\n");

    let env = load_env(temp.path(), &options("production")).unwrap();

    assert_eq!(env.get("QUOTED"), Some("say \"hi\" for $5"));
    assert_eq!(env.get("SLASHES"), Some("C:\\dir"));
    assert_eq!(env.get("APOS"), Some("it's"));
    assert_eq!(env.get("LINES"), Some("a\nb"));
    assert_eq!(env.get("COPY"), Some("it's"));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let temp = temp_dir();
    write(temp.path(), ".env", "GOOD=1\nthis is not valid\n");

    let err = load_env(temp.path(), &options("production")).unwrap_err();

    match err {
        RuntimeEnvError::EnvFile(inner) => {
            assert!(matches!(*inner, EnvFileError::Parse { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_is_reserved() {
    let prefixes = vec!["VITE_".to_string(), String::new()];
    assert!(is_reserved("VITE_URL", &prefixes));
    assert!(!is_reserved("vite_url", &prefixes));
    assert!(!is_reserved("URL", &prefixes));
    assert!(!is_reserved("URL", &[]));
}

// =============================================================================
// EnvMap JSON
// =============================================================================

#[test]
fn test_coerced_json() {
    let env: EnvMap = [("PORT", "8080"), ("DEBUG", "true"), ("NAME", "app")]
        .into_iter()
        .collect();
    insta::assert_snapshot!(
        env.to_coerced_json().to_string(),
        @r#"{"PORT":8080,"DEBUG":true,"NAME":"app"}"#
    );
}

#[test]
fn test_placeholder_json() {
    let env: EnvMap = [("PORT", "8080"), ("API_URL", "x")].into_iter().collect();
    insta::assert_snapshot!(
        env.to_placeholder_json().to_string(),
        @r#"{"PORT":"$PORT","API_URL":"$API_URL"}"#
    );
}

#[test]
fn test_raw_serialize() {
    let env: EnvMap = [("PORT", "8080")].into_iter().collect();
    insta::assert_snapshot!(serde_json::to_string(&env).unwrap(), @r#"{"PORT":"8080"}"#);
}

// =============================================================================
// Value inference
// =============================================================================

#[test]
fn test_infer_kinds() {
    let cases = [
        ("42", ValueKind::Number),
        ("-3", ValueKind::Number),
        ("1.5", ValueKind::Number),
        ("1e3", ValueKind::Number),
        ("true", ValueKind::Boolean),
        ("false", ValueKind::Boolean),
        ("True", ValueKind::String),
        ("abc", ValueKind::String),
        ("0x10", ValueKind::String),
        ("", ValueKind::String),
        (" 42", ValueKind::String),
        ("-", ValueKind::String),
        ("1.2.3", ValueKind::String),
        ("Infinity", ValueKind::String),
        ("NaN", ValueKind::String),
    ];
    for (raw, expected) in cases {
        assert_eq!(infer(raw), expected, "infer({raw:?})");
    }
}

#[test]
fn test_coerce_values() {
    assert_eq!(coerce("42"), serde_json::json!(42));
    assert_eq!(coerce("1.5"), serde_json::json!(1.5));
    assert_eq!(coerce("true"), serde_json::json!(true));
    assert_eq!(coerce("false"), serde_json::json!(false));
    assert_eq!(coerce("abc"), serde_json::json!("abc"));
    assert_eq!(coerce("0x10"), serde_json::json!("0x10"));
    assert_eq!(coerce(""), serde_json::json!(""));
}

#[test]
fn test_coerce_large_unsigned() {
    assert_eq!(coerce("18446744073709551615").to_string(), "18446744073709551615");
}

#[test]
fn test_ts_type_names() {
    assert_eq!(ValueKind::Number.to_string(), "number");
    assert_eq!(ValueKind::Boolean.as_ts_type(), "boolean");
    assert_eq!(ValueKind::String.as_ts_type(), "string");
}

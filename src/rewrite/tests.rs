// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::borrow::Cow;

use super::{ReferenceRewriter, is_identifier, leading_identifier};

fn rewriter() -> ReferenceRewriter {
    ReferenceRewriter::new("import.meta.env", "window", "env", vec!["VITE_".to_string()])
}

#[test]
fn test_rewrites_single_reference() {
    insta::assert_snapshot!(
        rewriter().rewrite("const p = import.meta.env.PORT;").unwrap(),
        @"const p = window.env.PORT;"
    );
}

#[test]
fn test_reserved_reference_untouched() {
    assert_eq!(rewriter().rewrite("const u = import.meta.env.VITE_URL;"), None);
}

#[test]
fn test_mixed_references() {
    let code = "f(import.meta.env.VITE_URL, import.meta.env.API_URL, import.meta.env.VITE_X)";
    insta::assert_snapshot!(
        rewriter().rewrite(code).unwrap(),
        @"f(import.meta.env.VITE_URL, window.env.API_URL, import.meta.env.VITE_X)"
    );
}

#[test]
fn test_every_reference_rewritten() {
    let code = "a(import.meta.env.A);\nb(import.meta.env.B);\nc(import.meta.env.A + import.meta.env.C);";
    let rewritten = rewriter().rewrite(code).unwrap();
    assert_eq!(rewritten.matches("window.env.").count(), 4);
    assert!(!rewritten.contains("import.meta.env"));
}

#[test]
fn test_bracket_access_untouched() {
    assert_eq!(rewriter().rewrite(r#"import.meta.env["PORT"]"#), None);
}

#[test]
fn test_bare_marker_untouched() {
    assert_eq!(rewriter().rewrite("console.log(import.meta.env)"), None);
    assert_eq!(rewriter().rewrite("const { PORT } = import.meta.env;"), None);
}

#[test]
fn test_non_identifier_untouched() {
    assert_eq!(rewriter().rewrite("import.meta.env.-x"), None);
    assert_eq!(rewriter().rewrite("import.meta.env.1abc"), None);
    assert_eq!(rewriter().rewrite("import.meta.env."), None);
}

#[test]
fn test_truncated_marker_untouched() {
    assert_eq!(rewriter().rewrite("import.meta.en"), None);
    assert_eq!(rewriter().rewrite("import.meta.envX.PORT"), None);
}

#[test]
fn test_identifier_boundary() {
    insta::assert_snapshot!(
        rewriter().rewrite("import.meta.env.PORT+import.meta.env.HOST.length").unwrap(),
        @"window.env.PORT+window.env.HOST.length"
    );
}

#[test]
fn test_dollar_and_underscore_identifiers() {
    insta::assert_snapshot!(
        rewriter().rewrite("[import.meta.env.$x, import.meta.env._y]").unwrap(),
        @"[window.env.$x, window.env._y]"
    );
}

#[test]
fn test_unicode_identifier() {
    insta::assert_snapshot!(
        rewriter().rewrite("import.meta.env.größe; // ünïcode").unwrap(),
        @"window.env.größe; // ünïcode"
    );
}

#[test]
fn test_custom_name_and_global() {
    let rewriter = ReferenceRewriter::new("import.meta.env", "globalThis", "runtime", Vec::new());
    assert_eq!(rewriter.replacement(), "globalThis.runtime");
    insta::assert_snapshot!(
        rewriter.rewrite("x = import.meta.env.VITE_URL").unwrap(),
        @"x = globalThis.runtime.VITE_URL"
    );
}

#[test]
fn test_custom_marker() {
    let rewriter = ReferenceRewriter::new("process.env", "window", "env", Vec::new());
    insta::assert_snapshot!(
        rewriter.rewrite("if (process.env.NODE_ENV) {}").unwrap(),
        @"if (window.env.NODE_ENV) {}"
    );
}

#[test]
fn test_reuse_across_modules() {
    let rewriter = rewriter();
    let first = rewriter.rewrite("a = import.meta.env.A").unwrap();
    let unchanged = rewriter.rewrite("no references here");
    let second = rewriter.rewrite("b = import.meta.env.B").unwrap();
    assert_eq!(first, "a = window.env.A");
    assert_eq!(unchanged, None);
    assert_eq!(second, "b = window.env.B");
}

#[test]
fn test_rewrite_cow_borrows_unchanged() {
    let code = "let x = 1;";
    assert!(matches!(rewriter().rewrite_cow(code), Cow::Borrowed(_)));
}

#[test]
fn test_leading_identifier() {
    assert_eq!(leading_identifier("PORT;"), Some("PORT"));
    assert_eq!(leading_identifier("a\u{200D}b c"), Some("a\u{200D}b"));
    assert_eq!(leading_identifier("9x"), None);
    assert_eq!(leading_identifier(""), None);
}

#[test]
fn test_is_identifier() {
    assert!(is_identifier("env"));
    assert!(is_identifier("$runtime_env2"));
    assert!(!is_identifier("runtime-env"));
    assert!(!is_identifier(""));
}

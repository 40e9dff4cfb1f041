// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{DistOptions, run_build};
use crate::config::types::{BuildCommand, HostConfig, PluginOptions};
use crate::plugin::{Plugin, ResolvedPlugin};

const INDEX_HTML: &str = "<!doctype html>\n<html>\n<head>\n<title>app</title>\n</head>\n<body></body>\n</html>\n";

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).unwrap()
}

/// Project with `.env` files in the root and a built `dist/`.
fn project() -> TempDir {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let root = temp.path();
    write(root, ".env", "PORT=8080\nVITE_KEY=secret\n");
    write(root, "dist/index.html", INDEX_HTML);
    write(
        root,
        "dist/assets/main.js",
        "fetch(import.meta.env.API_URL + import.meta.env.PORT);\n",
    );
    write(root, "dist/assets/vendor.js", "export const v = 1;\n");
    write(root, "dist/assets/public.js", "const k = import.meta.env.VITE_KEY;\n");
    write(root, "dist/assets/style.css", "body { color: red; }\n");
    temp
}

fn plugin(root: &Path, options: PluginOptions) -> ResolvedPlugin {
    let host = HostConfig {
        root: root.to_path_buf(),
        command: BuildCommand::Build,
        ..HostConfig::default()
    };
    Plugin::new(options).resolve(&host).unwrap()
}

fn dist_options(root: &Path) -> DistOptions {
    DistOptions::builder().with_out_dir(root.join("dist")).build()
}

#[test]
fn test_run_build() {
    let temp = project();
    let root = temp.path();

    let report = run_build(&plugin(root, PluginOptions::default()), &dist_options(root)).unwrap();

    assert_eq!(report.modules_scanned, 3);
    assert_eq!(report.modules_rewritten, [PathBuf::from("assets/main.js")]);
    assert!(report.html_injected);
    assert_eq!(report.assets, ["env.js"]);

    insta::assert_snapshot!(
        read(root, "dist/assets/main.js"),
        @"fetch(window.env.API_URL + window.env.PORT);"
    );
    assert_eq!(read(root, "dist/assets/vendor.js"), "export const v = 1;\n");
    assert_eq!(
        read(root, "dist/assets/public.js"),
        "const k = import.meta.env.VITE_KEY;\n"
    );
    assert_eq!(read(root, "dist/env.js"), "export default {\"PORT\":8080};\n");
    insta::assert_snapshot!(read(root, "dist/index.html"), @r#"
    <!doctype html>
    <html>
    <head>
    <script type="module">
    import runtimeEnv from '/env.js';
    window.env = {...window.env, ...runtimeEnv};
    </script>
    <title>app</title>
    </head>
    <body></body>
    </html>
    "#);
}

#[test]
fn test_run_build_dry_run() {
    let temp = project();
    let root = temp.path();
    let options = DistOptions::builder()
        .with_out_dir(root.join("dist"))
        .with_dry_run(true)
        .build();

    let report = run_build(&plugin(root, PluginOptions::default()), &options).unwrap();

    assert_eq!(report.modules_rewritten.len(), 1);
    assert!(report.html_injected);
    assert!(read(root, "dist/assets/main.js").contains("import.meta.env.API_URL"));
    assert_eq!(read(root, "dist/index.html"), INDEX_HTML);
    assert!(!root.join("dist/env.js").exists());
}

#[test]
fn test_run_build_is_idempotent() {
    let temp = project();
    let root = temp.path();
    let plugin = plugin(root, PluginOptions::default());

    run_build(&plugin, &dist_options(root)).unwrap();
    let second = run_build(&plugin, &dist_options(root)).unwrap();

    // env.js from the first pass is not treated as a module.
    assert_eq!(second.modules_scanned, 3);
    assert!(second.modules_rewritten.is_empty());
    assert!(!second.html_injected);
    assert_eq!(read(root, "dist/index.html").matches("<script").count(), 1);
}

#[test]
fn test_run_build_template_and_no_html() {
    let temp = project();
    let root = temp.path();
    let options = PluginOptions::builder()
        .with_name("runtime")
        .with_envsubst_template(true)
        .with_inject_html(false)
        .build();

    let report = run_build(&plugin(root, options), &dist_options(root)).unwrap();

    assert!(!report.html_injected);
    assert_eq!(report.assets, ["runtime.js", "runtime.template.js"]);
    assert_eq!(read(root, "dist/index.html"), INDEX_HTML);
    assert_eq!(
        read(root, "dist/runtime.template.js"),
        "export default {\"PORT\":\"$PORT\"};\n"
    );
    assert!(read(root, "dist/assets/main.js").contains("window.runtime.PORT"));
}

#[test]
fn test_run_build_include_globs() {
    let temp = project();
    let root = temp.path();
    let options = DistOptions::builder()
        .with_out_dir(root.join("dist"))
        .with_include(vec!["assets/vendor*.js".to_string()])
        .build();

    let report = run_build(&plugin(root, PluginOptions::default()), &options).unwrap();

    assert_eq!(report.modules_scanned, 1);
    assert!(report.modules_rewritten.is_empty());
}

#[test]
fn test_run_build_invalid_glob() {
    let temp = project();
    let root = temp.path();
    let options = DistOptions::builder()
        .with_out_dir(root.join("dist"))
        .with_include(vec!["assets/{a".to_string()])
        .build();

    let err = run_build(&plugin(root, PluginOptions::default()), &options).unwrap_err();
    assert!(err.to_string().contains("invalid include glob"));
}

#[test]
fn test_run_build_missing_out_dir() {
    let temp = project();
    let root = temp.path();
    let options = DistOptions::builder().with_out_dir(root.join("missing")).build();

    assert!(run_build(&plugin(root, PluginOptions::default()), &options).is_err());
}

#[test]
fn test_run_build_without_html_entry() {
    let temp = project();
    let root = temp.path();
    std::fs::remove_file(root.join("dist/index.html")).unwrap();

    let report = run_build(&plugin(root, PluginOptions::default()), &dist_options(root)).unwrap();

    assert!(!report.html_injected);
    assert!(root.join("dist/env.js").exists());
}

// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Bundle, EmittedAsset, runtime_asset, template_asset};
use crate::env::EnvMap;

fn env() -> EnvMap {
    [("PORT", "8080"), ("DEBUG", "true"), ("NAME", "app")]
        .into_iter()
        .collect()
}

#[test]
fn test_runtime_asset() {
    let asset = runtime_asset("env", &env());
    assert_eq!(asset.file_name(), "env.js");
    assert_eq!(
        asset.source(),
        "export default {\"PORT\":8080,\"DEBUG\":true,\"NAME\":\"app\"};\n"
    );
}

#[test]
fn test_template_asset() {
    let asset = template_asset("runtime", &env());
    assert_eq!(asset.file_name(), "runtime.template.js");
    assert_eq!(
        asset.source(),
        "export default {\"PORT\":\"$PORT\",\"DEBUG\":\"$DEBUG\",\"NAME\":\"$NAME\"};\n"
    );
}

#[test]
fn test_empty_env_asset() {
    let asset = runtime_asset("env", &EnvMap::new());
    assert_eq!(asset.source(), "export default {};\n");
}

#[test]
fn test_emit_file_replaces_same_name() {
    let mut bundle = Bundle::new();
    bundle.emit_file(EmittedAsset::new("env.js", "old"));
    bundle.emit_file(EmittedAsset::new("other.js", "x"));
    bundle.emit_file(EmittedAsset::new("env.js", "new"));

    assert_eq!(bundle.assets().len(), 2);
    assert_eq!(bundle.get("env.js").map(EmittedAsset::source), Some("new"));
    assert!(bundle.get("missing.js").is_none());
}

#[test]
fn test_write_to() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let mut bundle = Bundle::new();
    bundle.emit_file(runtime_asset("env", &env()));
    bundle.emit_file(EmittedAsset::new("nested/dir/a.js", "a"));

    bundle.write_to(temp.path()).unwrap();

    let written = std::fs::read_to_string(temp.path().join("env.js")).unwrap();
    assert!(written.starts_with("export default {"));
    assert_eq!(
        std::fs::read_to_string(temp.path().join("nested/dir/a.js")).unwrap(),
        "a"
    );
}

#[test]
fn test_write_to_replaces_stale_asset() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(temp.path().join("env.js"), "export default {\"OLD\":1};\n").unwrap();
    let mut bundle = Bundle::new();
    bundle.emit_file(EmittedAsset::new("env.js", "export default {};\n"));

    bundle.write_to(temp.path()).unwrap();

    assert_eq!(
        std::fs::read_to_string(temp.path().join("env.js")).unwrap(),
        "export default {};\n"
    );
    let entries: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, ["env.js"]);
}

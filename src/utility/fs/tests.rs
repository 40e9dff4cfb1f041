// runtime-env: Runtime environment injection for web bundles
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use tempfile::TempDir;

use super::walk::{WalkOptions, collect_files};
use super::write_atomic;
use crate::error::{FsError, RuntimeEnvError};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn relative_files(temp: &TempDir, options: &WalkOptions) -> Vec<String> {
    collect_files(temp.path(), options)
        .unwrap()
        .files()
        .iter()
        .map(|p| {
            p.strip_prefix(temp.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_collect_files_sorted() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("assets/js")).unwrap();
    std::fs::write(temp.path().join("index.html"), "").unwrap();
    std::fs::write(temp.path().join("assets/js/b.js"), "").unwrap();
    std::fs::write(temp.path().join("assets/a.css"), "").unwrap();

    let files = relative_files(&temp, &WalkOptions::default());

    assert_eq!(files, ["assets/a.css", "assets/js/b.js", "index.html"]);
}

#[test]
fn test_collect_files_skip_dirs() {
    let temp = temp_dir();
    std::fs::create_dir(temp.path().join("node_modules")).unwrap();
    std::fs::write(temp.path().join("node_modules/package.json"), "").unwrap();
    std::fs::write(temp.path().join("index.js"), "").unwrap();

    let files = relative_files(&temp, &WalkOptions::for_output_dir());

    assert_eq!(files, ["index.js"]);
}

#[test]
fn test_collect_files_skips_hidden() {
    let temp = temp_dir();
    std::fs::create_dir(temp.path().join(".vite")).unwrap();
    std::fs::write(temp.path().join(".vite/manifest.js"), "").unwrap();
    std::fs::write(temp.path().join(".hidden.js"), "").unwrap();
    std::fs::write(temp.path().join("shown.js"), "").unwrap();

    assert_eq!(relative_files(&temp, &WalkOptions::default()), ["shown.js"]);
}

#[test]
fn test_collect_files_ignores_gitignore() {
    let temp = temp_dir();
    std::fs::write(temp.path().join(".gitignore"), "*.js\n").unwrap();
    std::fs::write(temp.path().join(".ignore"), "main.js\n").unwrap();
    std::fs::write(temp.path().join("main.js"), "").unwrap();

    assert_eq!(relative_files(&temp, &WalkOptions::default()), ["main.js"]);
}

#[test]
fn test_collect_files_many() {
    let temp = temp_dir();
    for i in 0..1500 {
        std::fs::write(temp.path().join(format!("chunk-{i:04}.js")), "").unwrap();
    }

    let result = collect_files(temp.path(), &WalkOptions::default()).unwrap();

    assert_eq!(result.files().len(), 1500);
    assert_eq!(result.error_count(), 0);
}

#[test]
fn test_collect_files_missing_root() {
    let temp = temp_dir();
    let missing = temp.path().join("dist");

    let err = collect_files(&missing, &WalkOptions::default()).unwrap_err();

    match err.downcast_ref::<FsError>() {
        Some(FsError::NotFound(path)) => assert_eq!(path, &missing),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_write_atomic_replaces() {
    let temp = temp_dir();
    let path = temp.path().join("main.js");
    std::fs::write(&path, "old").unwrap();

    write_atomic(&path, "new").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    let leftovers: Vec<PathBuf> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(leftovers, [path]);
}

#[test]
fn test_write_atomic_creates() {
    let temp = temp_dir();
    let path = temp.path().join("new.js");

    write_atomic(&path, "fresh").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
}

#[cfg(unix)]
#[test]
fn test_write_atomic_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = temp_dir();
    let path = temp.path().join("main.js");
    std::fs::write(&path, "old").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    write_atomic(&path, "new").unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

#[test]
fn test_write_atomic_missing_dir() {
    let temp = temp_dir();
    let path = temp.path().join("missing/main.js");
    match write_atomic(&path, "x") {
        Err(RuntimeEnvError::Fs(inner)) => assert!(matches!(*inner, FsError::IoError { .. })),
        other => panic!("unexpected result: {other:?}"),
    }
}

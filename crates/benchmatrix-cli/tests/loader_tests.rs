//! Tests for reading and merging catalog and runner documents.

use benchmatrix_cli::loader::{load_config_files, load_runner_file};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn merges_files_in_order() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.yaml", "alpha: { model: a }\nbeta: { model: b }\n");
    let b = write(&dir, "b.yaml", "gamma: { model: c }\n");

    let merged = load_config_files(&[a, b]).unwrap();
    let keys: Vec<&str> =
        merged.as_mapping().unwrap().keys().map(|k| k.as_str().unwrap()).collect();
    assert_eq!(keys, ["alpha", "beta", "gamma"]);
}

#[test]
fn duplicate_keys_across_files_are_rejected() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.yaml", "zeta: 1\nalpha: 2\nbeta: 3\n");
    let b = write(&dir, "b.yaml", "zeta: 4\nalpha: 5\nomega: 6\n");

    let err = load_config_files(&[&a, &b]).unwrap_err().to_string();
    assert_eq!(
        err,
        format!("Duplicate configuration keys found in '{}': alpha, zeta", b.display())
    );
}

#[test]
fn missing_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml");
    let err = load_config_files(&[&missing]).unwrap_err().to_string();
    assert_eq!(err, format!("Input file '{}' does not exist.", missing.display()));
}

#[test]
fn non_mapping_config_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let list = write(&dir, "list.yaml", "- a\n- b\n");
    let err = load_config_files(&[&list]).unwrap_err().to_string();
    assert!(err.contains("must contain a mapping, got list"), "{err}");

    let empty = write(&dir, "empty.yaml", "");
    let err = load_config_files(&[&empty]).unwrap_err().to_string();
    assert!(err.contains("got null"), "{err}");
}

#[test]
fn malformed_yaml_names_the_file() {
    let dir = TempDir::new().unwrap();
    let bad = write(&dir, "bad.yaml", "key: [unclosed\n");
    let err = load_config_files(&[&bad]).unwrap_err();
    assert!(err.to_string().contains("bad.yaml"), "{err:#}");
}

#[test]
fn runner_file_loads_as_is() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "runners.yaml", "h200: [h200-nv_0]\n");
    let doc = load_runner_file(&path).unwrap();
    assert_eq!(doc["h200"][0].as_str(), Some("h200-nv_0"));
}

#[test]
fn missing_runner_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("runners.yaml");
    let err = load_runner_file(&missing).unwrap_err().to_string();
    assert_eq!(err, format!("Runner config file '{}' does not exist.", missing.display()));
}

#[test]
fn duplicate_non_string_keys_are_rendered() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.yaml", "7: x\nalpha: 1\n");
    let b = write(&dir, "b.yaml", "7: y\n");

    let err = load_config_files(&[&a, &b]).unwrap_err().to_string();
    assert_eq!(err, format!("Duplicate configuration keys found in '{}': 7", b.display()));
}

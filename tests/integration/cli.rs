//! The `sphindex` binary: exit codes and plain output.

use super::common::{fixture_path, FIXTURE_TEXT};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_sphindex(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sphindex"))
        .args(args)
        .env_remove("SPHINDEX_INDEX")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run sphindex")
}

fn on_index(command: &str, path: &Path) -> Output {
    run_sphindex(&[command, "-f", path.to_str().expect("non-UTF-8 temp path")])
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Write the fixture with one textual substitution into `dir`.
fn patched_fixture(dir: &TempDir, from: &str, to: &str) -> PathBuf {
    assert!(FIXTURE_TEXT.contains(from), "fixture lacks {:?}", from);
    let path = dir.path().join("searchindex.js");
    fs::write(&path, FIXTURE_TEXT.replacen(from, to, 1)).unwrap();
    path
}

#[test]
fn test_verify_exit_codes() {
    let ok = on_index("verify", &fixture_path());
    assert_eq!(ok.status.code(), Some(0));
    assert!(stdout(&ok).contains("9 documents"));

    let dir = TempDir::new().unwrap();
    let dangling = patched_fixture(&dir, "kafka:3", "kafka:42");
    let failed = on_index("verify", &dangling);
    assert_eq!(failed.status.code(), Some(1));
    let out = stdout(&failed);
    assert!(out.contains("FAIL"), "{}", out);
    assert!(out.contains("kafka"), "{}", out);
}

#[test]
fn test_stale_exit_codes() {
    let current = on_index("stale", &fixture_path());
    assert_eq!(current.status.code(), Some(0));
    assert!(stdout(&current).contains("is current"));

    let dir = TempDir::new().unwrap();
    let bumped = patched_fixture(&dir, "sphinx:56", "sphinx:57");
    let stale = on_index("stale", &bumped);
    assert_eq!(stale.status.code(), Some(1));
    let out = stdout(&stale);
    assert!(out.contains("is stale"), "{}", out);
    assert!(out.contains("57 -> 56"), "{}", out);
}

#[test]
fn test_inspect_always_succeeds() {
    let dir = TempDir::new().unwrap();
    let bumped = patched_fixture(&dir, "sphinx:56", "sphinx:57");
    assert_eq!(on_index("inspect", &bumped).status.code(), Some(0));

    let dir = TempDir::new().unwrap();
    let dangling = patched_fixture(&dir, "kafka:3", "kafka:42");
    let output = on_index("inspect", &dangling);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("CONTENTS"));
}

#[test]
fn test_no_color_output_is_plain() {
    let output = Command::new(env!("CARGO_BIN_EXE_sphindex"))
        .args(["inspect", "-f"])
        .arg(fixture_path())
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run sphindex");
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains('┌'));
    assert!(!out.contains('\x1b'), "escape codes with NO_COLOR set");
}

#[test]
fn test_piped_output_is_plain() {
    let output = on_index("inspect", &fixture_path());
    assert!(!stdout(&output).contains('\x1b'));

    let verify = on_index("verify", &fixture_path());
    assert!(!stdout(&verify).contains('\x1b'));
}

#[test]
fn test_search_json() {
    let path = fixture_path();
    let output = run_sphindex(&["search", "kafka", "--json", "-f", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let hits: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(hits[0]["docname"], "sites/development");
    assert_eq!(hits.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_missing_index_is_an_error() {
    let dir = TempDir::new().unwrap();
    let output = on_index("verify", &dir.path().join("nope.js"));
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

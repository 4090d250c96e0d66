//! Incremental builds: start from the previous `searchindex.js`.

use super::common::{make_doc, write_build_input};
use sphindex::build::{run_build, BuildOptions, STATE_FILENAME};
use sphindex::{load_index, save_index, EnvVersion, IndexBuilder};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const INCREMENTAL: BuildOptions = BuildOptions { incremental: true };

fn set_mtime(path: &Path, time: SystemTime) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

fn long_ago() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000)
}

#[test]
fn test_incremental_drops_documents_missing_from_manifest() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_build_input(
        input.path(),
        &[
            make_doc("a", "Alpha", "kafka cluster"),
            make_doc("b", "Beta", "docker image"),
        ],
    );
    run_build(input.path(), output.path(), &BuildOptions::default()).unwrap();

    fs::remove_dir_all(input.path()).unwrap();
    fs::create_dir_all(input.path()).unwrap();
    write_build_input(input.path(), &[make_doc("a", "Alpha", "kafka cluster")]);
    let summary = run_build(input.path(), output.path(), &INCREMENTAL).unwrap();

    assert_eq!(summary.docs, 1);
    let index = load_index(&summary.output).unwrap();
    assert_eq!(index.docnames, vec!["a"]);
    assert!(index.term("docker").is_none());
    assert!(index.term("kafka").is_some());
}

#[test]
fn test_incremental_matches_full_rebuild() {
    let input = TempDir::new().unwrap();
    let incremental_out = TempDir::new().unwrap();
    let full_out = TempDir::new().unwrap();

    write_build_input(input.path(), &[make_doc("a", "Alpha", "first draft")]);
    run_build(input.path(), incremental_out.path(), &BuildOptions::default()).unwrap();

    let docs = [
        make_doc("a", "Alpha", "second draft"),
        make_doc("c", "Gamma", "brand new page"),
    ];
    write_build_input(input.path(), &docs);
    let incremental = run_build(input.path(), incremental_out.path(), &INCREMENTAL).unwrap();
    let full = run_build(input.path(), full_out.path(), &BuildOptions::default()).unwrap();

    assert_eq!(
        fs::read_to_string(&incremental.output).unwrap(),
        fs::read_to_string(&full.output).unwrap()
    );
}

#[test]
fn test_incremental_keeps_documents_with_objects() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let mut api = make_doc("api", "API", "reference");
    api.objects = vec![sphindex::build::ObjectInput {
        name: "pkg.run".into(),
        domain: "py".into(),
        objtype: "function".into(),
        label: Some("Python function".into()),
        priority: 1,
        anchor: None,
    }];
    write_build_input(input.path(), &[api]);
    let first = run_build(input.path(), output.path(), &BuildOptions::default()).unwrap();
    let before = fs::read_to_string(&first.output).unwrap();

    let second = run_build(input.path(), output.path(), &INCREMENTAL).unwrap();
    assert_eq!(second.objects, 1);
    assert_eq!(fs::read_to_string(&second.output).unwrap(), before);
}

#[test]
fn test_stale_previous_index_is_rebuilt() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let mut old_env = EnvVersion::sphinx3();
    old_env.insert("sphinx", 55);
    let mut builder = IndexBuilder::new(old_env);
    builder.add_document(&make_doc("gone", "Gone", "obsolete words"));
    save_index(output.path().join("searchindex.js"), &builder.freeze()).unwrap();

    write_build_input(input.path(), &[make_doc("gone", "Gone", "fresh words")]);
    let summary = run_build(input.path(), output.path(), &INCREMENTAL).unwrap();

    let index = load_index(&summary.output).unwrap();
    assert_eq!(index.envversion, EnvVersion::sphinx3());
    assert!(index.term("obsolet").is_none());
    assert!(index.term("fresh").is_some());
}

#[test]
fn test_incremental_without_previous_index() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_build_input(input.path(), &[make_doc("a", "Alpha", "text")]);

    let summary = run_build(input.path(), output.path(), &INCREMENTAL).unwrap();
    assert_eq!(summary.docs, 1);
}

#[test]
fn test_unchanged_documents_are_not_read_again() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_build_input(
        input.path(),
        &[
            make_doc("a", "Alpha", "first draft"),
            make_doc("b", "Beta", "docker image"),
        ],
    );
    set_mtime(&input.path().join("a.json"), long_ago());
    set_mtime(&input.path().join("b.json"), long_ago());
    run_build(input.path(), output.path(), &BuildOptions::default()).unwrap();

    // b.json is unreadable now, but older than the index: it must be skipped.
    fs::write(input.path().join("b.json"), "not json").unwrap();
    set_mtime(&input.path().join("b.json"), long_ago());
    fs::write(
        input.path().join("a.json"),
        serde_json::to_string(&make_doc("a", "Alpha", "second version")).unwrap(),
    )
    .unwrap();
    set_mtime(
        &input.path().join("a.json"),
        SystemTime::now() + Duration::from_secs(3600),
    );

    let summary = run_build(input.path(), output.path(), &INCREMENTAL).unwrap();
    assert_eq!((summary.loaded, summary.reused), (1, 1));

    let index = load_index(&summary.output).unwrap();
    assert_eq!(index.docnames, vec!["a", "b"]);
    assert!(index.term("docker").is_some());
    assert!(index.term("version").is_some());
    assert!(index.term("draft").is_none());
}

#[test]
fn test_full_build_reads_everything() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_build_input(input.path(), &[make_doc("a", "Alpha", "text")]);
    set_mtime(&input.path().join("a.json"), long_ago());
    run_build(input.path(), output.path(), &BuildOptions::default()).unwrap();

    let summary = run_build(input.path(), output.path(), &BuildOptions::default()).unwrap();
    assert_eq!((summary.loaded, summary.reused), (1, 0));
}

#[test]
fn test_missing_build_state_reads_everything() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_build_input(
        input.path(),
        &[make_doc("a", "Alpha", "text"), make_doc("b", "Beta", "more")],
    );
    set_mtime(&input.path().join("a.json"), long_ago());
    set_mtime(&input.path().join("b.json"), long_ago());
    run_build(input.path(), output.path(), &BuildOptions::default()).unwrap();
    fs::remove_file(output.path().join(STATE_FILENAME)).unwrap();

    let summary = run_build(input.path(), output.path(), &INCREMENTAL).unwrap();
    assert_eq!((summary.loaded, summary.reused), (2, 0));
    assert_eq!(summary.docs, 2);
}

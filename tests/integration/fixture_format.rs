//! Parsing and re-emitting the Sphinx fixture.

use super::common::{fixture_path, FIXTURE, FIXTURE_TEXT};
use sphindex::{dump_index, load_index, parse_index, save_index, DocId, EnvVersion, PostingList};
use tempfile::TempDir;

#[test]
fn test_fixture_document_table() {
    assert_eq!(FIXTURE.doc_count(), 9);
    assert_eq!(FIXTURE.docnames[0], "index");
    assert_eq!(FIXTURE.docnames[8], "sites/user-management");
    assert_eq!(FIXTURE.filenames[2], "sites/api-gateway.rst");
    assert_eq!(FIXTURE.titles[0], "Welcome to MDS Server\u{2019}s documentation!");
    assert_eq!(FIXTURE.titles[8], "Users");
}

#[test]
fn test_fixture_postings() {
    assert_eq!(
        FIXTURE.term("addit").map(|p| p.docs().collect::<Vec<_>>()),
        Some(vec![DocId(1), DocId(7)])
    );
    assert_eq!(FIXTURE.term("kafka"), Some(&PostingList::One(DocId(3))));
    // Capitalized words stay as written when their stem is a stop word.
    assert!(FIXTURE.term("The").is_some());
    assert!(FIXTURE.title_term("If").is_some());
    assert_eq!(FIXTURE.title_term("gatewai"), Some(&PostingList::One(DocId(2))));
}

#[test]
fn test_fixture_reserved_and_numeric_keys() {
    assert!(FIXTURE.term("default").is_some());
    assert!(FIXTURE.term("return").is_some());
    assert!(FIXTURE.term("null").is_some());
    assert_eq!(FIXTURE.term("401"), Some(&PostingList::One(DocId(4))));
}

#[test]
fn test_fixture_environment() {
    assert_eq!(FIXTURE.envversion, EnvVersion::sphinx3());
    assert_eq!(FIXTURE.envversion.core(), Some(56));
}

#[test]
fn test_fixture_has_no_objects() {
    assert_eq!(FIXTURE.object_count(), 0);
    assert!(FIXTURE.objnames.is_empty());
    assert!(FIXTURE.objtypes.is_empty());
}

#[test]
fn test_dump_reproduces_sphinx_output_byte_for_byte() {
    let dumped = dump_index(&FIXTURE).unwrap();
    assert_eq!(dumped, *FIXTURE_TEXT);
}

#[test]
fn test_dump_escapes_non_ascii() {
    let dumped = dump_index(&FIXTURE).unwrap();
    assert!(dumped.is_ascii());
    assert!(dumped.contains("Server\\u2019s"));
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("searchindex.js");
    save_index(&path, &FIXTURE).unwrap();
    let loaded = load_index(&path).unwrap();
    assert_eq!(loaded, *FIXTURE);
}

#[test]
fn test_load_fixture_from_disk() {
    let loaded = load_index(fixture_path()).unwrap();
    assert_eq!(loaded.doc_count(), 9);
}

#[test]
fn test_bare_object_without_call_wrapper() {
    let text = FIXTURE_TEXT
        .strip_prefix("Search.setIndex(")
        .and_then(|s| s.strip_suffix(')'))
        .unwrap();
    assert_eq!(parse_index(text).unwrap(), *FIXTURE);
}

#[test]
fn test_truncated_fixture_is_rejected() {
    let truncated = &FIXTURE_TEXT[..FIXTURE_TEXT.len() / 2];
    assert!(parse_index(truncated).is_err());
}

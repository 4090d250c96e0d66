//! End-to-end tests for `run_build`.

use super::common::{make_doc, write_build_input};
use sphindex::build::{run_build, BuildOptions};
use sphindex::{load_index, lookup, search, verify_index, DocId, Query, Scorer, WellFormedIndex};
use std::fs;
use tempfile::TempDir;

fn sample_docs() -> Vec<sphindex::Document> {
    let mut gateway = make_doc(
        "sites/api-gateway",
        "API Gateway",
        "Every request passes the gateway. Tokens are checked here.",
    );
    gateway.headings = vec!["Authentication".to_string()];
    vec![
        make_doc("index", "Welcome", "Start with the gateway documentation."),
        gateway,
        make_doc("sites/groups", "Groups", "Groups collect users. Request a token first."),
    ]
}

#[test]
fn test_run_build_e2e_basic() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input");
    let output = temp_dir.path().join("output");
    fs::create_dir_all(&input).unwrap();
    write_build_input(&input, &sample_docs());

    let summary = run_build(&input, &output, &BuildOptions::default()).unwrap();
    assert_eq!(summary.docs, 3);
    assert_eq!(summary.output, output.join("searchindex.js"));
    assert_eq!(summary.bytes, fs::metadata(&summary.output).unwrap().len() as usize);

    let text = fs::read_to_string(&summary.output).unwrap();
    assert!(text.starts_with("Search.setIndex({docnames:[\"index\",\"sites/api-gateway\",\"sites/groups\"]"));
    assert!(text.ends_with("})"));

    let index = load_index(&summary.output).unwrap();
    assert!(verify_index(&index).is_ok());
    assert_eq!(index.filenames[1], "sites/api-gateway.rst");
    assert_eq!(summary.terms, index.terms.len());
}

#[test]
fn test_built_index_contents() {
    let temp_dir = TempDir::new().unwrap();
    write_build_input(temp_dir.path(), &sample_docs());
    let summary = run_build(temp_dir.path(), temp_dir.path(), &BuildOptions::default()).unwrap();
    let index = load_index(&summary.output).unwrap();

    // Title words and headings are title terms.
    assert_eq!(lookup(&index, "gatewai"), vec![DocId(0), DocId(1)]);
    assert!(index.title_term("authent").is_some());
    // A title term is not repeated as a body term of the same page.
    assert!(index.term("gatewai").is_some_and(|p| !p.contains(DocId(1))));
    // Stop words are dropped.
    assert!(index.term("the").is_none());
    // Single-page postings are bare integers.
    assert!(fs::read_to_string(&summary.output).unwrap().contains("welcom:0"));
}

#[test]
fn test_built_index_is_searchable() {
    let temp_dir = TempDir::new().unwrap();
    write_build_input(temp_dir.path(), &sample_docs());
    let summary = run_build(temp_dir.path(), temp_dir.path(), &BuildOptions::default()).unwrap();
    let index = WellFormedIndex::new(load_index(&summary.output).unwrap()).unwrap();

    let results = search(&index, &Query::parse("token request"), &Scorer::default());
    let names: Vec<&str> = results.iter().map(|r| r.docname.as_str()).collect();
    assert_eq!(names, vec!["sites/api-gateway", "sites/groups"]);
}

#[test]
fn test_empty_manifest_writes_empty_index() {
    let temp_dir = TempDir::new().unwrap();
    write_build_input(temp_dir.path(), &[]);
    let summary = run_build(temp_dir.path(), temp_dir.path(), &BuildOptions::default()).unwrap();
    assert_eq!(summary.docs, 0);
    let index = load_index(&summary.output).unwrap();
    assert_eq!(index.doc_count(), 0);
    assert!(index.terms.is_empty());
}

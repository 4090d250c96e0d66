//! Object search on an index built from documents with documented objects.

use super::common::{docnames, make_doc};
use sphindex::build::ObjectInput;
use sphindex::{search, verify_index, IndexBuilder, MatchKind, Query, Scorer, WellFormedIndex};
use sphindex::{EnvVersion, SearchResult};

fn object(name: &str, objtype: &str, label: &str, priority: i32, anchor: Option<&str>) -> ObjectInput {
    ObjectInput {
        name: name.to_string(),
        domain: "py".to_string(),
        objtype: objtype.to_string(),
        label: Some(label.to_string()),
        priority,
        anchor: anchor.map(str::to_string),
    }
}

fn api_index() -> WellFormedIndex {
    let mut api = make_doc("api", "API Reference", "Functions for reading index files.");
    api.objects = vec![
        object("sphindex", "module", "Python module", 0, Some("module-sphindex")),
        object("sphindex.format.parse_index", "function", "Python function", 1, None),
        object("sphindex.format.dump_index", "function", "Python function", 1, None),
        object("sphindex.testing.fixture", "function", "Python function", -1, None),
    ];
    let guide = make_doc("guide", "User Guide", "Install sphindex before anything else.");

    let mut builder = IndexBuilder::new(EnvVersion::sphinx3());
    builder.add_document(&api);
    builder.add_document(&guide);
    let index = builder.freeze();
    assert!(verify_index(&index).is_ok());
    WellFormedIndex::new(index).unwrap()
}

fn run(text: &str) -> Vec<SearchResult> {
    search(&api_index(), &Query::parse(text), &Scorer::default())
}

#[test]
fn test_exact_name_with_priority_bonus() {
    let results = run("parse_index");
    assert_eq!(results.len(), 1);
    let hit = &results[0];
    assert_eq!(hit.kind, MatchKind::Object);
    assert_eq!(hit.title, "sphindex.format.parse_index");
    assert_eq!(hit.score, 16);
    assert_eq!(hit.anchor, "sphindex.format.parse_index");
    assert_eq!(hit.description, "Python function, in API Reference");
    assert_eq!(hit.docname, "api");
}

#[test]
fn test_objects_and_pages_are_ranked_together() {
    let results = run("sphindex");
    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "sphindex",
            "sphindex.format.dump_index",
            "sphindex.format.parse_index",
            "User Guide",
        ]
    );
    let scores: Vec<i32> = results.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![26, 5, 5, 5]);
    assert_eq!(results[0].anchor, "module-sphindex");
    assert_eq!(results[3].kind, MatchKind::Page);
}

#[test]
fn test_partial_name_match() {
    let results = run("parse");
    assert_eq!(results.len(), 1);
    // partial 6 + priority 1 bonus 5
    assert_eq!(results[0].score, 11);
}

#[test]
fn test_hidden_objects_are_not_indexed() {
    assert!(run("fixture").is_empty());
}

#[test]
fn test_other_words_narrow_object_hits() {
    let results = run("index function");
    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    // The module also contains "index" but its haystack lacks "function".
    // Both words are body terms of the api page, which matches as a page.
    assert_eq!(
        titles,
        vec![
            "sphindex.format.dump_index",
            "sphindex.format.parse_index",
            "API Reference",
        ]
    );
    let scores: Vec<i32> = results.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![11, 11, 5]);
    assert_eq!(docnames(&results), vec!["api", "api", "api"]);
}

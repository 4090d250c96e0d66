//! Scorer overrides loaded from JSON.

use super::common::{docnames, fixture_index};
use sphindex::{search, Error, Query, Scorer};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_override_changes_ranking() {
    let scorer = Scorer::from_json(r#"{ "title": 1 }"#).unwrap();
    assert_eq!(scorer.term, Scorer::default().term);

    let results = search(&fixture_index(), &Query::parse("api"), &scorer);
    assert_eq!(
        docnames(&results),
        vec![
            "sites/operations",
            "sites/user-management",
            "index",
            "sites/api-gateway",
            "sites/general-http-api",
        ]
    );
}

#[test]
fn test_scorer_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scorer.json");
    fs::write(&path, r#"{ "term": 50, "objPrio": { "0": 1 } }"#).unwrap();

    let scorer = Scorer::from_file(&path).unwrap();
    assert_eq!(scorer.term, 50);
    assert_eq!(scorer.priority_bonus(0), 1);
    assert_eq!(scorer.priority_bonus(1), 0);

    let results = search(&fixture_index(), &Query::parse("kafka"), &scorer);
    assert_eq!(results[0].score, 50);
}

#[test]
fn test_bad_scorer_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scorer.json");
    fs::write(&path, r#"{ "term": "high" }"#).unwrap();
    assert!(matches!(Scorer::from_file(&path), Err(Error::Schema(_))));
    assert!(matches!(
        Scorer::from_file(dir.path().join("missing.json")),
        Err(Error::Io { .. })
    ));
}

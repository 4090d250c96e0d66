//! Page search over the Sphinx fixture with the default scorer.

use super::common::{docnames, fixture_index};
use sphindex::{search, MatchKind, Query, Scorer, SearchResult};

fn run(text: &str) -> Vec<SearchResult> {
    search(&fixture_index(), &Query::parse(text), &Scorer::default())
}

#[test]
fn test_single_body_term() {
    let results = run("kafka");
    assert_eq!(docnames(&results), vec!["sites/development"]);
    assert_eq!(results[0].score, 5);
    assert_eq!(results[0].title, "Development");
    assert_eq!(results[0].filename, "sites/development.rst");
    assert_eq!(results[0].kind, MatchKind::Page);
    assert!(results[0].anchor.is_empty());
}

#[test]
fn test_title_hits_rank_first_then_title_order() {
    let results = run("API");
    assert_eq!(
        docnames(&results),
        vec![
            "sites/api-gateway",
            "sites/general-http-api",
            "sites/operations",
            "sites/user-management",
            "index",
        ]
    );
    let scores: Vec<i32> = results.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![15, 15, 5, 5, 5]);
}

#[test]
fn test_query_words_are_stemmed() {
    let results = run("gateway");
    assert_eq!(
        docnames(&results),
        vec!["sites/api-gateway", "sites/general-http-api", "index"]
    );
    assert_eq!(results[0].score, 15);
}

#[test]
fn test_every_required_word_must_hit() {
    let results = run("kafka docker");
    assert_eq!(docnames(&results), vec!["sites/development"]);
    // docker is a title term of the page, kafka a body term: best wins.
    assert_eq!(results[0].score, 15);
}

#[test]
fn test_excluded_word_removes_pages() {
    let results = run("gateway -index");
    assert_eq!(docnames(&results), vec!["sites/api-gateway"]);
}

#[test]
fn test_unknown_word_empties_the_result() {
    assert!(run("zzyzx").is_empty());
    assert!(run("kafka zzyzx").is_empty());
}

#[test]
fn test_numbers_are_not_page_terms() {
    // "200" and "401" are keys of `terms`, but a bare number is never required.
    assert!(run("200").is_empty());
    assert!(run("401").is_empty());
    assert_eq!(docnames(&run("kafka 200")), vec!["sites/development"]);
    assert_eq!(run("kafka -200"), run("kafka"));
}

#[test]
fn test_stop_words_alone_find_nothing() {
    assert!(run("the and of").is_empty());
    assert!(run("").is_empty());
}

#[test]
fn test_results_are_unique() {
    let results = run("user group");
    let mut seen = docnames(&results);
    let total = seen.len();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), total);
    assert!(!results.is_empty());
}

#[test]
fn test_search_is_deterministic() {
    let first = run("permission user");
    for _ in 0..5 {
        assert_eq!(run("permission user"), first);
    }
}

//! Dictionary probes without stemming or scoring.

use super::common::FIXTURE;
use sphindex::text::stem_lower;
use sphindex::{lookup, DocId};

fn ids(docs: &[u32]) -> Vec<DocId> {
    docs.iter().map(|&d| DocId(d)).collect()
}

#[test]
fn test_lookup_merges_terms_and_titleterms() {
    // terms: api [0, 6, 8], titleterms: api [2, 4]
    assert_eq!(lookup(&FIXTURE, "api"), ids(&[0, 2, 4, 6, 8]));
}

#[test]
fn test_lookup_deduplicates() {
    // address: terms [0, 3], titleterms [1, 7]; book: terms [0, 5], titleterms [1, 7]
    assert_eq!(lookup(&FIXTURE, "address"), ids(&[0, 1, 3, 7]));
    assert_eq!(lookup(&FIXTURE, "book"), ids(&[0, 1, 5, 7]));
}

#[test]
fn test_lookup_is_exact_and_case_sensitive() {
    assert!(lookup(&FIXTURE, "gateway").is_empty());
    assert_eq!(lookup(&FIXTURE, "gatewai"), ids(&[0, 2, 4]));
    assert!(lookup(&FIXTURE, "if").is_empty());
    // Every page: eight through terms, "Development" through its title.
    assert_eq!(lookup(&FIXTURE, "If").len(), 9);
}

#[test]
fn test_lookup_after_stemming() {
    assert_eq!(lookup(&FIXTURE, &stem_lower("Gateway")), ids(&[0, 2, 4]));
    assert_eq!(lookup(&FIXTURE, &stem_lower("Permissions")).len(), 8);
}

#[test]
fn test_unknown_term() {
    assert!(lookup(&FIXTURE, "").is_empty());
    assert!(lookup(&FIXTURE, "zzyzx").is_empty());
}

//! Summary statistics over the fixture.

use super::common::{FIXTURE, FIXTURE_TEXT};
use sphindex::inspect::crc32;
use sphindex::IndexStats;

#[test]
fn test_fixture_stats() {
    let stats = IndexStats::collect(&FIXTURE, FIXTURE_TEXT.as_bytes(), 5);

    assert_eq!(stats.docs, 9);
    assert_eq!(stats.terms, FIXTURE.terms.len());
    assert_eq!(stats.titleterms, FIXTURE.titleterms.len());
    assert_eq!(stats.objects, 0);
    assert_eq!(stats.raw_bytes, FIXTURE_TEXT.len());
    assert_eq!(stats.crc32, crc32(FIXTURE_TEXT.as_bytes()));

    let compressed = stats.brotli_bytes.unwrap();
    assert!(compressed > 0 && compressed < stats.raw_bytes);
}

#[test]
fn test_top_terms_are_the_most_widespread() {
    let stats = IndexStats::collect(&FIXTURE, FIXTURE_TEXT.as_bytes(), 3);
    // "If", "The" and "via" are on eight pages each; nothing is on all nine.
    assert_eq!(stats.top_terms.len(), 3);
    assert_eq!(stats.top_terms[0], ("If".to_string(), 8));
    assert!(stats.top_terms.iter().all(|(_, docs)| *docs == 8));
}

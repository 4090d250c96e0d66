// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page search over `terms` and `titleterms`.
//!
//! Each required stem collects the pages it hits, with a score per hit:
//!
//! - exact body term: `term`
//! - exact title term: `title`
//! - longer than two characters and missing from one of the maps: every key of
//!   that map containing the stem, scored `partial_term` / `partial_title`
//!
//! A page survives when it was hit by every required stem (or by every stem
//! longer than two characters) and by no excluded stem. Its score is the best
//! score any of its words earned.

use std::collections::BTreeMap;

use crate::scoring::Scorer;
use crate::types::{DocId, PostingList, TermMap};
use crate::verify::WellFormedIndex;

use super::{MatchKind, Query, SearchResult};

/// Per-page bookkeeping: best score per required word.
type Hits = BTreeMap<DocId, BTreeMap<usize, i32>>;

pub(crate) fn search_terms(
    index: &WellFormedIndex,
    query: &Query,
    scorer: &Scorer,
) -> Vec<SearchResult> {
    let mut hits = Hits::new();

    for (word_idx, word) in query.terms.iter().enumerate() {
        let mut sources: Vec<(&PostingList, i32)> = Vec::new();
        sources.extend(index.terms.get(word).map(|p| (p, scorer.term)));
        sources.extend(index.titleterms.get(word).map(|p| (p, scorer.title)));

        if word.chars().count() > 2 {
            if !index.terms.contains_key(word) {
                sources.extend(partial_matches(&index.terms, word, scorer.partial_term));
            }
            if !index.titleterms.contains_key(word) {
                sources.extend(partial_matches(&index.titleterms, word, scorer.partial_title));
            }
        }

        if sources.is_empty() {
            tracing::trace!(word = %word, "required term has no hits");
            return Vec::new();
        }

        for (postings, score) in sources {
            for doc in postings.docs() {
                let best = hits.entry(doc).or_default().entry(word_idx).or_insert(score);
                *best = (*best).max(score);
            }
        }
    }

    let required = query.terms.len();
    let long_terms = query.terms.iter().filter(|t| t.chars().count() > 2).count();

    hits.into_iter()
        .filter(|(_, words)| words.len() == required || words.len() == long_terms)
        .filter(|(doc, _)| !is_excluded(index, &query.excluded, *doc))
        .filter_map(|(doc, words)| {
            let score = words.values().copied().max()?;
            let page = index.doc(doc);
            Some(SearchResult {
                doc,
                docname: page.docname.to_string(),
                filename: page.filename.to_string(),
                title: page.title.to_string(),
                anchor: String::new(),
                description: String::new(),
                score,
                kind: MatchKind::Page,
            })
        })
        .collect()
}

fn partial_matches<'a>(
    map: &'a TermMap,
    word: &'a str,
    score: i32,
) -> impl Iterator<Item = (&'a PostingList, i32)> + 'a {
    map.iter()
        .filter(move |(key, _)| key.contains(word))
        .map(move |(_, postings)| (postings, score))
}

/// Excluded stems only count on exact hits.
fn is_excluded(index: &WellFormedIndex, excluded: &[String], doc: DocId) -> bool {
    excluded.iter().any(|word| {
        let in_terms = index.terms.get(word).is_some_and(|p| p.contains(doc));
        let in_titles = index.titleterms.get(word).is_some_and(|p| p.contains(doc));
        in_terms || in_titles
    })
}

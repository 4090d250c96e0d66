// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: where the rubber meets the road.
//!
//! Two entry points:
//!
//! - [`lookup`] is a plain dictionary probe. One key in, the documents listed
//!   under it in `terms` or `titleterms` out. No stemming, no scoring.
//!
//! - [`search`] is what a documentation site's search box does: parse the
//!   query, search pages and objects, score, rank, deduplicate.

mod objects;
mod query;
mod terms;

pub use objects::{full_name, resolve_anchor};
pub use query::Query;

use serde::Serialize;

use crate::scoring::ranking::rank_results;
use crate::scoring::Scorer;
use crate::types::{DocId, SearchIndex};
use crate::verify::WellFormedIndex;

/// What produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// A page matched the query words.
    Page,
    /// A documented object's name matched.
    Object,
}

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub doc: DocId,
    pub docname: String,
    pub filename: String,
    /// Page title, or an object's full name.
    pub title: String,
    /// Fragment inside the page, without `#`. Empty for page hits.
    pub anchor: String,
    /// `"<type label>, in <page title>"` for objects, empty for pages.
    pub description: String,
    pub score: i32,
    pub kind: MatchKind,
}

/// Documents listed under `term` in `terms` or `titleterms`.
///
/// Sorted and de-duplicated. An unknown term gives an empty vector.
pub fn lookup(index: &SearchIndex, term: &str) -> Vec<DocId> {
    let mut docs: Vec<DocId> = index
        .term(term)
        .into_iter()
        .chain(index.title_term(term))
        .flat_map(|postings| postings.docs())
        .collect();
    docs.sort_unstable();
    docs.dedup();
    docs
}

/// Run a parsed query against a verified index.
///
/// Results are ordered by score (descending), then title, then docname.
pub fn search(index: &WellFormedIndex, query: &Query, scorer: &Scorer) -> Vec<SearchResult> {
    let mut results = objects::search_objects(index, query, scorer);
    if !query.terms.is_empty() {
        results.extend(terms::search_terms(index, query, scorer));
    }
    let ranked = rank_results(results);
    tracing::debug!(
        terms = ?query.terms,
        excluded = ?query.excluded,
        results = ranked.len(),
        "search complete"
    );
    ranked
}

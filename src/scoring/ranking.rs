// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! Sort order:
//! 1. **Score** - higher wins
//! 2. **Title** - case-insensitive, ascending
//! 3. **Docname** - ascending
//! 4. **Anchor** - ascending, so the order never depends on hash or input order
//!
//! Page results and object results share one list; they compete on score alone.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::search::SearchResult;

/// Compare two search results for ranking. `Less` means `a` ranks first.
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| a.docname.cmp(&b.docname))
        .then_with(|| a.anchor.cmp(&b.anchor))
}

/// Sort results and drop duplicates, keeping the best-ranked copy.
///
/// Two results are duplicates when they point at the same place with the same
/// text: docname, title, anchor, description and filename all equal.
pub fn rank_results(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    results.sort_by(compare_results);

    let mut seen = HashSet::new();
    results.retain(|r| {
        seen.insert((
            r.docname.clone(),
            r.title.clone(),
            r.anchor.clone(),
            r.description.clone(),
            r.filename.clone(),
        ))
    });
    results
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Object search: functions, classes, options and whatever else the domains
//! registered under `objects`.
//!
//! Each query word is matched as a substring of every object's lowercase full
//! name (`prefix.name`). The remaining query words must then all appear in the
//! object's haystack: prefix, name, type label and page title.

use crate::scoring::Scorer;
use crate::types::ObjectEntry;
use crate::verify::WellFormedIndex;

use super::{MatchKind, Query, SearchResult};

pub(crate) fn search_objects(
    index: &WellFormedIndex,
    query: &Query,
    scorer: &Scorer,
) -> Vec<SearchResult> {
    let mut results = Vec::new();
    for (i, word) in query.object_terms.iter().enumerate() {
        let others: Vec<&str> = query
            .object_terms
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, w)| w.as_str())
            .collect();
        search_word(index, word, &others, scorer, &mut results);
    }
    results
}

fn search_word(
    index: &WellFormedIndex,
    word: &str,
    others: &[&str],
    scorer: &Scorer,
    results: &mut Vec<SearchResult>,
) {
    for (prefix, names) in &index.objects {
        for (name, entry) in names {
            let fullname = full_name(prefix, name);
            let lower = fullname.to_lowercase();
            if !lower.contains(word) {
                continue;
            }

            let last = lower.rsplit('.').next().unwrap_or(lower.as_str());
            let mut score = if lower == word || last == word {
                scorer.obj_name_match
            } else if last.contains(word) {
                scorer.obj_partial_match
            } else {
                0
            };

            // Verified: objtype is a key of objtypes and objnames.
            let label = index
                .objnames
                .get(&entry.objtype)
                .map(|n| n.label.as_str())
                .unwrap_or_default();
            let page = index.doc(entry.doc);

            if !others.is_empty() {
                let haystack =
                    format!("{} {} {} {}", prefix, name, label, page.title).to_lowercase();
                if !others.iter().all(|w| haystack.contains(w)) {
                    continue;
                }
            }

            score += scorer.priority_bonus(entry.priority);
            results.push(SearchResult {
                doc: entry.doc,
                docname: page.docname.to_string(),
                filename: page.filename.to_string(),
                title: fullname.clone(),
                anchor: resolve_anchor(index, entry, &fullname),
                description: format!("{}, in {}", label, page.title),
                score,
                kind: MatchKind::Object,
            });
        }
    }
}

/// `prefix.name`, or just `name` at top level.
pub fn full_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Expand the stored short anchor: `""` is the full name, `"-"` is
/// `type-fullname`, anything else is literal.
pub fn resolve_anchor(index: &WellFormedIndex, entry: &ObjectEntry, fullname: &str) -> String {
    match entry.anchor.as_str() {
        "" => fullname.to_string(),
        "-" => {
            let objtype = index
                .objnames
                .get(&entry.objtype)
                .map(|n| n.objtype.as_str())
                .unwrap_or_default();
            format!("{}-{}", objtype, fullname)
        }
        anchor => anchor.to_string(),
    }
}

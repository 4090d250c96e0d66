// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning what the user typed into index keys.
//!
//! The query goes through the same pipeline the builder used for page text:
//! split into words, lowercase, drop stop words, Porter-stem. A word whose stem
//! collapses below three characters (`use` -> `us`) is looked up unstemmed
//! instead, as long as the word itself had three or more.
//!
//! Purely numeric words (`200`, `2006`) are matched against object names but
//! never required of, or excluded from, pages.
//!
//! A whitespace-separated token starting with `-` excludes its words:
//! `install -windows` finds pages about installing that never mention Windows.

use crate::text::{is_stopword, split_words, stem_lower};

/// A parsed search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Stems every result must contain, in query order, without duplicates.
    pub terms: Vec<String>,
    /// Stems no result may contain.
    pub excluded: Vec<String>,
    /// Lowercase words (stop words included) matched against object names.
    pub object_terms: Vec<String>,
    /// Lowercase words of the required terms, for highlighting.
    pub highlight: Vec<String>,
}

impl Query {
    pub fn parse(text: &str) -> Self {
        let mut query = Query::default();

        for token in text.split_whitespace() {
            let (excluded, token) = match token.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, token),
            };

            for word in split_words(token) {
                let lower = word.to_lowercase();
                if !excluded {
                    push_unique(&mut query.object_terms, &lower);
                }
                if is_stopword(&lower) || is_number(&lower) {
                    continue;
                }

                let mut key = stem_lower(&lower);
                if key.chars().count() < 3 && lower.chars().count() >= 3 {
                    key = lower.clone();
                }

                if excluded {
                    push_unique(&mut query.excluded, &key);
                } else {
                    push_unique(&mut query.terms, &key);
                    push_unique(&mut query.highlight, &lower);
                }
            }
        }

        tracing::trace!(
            terms = ?query.terms,
            excluded = ?query.excluded,
            "parsed query"
        );
        query
    }

    /// True when nothing would be searched for.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.object_terms.is_empty()
    }
}

/// Bare numbers only take part in object search.
fn is_number(word: &str) -> bool {
    word.bytes().all(|b| b.is_ascii_digit())
}

fn push_unique(list: &mut Vec<String>, word: &str) {
    if !list.iter().any(|w| w == word) {
        list.push(word.to_string());
    }
}

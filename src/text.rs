// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word splitting, stop words and the index word filter.
//!
//! Both sides of the index use the same rules: the builder when it decides what
//! to store, the query parser when it decides what to look up. If the two drift
//! apart, searches silently stop matching.

use crate::stemmer::stem;

/// English stop words. Never stored in the index, dropped from queries.
pub const STOPWORDS: &[&str] = &[
    "a", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "near", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there",
    "these", "they", "this", "to", "was", "will", "with",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Word characters: letters, digits and underscore, in any script.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into maximal runs of word characters.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty())
}

/// Hiragana block bounds used by the short-fragment rule.
const HIRAGANA_LOW: u32 = 12353;
const HIRAGANA_HIGH: u32 = 12436;

/// Whether a (usually stemmed) word belongs in the index.
///
/// Rejects stop words (only checked for words starting below U+0100) and
/// one- or two-character Hiragana fragments. The empty word passes.
pub fn word_filter(word: &str) -> bool {
    let Some(first) = word.chars().next() else {
        return true;
    };
    let first = first as u32;
    let short_hiragana =
        word.chars().count() < 3 && HIRAGANA_LOW < first && first < HIRAGANA_HIGH;
    let stop = first < 256 && is_stopword(word);
    !(short_hiragana || stop)
}

/// Stem a word the way the index builder does: lowercase, then Porter.
pub fn stem_lower(word: &str) -> String {
    stem(&word.to_lowercase())
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query parsing and search.
//!
//! Emoji, RTL text, null bytes, a lone minus sign: none of it may panic, and
//! every result must point at a real page with a consistent ranking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sphindex::{parse_index, search, Query, Scorer, WellFormedIndex};
use std::sync::OnceLock;

fuzz_target!(|query: &[u8]| {
    static INDEX: OnceLock<WellFormedIndex> = OnceLock::new();
    let index = INDEX.get_or_init(|| {
        let src = include_str!("../../tests/fixtures/searchindex.js");
        let index = parse_index(src).expect("fixture must parse");
        WellFormedIndex::new(index).expect("fixture must verify")
    });

    let text = String::from_utf8_lossy(query);
    let results = search(index, &Query::parse(&text), &Scorer::default());

    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for result in &results {
        assert!(result.doc.as_usize() < index.doc_count());
    }
});

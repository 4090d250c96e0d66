// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the `searchindex.js` reader.
//!
//! Arbitrary text must either be rejected with an error or produce an index
//! that survives verification and re-serialization. Anything that parses and
//! verifies must write back to text that parses to the same index.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sphindex::{dump_index, parse_index, verify_index, WellFormedIndex};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(index) = parse_index(text) else {
        return;
    };

    let report = verify_index(&index);
    assert_eq!(report.is_ok(), WellFormedIndex::new(index.clone()).is_ok());

    let dumped = dump_index(&index).expect("parsed index must serialize");
    let reparsed = parse_index(&dumped).expect("dumped index must parse");
    assert_eq!(reparsed, index);
});

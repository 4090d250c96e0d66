// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the index builder.
//!
//! Whatever text pages contain, the built index must verify cleanly and
//! round-trip through the writer and reader.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sphindex::{dump_index, parse_index, verify_index, EnvVersion, IndexBuilder};

#[derive(Arbitrary, Debug)]
struct Page {
    docname: String,
    title: String,
    text: String,
}

fuzz_target!(|pages: Vec<Page>| {
    let mut builder = IndexBuilder::new(EnvVersion::sphinx3());
    for page in &pages {
        builder.feed(&page.docname, "page.rst", &page.title, &[], &page.text);
    }
    let index = builder.freeze();

    let report = verify_index(&index);
    assert!(report.is_ok(), "{:?}", report.errors);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);

    let dumped = dump_index(&index).expect("built index must serialize");
    assert_eq!(parse_index(&dumped).expect("dumped index must parse"), index);
});

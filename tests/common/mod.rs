//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use sphindex::{parse_index, SearchIndex, WellFormedIndex};

// Re-export canonical test utilities from sphindex::testing
pub use sphindex::testing::{make_doc, sample_index};

// ============================================================================
// FIXTURE PATHS
// ============================================================================

/// A `searchindex.js` written by Sphinx (environment `sphinx: 56`) for a nine-page project.
pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/searchindex.js")
}

// ============================================================================
// CACHED FIXTURE
// ============================================================================

/// Raw fixture text, exactly as Sphinx wrote it.
pub static FIXTURE_TEXT: LazyLock<String> =
    LazyLock::new(|| fs::read_to_string(fixture_path()).expect("Failed to read fixture index"));

/// Parsed fixture.
pub static FIXTURE: LazyLock<SearchIndex> =
    LazyLock::new(|| parse_index(&FIXTURE_TEXT).expect("Fixture index does not parse"));

/// Verified copy of the fixture, ready to search.
pub fn fixture_index() -> WellFormedIndex {
    WellFormedIndex::new(FIXTURE.clone()).expect("Fixture index is malformed")
}

// ============================================================================
// BUILD INPUTS
// ============================================================================

/// Write `manifest.json` plus one JSON file per document into `dir`.
pub fn write_build_input(dir: &Path, docs: &[sphindex::Document]) {
    let mut names = Vec::new();
    for doc in docs {
        let file = format!("{}.json", doc.docname.replace('/', "_"));
        let json = serde_json::to_string(doc).expect("Failed to serialize document");
        fs::write(dir.join(&file), json).expect("Failed to write document");
        names.push(file);
    }
    let manifest = serde_json::json!({ "version": 1, "documents": names });
    fs::write(dir.join("manifest.json"), manifest.to_string()).expect("Failed to write manifest");
}

/// Docnames of a result list, in order.
pub fn docnames(results: &[sphindex::SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.docname.as_str()).collect()
}

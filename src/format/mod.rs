// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading and writing `searchindex.js`.
//!
//! The file is one JavaScript statement, `Search.setIndex({...})`, whose argument
//! is an object literal with unquoted keys. [`parse`] turns that literal into a
//! `serde_json::Value` and serde does the rest. [`dump`] goes the other way and
//! reproduces Sphinx's own layout, so a parsed file dumps back to the same bytes.

pub mod dump;
pub mod parse;

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::SearchIndex;

/// Function the documentation site's search script calls with the index.
pub const SET_INDEX_CALL: &str = "Search.setIndex";

/// Conventional filename inside a built documentation tree.
pub const INDEX_FILENAME: &str = "searchindex.js";

/// Parse `Search.setIndex({...})` (or a bare object literal) into an index.
pub fn parse_index(src: &str) -> Result<SearchIndex> {
    let value = parse::parse_literal(src)?;
    let index: SearchIndex = serde_json::from_value(value)?;
    tracing::debug!(
        docs = index.doc_count(),
        terms = index.terms.len(),
        titleterms = index.titleterms.len(),
        "parsed search index"
    );
    Ok(index)
}

/// Render an index as Sphinx writes it.
pub fn dump_index(index: &SearchIndex) -> Result<String> {
    let value = serde_json::to_value(index)?;
    Ok(format!("{}({})", SET_INDEX_CALL, dump::dump_literal(&value)))
}

/// Read and parse an index file.
pub fn load_index(path: impl AsRef<Path>) -> Result<SearchIndex> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = src.len(), "loading search index");
    parse_index(&src)
}

/// Write an index file, replacing any previous content.
pub fn save_index(path: impl AsRef<Path>, index: &SearchIndex) -> Result<()> {
    let path = path.as_ref();
    let text = dump_index(index)?;
    fs::write(path, &text).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote search index");
    Ok(())
}

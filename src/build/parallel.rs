// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel document loading.
//!
//! Reading and parsing one JSON file per page is the only expensive part of a
//! build, and every file is independent. Rayon makes this trivial: `par_iter()`
//! over the manifest entries. Feeding the builder stays sequential; it is cheap and
//! the builder is not shared.
//!
//! Without the `parallel` feature the same functions run on one thread and
//! draw no progress bar.

use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};

use super::Document;

/// A document and the manifest entry it was read from.
#[derive(Clone, Debug)]
pub struct LoadedDocument {
    pub entry: String,
    pub document: Document,
}

/// Read and parse one document file.
pub fn load_document(input_dir: &Path, relative: &str) -> Result<Document> {
    let path = input_dir.join(relative);
    let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    serde_json::from_str::<Document>(&content).map_err(|e| Error::Document {
        path,
        message: e.to_string(),
    })
}

fn load_entry(input_dir: &Path, entry: &str) -> Result<LoadedDocument> {
    Ok(LoadedDocument {
        entry: entry.to_string(),
        document: load_document(input_dir, entry)?,
    })
}

fn sort_by_docname(docs: &mut [LoadedDocument]) {
    docs.sort_by(|a, b| a.document.docname.cmp(&b.document.docname));
}

/// Load the given manifest entries, sorted by docname.
///
/// The first unreadable or malformed file aborts the load.
pub fn load_documents(input_dir: &Path, entries: &[String]) -> Result<Vec<LoadedDocument>> {
    #[cfg(feature = "parallel")]
    let iter = entries.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = entries.iter();

    let mut docs = iter
        .map(|entry| load_entry(input_dir, entry))
        .collect::<Result<Vec<LoadedDocument>>>()?;
    sort_by_docname(&mut docs);
    Ok(docs)
}

/// Load entries in parallel, advancing `progress` as files complete.
#[cfg(feature = "parallel")]
pub fn load_documents_with_progress(
    input_dir: &Path,
    entries: &[String],
    progress: &ProgressBar,
) -> Result<Vec<LoadedDocument>> {
    let counter = AtomicUsize::new(0);
    let total = entries.len();

    let mut docs = entries
        .par_iter()
        .map(|entry| {
            let doc = load_entry(input_dir, entry)?;

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count % 10 == 0 || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }

            Ok(doc)
        })
        .collect::<Result<Vec<LoadedDocument>>>()?;

    sort_by_docname(&mut docs);
    Ok(docs)
}

/// Single-threaded fallback: no progress reporting.
#[cfg(not(feature = "parallel"))]
pub fn load_documents_with_progress(
    input_dir: &Path,
    entries: &[String],
) -> Result<Vec<LoadedDocument>> {
    load_documents(input_dir, entries)
}

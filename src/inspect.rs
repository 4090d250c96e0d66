// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structure summary of an index file: counts, sizes, checksum.
//!
//! The transfer size is what a browser would download with brotli at its
//! highest quality, the setting static documentation hosts precompress with.

use std::io::Write;

use crc32fast::Hasher as Crc32Hasher;

use crate::types::SearchIndex;

/// Summary numbers for one index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    pub docs: usize,
    pub terms: usize,
    pub titleterms: usize,
    pub postings: usize,
    pub objects: usize,
    pub objtypes: usize,
    /// Size of the file as read.
    pub raw_bytes: usize,
    /// Size after brotli compression, if compression succeeded.
    pub brotli_bytes: Option<usize>,
    pub crc32: u32,
    /// Most widespread body terms, by document count, highest first.
    pub top_terms: Vec<(String, usize)>,
}

impl IndexStats {
    /// Summarize `index`, whose serialized form is `raw`.
    pub fn collect(index: &SearchIndex, raw: &[u8], top: usize) -> Self {
        let mut top_terms: Vec<(String, usize)> = index
            .terms
            .iter()
            .map(|(term, postings)| (term.clone(), postings.len()))
            .collect();
        top_terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_terms.truncate(top);

        Self {
            docs: index.doc_count(),
            terms: index.terms.len(),
            titleterms: index.titleterms.len(),
            postings: index.posting_count(),
            objects: index.object_count(),
            objtypes: index.objtypes.len(),
            raw_bytes: raw.len(),
            brotli_bytes: brotli_size(raw),
            crc32: crc32(raw),
            top_terms,
        }
    }
}

pub fn crc32(data: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Compressed size at quality 11, window 22.
pub fn brotli_size(data: &[u8]) -> Option<usize> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder.write_all(data).ok()?;
        encoder.flush().ok()?;
    }
    Some(compressed.len())
}

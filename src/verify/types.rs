// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type wrappers that make invalid states unrepresentable.
//!
//! A parsed [`SearchIndex`] is just data: nothing stops `terms` from pointing at
//! document 40 in a nine-page site. Wrap it in [`WellFormedIndex`] and the
//! cross-references are checked once, up front. After that every document
//! lookup is infallible.
//!
//! # Example
//!
//! ```ignore
//! let index = WellFormedIndex::new(parse_index(&src)?)?;
//! for doc in index.term("api").into_iter().flat_map(|p| p.docs()) {
//!     // Can't panic: every posting was bounds-checked at construction.
//!     println!("{}", index.doc(doc).title);
//! }
//! ```

use std::ops::Deref;

use thiserror::Error;

use crate::types::{DocId, DocRef, SearchIndex};

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// `docnames`, `filenames` and `titles` must describe the same pages.
    #[error("docnames.len() {docnames}, filenames.len() {filenames} and titles.len() {titles} differ")]
    MismatchedLengths {
        docnames: usize,
        filenames: usize,
        titles: usize,
    },

    /// A posting or object refers to a page that does not exist.
    #[error("{field}[{key:?}] refers to document {doc} but there are only {doc_count}")]
    DocOutOfRange {
        field: &'static str,
        key: String,
        doc: u32,
        doc_count: usize,
    },

    /// A term with an empty sequence can never match anything.
    #[error("{field}[{term:?}] has an empty posting list")]
    EmptyPostingList { field: &'static str, term: String },

    /// An object entry names an objtype index missing from `objtypes`.
    #[error("object {prefix:?}.{name:?} has unknown objtype {objtype}")]
    UnknownObjType {
        prefix: String,
        name: String,
        objtype: u32,
    },

    /// `objtypes` and `objnames` must share the same keys.
    #[error("objtype {objtype} appears in only one of objtypes and objnames")]
    MismatchedObjTypes { objtype: u32 },

    /// Posting sequences are written in ascending document order.
    #[error("{field}[{term:?}] is not sorted")]
    UnsortedPostings { field: &'static str, term: String },

    #[error("{field}[{term:?}] lists document {doc} more than once")]
    DuplicatePosting {
        field: &'static str,
        term: String,
        doc: u32,
    },
}

impl InvariantError {
    /// Whether the violation breaks lookups (as opposed to being untidy).
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            InvariantError::UnsortedPostings { .. } | InvariantError::DuplicatePosting { .. }
        )
    }
}

/// A search index whose cross-references have all been checked.
///
/// # Invariants (enforced at construction)
/// - `docnames`, `filenames` and `titles` have equal length
/// - every posting in `terms` and `titleterms` is `< doc_count()`
/// - every object entry points at a valid document and a known objtype
/// - no posting list is empty
///
/// Derefs to [`SearchIndex`] for read access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellFormedIndex {
    inner: SearchIndex,
}

impl WellFormedIndex {
    /// Validate `index`. Returns the first fatal violation found.
    ///
    /// Unsorted or duplicated postings are tolerated: they do not affect
    /// lookups and [`verify_index`](super::verify_index) reports them as
    /// warnings.
    pub fn new(index: SearchIndex) -> Result<Self, InvariantError> {
        let report = super::verify_index(&index);
        if let Some(err) = report.errors.into_iter().next() {
            return Err(err);
        }
        Ok(Self { inner: index })
    }

    pub fn index(&self) -> &SearchIndex {
        &self.inner
    }

    /// Convert back to the unverified index.
    pub fn into_inner(self) -> SearchIndex {
        self.inner
    }

    /// Metadata for a document referenced by this index.
    ///
    /// Panics if `id` did not come from this index (postings and object
    /// entries of a well-formed index never trigger this).
    pub fn doc(&self, id: DocId) -> DocRef<'_> {
        let i = id.as_usize();
        DocRef {
            id,
            docname: &self.inner.docnames[i],
            filename: &self.inner.filenames[i],
            title: &self.inner.titles[i],
        }
    }

    /// All documents in index order.
    pub fn docs(&self) -> impl Iterator<Item = DocRef<'_>> {
        (0..self.inner.doc_count()).map(|i| self.doc(DocId(i as u32)))
    }
}

impl Deref for WellFormedIndex {
    type Target = SearchIndex;

    fn deref(&self) -> &SearchIndex {
        &self.inner
    }
}

impl TryFrom<SearchIndex> for WellFormedIndex {
    type Error = InvariantError;

    fn try_from(index: SearchIndex) -> Result<Self, InvariantError> {
        Self::new(index)
    }
}

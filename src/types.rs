// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search index record and its parts.
//!
//! These types mirror the object Sphinx passes to `Search.setIndex(...)`. Field
//! names follow the file (`docnames`, `titleterms`, `envversion`) so serde can
//! map them without renames.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Parallel arrays**: `docnames.len() = filenames.len() = titles.len()`.
//!   Position `i` in each describes the same page.
//!
//! - **Postings**: every `DocId` in `terms` and `titleterms` is `< docnames.len()`.
//!
//! - **Objects**: every object entry points at a valid document and at an
//!   objtype present in `objtypes`.
//!
//! Nothing here enforces these. Parse into [`SearchIndex`], then wrap it in
//! [`WellFormedIndex`](crate::verify::WellFormedIndex) to get checked access.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::envversion::EnvVersion;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Position of a document in the parallel `docnames`/`filenames`/`titles` arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Create a new DocId, validating it's within bounds.
    #[inline]
    pub fn new(id: u32, num_docs: usize) -> Option<Self> {
        if (id as usize) < num_docs {
            Some(DocId(id))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// POSTINGS
// =============================================================================

/// One document reference inside a posting sequence, optionally weighted.
///
/// Written as a bare integer, or as `[doc, weight]` when weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Posting {
    pub doc: DocId,
    pub weight: Option<u32>,
}

impl Posting {
    pub fn new(doc: impl Into<DocId>) -> Self {
        Self {
            doc: doc.into(),
            weight: None,
        }
    }

    pub fn weighted(doc: impl Into<DocId>, weight: u32) -> Self {
        Self {
            doc: doc.into(),
            weight: Some(weight),
        }
    }
}

impl Serialize for Posting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.weight {
            None => self.doc.serialize(serializer),
            Some(weight) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&self.doc)?;
                seq.serialize_element(&weight)?;
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Posting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Doc(u32),
            Weighted((u32, u32)),
        }

        match Raw::deserialize(deserializer).map_err(|_| {
            de::Error::custom("posting must be a document index or a [document, weight] pair")
        })? {
            Raw::Doc(doc) => Ok(Posting::new(doc)),
            Raw::Weighted((doc, weight)) => Ok(Posting::weighted(doc, weight)),
        }
    }
}

/// The documents containing a term.
///
/// Sphinx writes a lone integer when a term occurs in exactly one document and
/// a sequence otherwise. Both forms are kept so a parsed index dumps back to
/// the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostingList {
    One(DocId),
    Many(Vec<Posting>),
}

impl PostingList {
    /// Build the canonical form for a set of documents: a lone integer for one
    /// document, a sorted sequence otherwise.
    pub fn from_docs(docs: impl IntoIterator<Item = DocId>) -> Self {
        let mut docs: Vec<DocId> = docs.into_iter().collect();
        docs.sort_unstable();
        docs.dedup();
        if docs.len() == 1 {
            PostingList::One(docs[0])
        } else {
            PostingList::Many(docs.into_iter().map(Posting::new).collect())
        }
    }

    /// Iterate the referenced documents in stored order.
    pub fn docs(&self) -> impl Iterator<Item = DocId> + '_ {
        let (single, many) = match self {
            PostingList::One(doc) => (Some(*doc), &[][..]),
            PostingList::Many(postings) => (None, postings.as_slice()),
        };
        single.into_iter().chain(many.iter().map(|p| p.doc))
    }

    pub fn contains(&self, doc: DocId) -> bool {
        self.docs().any(|d| d == doc)
    }

    /// Weight recorded for `doc`, if the posting is weighted.
    pub fn weight_of(&self, doc: DocId) -> Option<u32> {
        match self {
            PostingList::One(_) => None,
            PostingList::Many(postings) => postings
                .iter()
                .find(|p| p.doc == doc)
                .and_then(|p| p.weight),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PostingList::One(_) => 1,
            PostingList::Many(postings) => postings.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for PostingList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PostingList::One(doc) => doc.serialize(serializer),
            PostingList::Many(postings) => postings.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PostingList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(u32),
            Many(Vec<Posting>),
        }

        match Raw::deserialize(deserializer).map_err(|_| {
            de::Error::custom("posting list must be a document index or a sequence of postings")
        })? {
            Raw::One(doc) => Ok(PostingList::One(DocId(doc))),
            Raw::Many(postings) => Ok(PostingList::Many(postings)),
        }
    }
}

/// Term dictionary: token -> posting list.
pub type TermMap = BTreeMap<String, PostingList>;

// =============================================================================
// OBJECTS
// =============================================================================

/// A documented object (function, class, option, ...) registered by a domain.
///
/// Serialized as `[docindex, objtype, priority, anchor]`. An empty anchor means
/// "the full name", `"-"` means "`type-fullname`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(DocId, u32, i32, String)",
    into = "(DocId, u32, i32, String)"
)]
pub struct ObjectEntry {
    pub doc: DocId,
    pub objtype: u32,
    pub priority: i32,
    pub anchor: String,
}

impl From<(DocId, u32, i32, String)> for ObjectEntry {
    fn from((doc, objtype, priority, anchor): (DocId, u32, i32, String)) -> Self {
        Self {
            doc,
            objtype,
            priority,
            anchor,
        }
    }
}

impl From<ObjectEntry> for (DocId, u32, i32, String) {
    fn from(entry: ObjectEntry) -> Self {
        (entry.doc, entry.objtype, entry.priority, entry.anchor)
    }
}

/// Human-readable name of an objtype: `[domain, type, localized name]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct ObjName {
    pub domain: String,
    pub objtype: String,
    pub label: String,
}

impl From<(String, String, String)> for ObjName {
    fn from((domain, objtype, label): (String, String, String)) -> Self {
        Self {
            domain,
            objtype,
            label,
        }
    }
}

impl From<ObjName> for (String, String, String) {
    fn from(name: ObjName) -> Self {
        (name.domain, name.objtype, name.label)
    }
}

/// prefix -> name -> entry.
pub type ObjectMap = BTreeMap<String, BTreeMap<String, ObjectEntry>>;

// =============================================================================
// THE INDEX
// =============================================================================

/// The complete record passed to `Search.setIndex(...)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    pub docnames: Vec<String>,
    #[serde(default)]
    pub filenames: Vec<String>,
    pub titles: Vec<String>,
    pub terms: TermMap,
    pub titleterms: TermMap,
    #[serde(default)]
    pub envversion: EnvVersion,
    #[serde(default)]
    pub objects: ObjectMap,
    #[serde(default)]
    pub objnames: BTreeMap<u32, ObjName>,
    #[serde(default)]
    pub objtypes: BTreeMap<u32, String>,
}

/// Borrowed view of one document's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocRef<'a> {
    pub id: DocId,
    pub docname: &'a str,
    pub filename: &'a str,
    pub title: &'a str,
}

impl SearchIndex {
    pub fn doc_count(&self) -> usize {
        self.docnames.len()
    }

    /// Metadata for `id`, or `None` if any of the parallel arrays is too short.
    pub fn doc(&self, id: DocId) -> Option<DocRef<'_>> {
        let i = id.as_usize();
        Some(DocRef {
            id,
            docname: self.docnames.get(i)?,
            filename: self.filenames.get(i)?,
            title: self.titles.get(i)?,
        })
    }

    /// Position of a docname, if present.
    pub fn doc_id(&self, docname: &str) -> Option<DocId> {
        self.docnames
            .iter()
            .position(|d| d == docname)
            .map(|i| DocId(i as u32))
    }

    pub fn term(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    pub fn title_term(&self, term: &str) -> Option<&PostingList> {
        self.titleterms.get(term)
    }

    /// Total number of object entries across all prefixes.
    pub fn object_count(&self) -> usize {
        self.objects.values().map(BTreeMap::len).sum()
    }

    /// Total number of postings across `terms` and `titleterms`.
    pub fn posting_count(&self) -> usize {
        self.terms
            .values()
            .chain(self.titleterms.values())
            .map(PostingList::len)
            .sum()
    }
}

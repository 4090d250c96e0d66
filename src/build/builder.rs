// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Incremental index construction.
//!
//! The builder keeps everything keyed by docname rather than by position, so
//! documents can be added, replaced and dropped in any order. Positions are
//! only assigned in [`IndexBuilder::freeze`], after sorting docnames.
//!
//! # Word routing
//!
//! ```text
//! title + headings ──stem──▶ titleterms
//! body text        ──stem──▶ terms   (unless already a title term of the page)
//! ```
//!
//! A stem that fails the word filter (`The` → `the`, a stop word) falls back to
//! the unstemmed word if that passes. The filter is case-sensitive, so
//! capitalized stop words end up in the index verbatim.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::envversion::EnvVersion;
use crate::error::Result;
use crate::search::{full_name, resolve_anchor};
use crate::text::{split_words, stem_lower, word_filter};
use crate::types::{DocId, ObjName, ObjectEntry, PostingList, SearchIndex, TermMap};
use crate::verify::WellFormedIndex;

use super::{Document, ObjectInput};

type Mapping = BTreeMap<String, BTreeSet<String>>;

/// Collects documents and produces a [`SearchIndex`].
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    envversion: EnvVersion,
    titles: BTreeMap<String, String>,
    filenames: BTreeMap<String, String>,
    /// stem -> docnames, body words
    mapping: Mapping,
    /// stem -> docnames, title and heading words
    title_mapping: Mapping,
    /// docname -> full name -> object
    objects: BTreeMap<String, BTreeMap<String, ObjectInput>>,
}

impl IndexBuilder {
    pub fn new(envversion: EnvVersion) -> Self {
        Self {
            envversion,
            ..Default::default()
        }
    }

    /// Seed a builder from a previously generated index.
    ///
    /// Fails if the index has broken cross-references: a builder fed from
    /// garbage would write garbage back.
    pub fn from_index(index: &SearchIndex) -> Result<Self> {
        let index = WellFormedIndex::new(index.clone())?;
        let mut builder = Self::new(index.envversion.clone());

        for doc in index.docs() {
            builder
                .titles
                .insert(doc.docname.to_string(), doc.title.to_string());
            builder
                .filenames
                .insert(doc.docname.to_string(), doc.filename.to_string());
        }

        let docname = |id: DocId| index.doc(id).docname.to_string();
        for (term, postings) in &index.terms {
            builder
                .mapping
                .insert(term.clone(), postings.docs().map(docname).collect());
        }
        for (term, postings) in &index.titleterms {
            builder
                .title_mapping
                .insert(term.clone(), postings.docs().map(docname).collect());
        }

        for (prefix, names) in &index.objects {
            for (name, entry) in names {
                // Verified: objnames has every objtype in use.
                let Some(objname) = index.objnames.get(&entry.objtype) else {
                    continue;
                };
                let fullname = full_name(prefix, name);
                let object = ObjectInput {
                    anchor: Some(resolve_anchor(&index, entry, &fullname)),
                    name: fullname.clone(),
                    domain: objname.domain.clone(),
                    objtype: objname.objtype.clone(),
                    label: Some(objname.label.clone()),
                    priority: entry.priority,
                };
                builder
                    .objects
                    .entry(docname(entry.doc))
                    .or_default()
                    .insert(fullname, object);
            }
        }

        tracing::debug!(docs = builder.titles.len(), "seeded builder from index");
        Ok(builder)
    }

    pub fn doc_count(&self) -> usize {
        self.titles.len()
    }

    pub fn contains(&self, docname: &str) -> bool {
        self.titles.contains_key(docname)
    }

    /// Index one page. Feeding a docname again replaces its previous words.
    pub fn feed(
        &mut self,
        docname: &str,
        filename: &str,
        title: &str,
        headings: &[String],
        text: &str,
    ) {
        if self.remove(docname) {
            tracing::debug!(docname, "replacing previously fed document");
        }
        self.titles.insert(docname.to_string(), title.to_string());
        self.filenames
            .insert(docname.to_string(), filename.to_string());

        let title_words = std::iter::once(title)
            .chain(headings.iter().map(String::as_str))
            .flat_map(split_words);
        for word in title_words {
            let stem = stem_lower(word);
            let key = if word_filter(&stem) {
                stem
            } else if word_filter(word) {
                word.to_string()
            } else {
                continue;
            };
            add(&mut self.title_mapping, key, docname);
        }

        for word in split_words(text) {
            let mut key = stem_lower(word);
            if !word_filter(&key) && word_filter(word) {
                key = word.to_string();
            }
            let in_title = self
                .title_mapping
                .get(&key)
                .is_some_and(|docs| docs.contains(docname));
            if word_filter(&key) && !in_title {
                add(&mut self.mapping, key, docname);
            }
        }
    }

    /// Register an object documented on `docname`. Negative priorities are
    /// accepted here and left out of the frozen index.
    pub fn feed_object(&mut self, docname: &str, object: ObjectInput) {
        self.objects
            .entry(docname.to_string())
            .or_default()
            .insert(object.name.clone(), object);
    }

    /// Feed a loaded document and its objects.
    pub fn add_document(&mut self, doc: &Document) {
        self.feed(
            &doc.docname,
            &doc.filename,
            &doc.title,
            &doc.headings,
            &doc.text,
        );
        for object in &doc.objects {
            self.feed_object(&doc.docname, object.clone());
        }
    }

    /// Forget a document. Returns whether it was present.
    pub fn remove(&mut self, docname: &str) -> bool {
        let present = self.titles.remove(docname).is_some();
        self.filenames.remove(docname);
        self.objects.remove(docname);
        if present {
            for mapping in [&mut self.mapping, &mut self.title_mapping] {
                mapping.retain(|_, docs| {
                    docs.remove(docname);
                    !docs.is_empty()
                });
            }
        }
        present
    }

    /// Drop every document not listed in `keep`.
    pub fn prune<I, S>(&mut self, keep: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keep: HashSet<String> = keep.into_iter().map(|s| s.as_ref().to_string()).collect();
        let stale: Vec<String> = self
            .titles
            .keys()
            .filter(|d| !keep.contains(*d))
            .cloned()
            .collect();
        for docname in &stale {
            self.remove(docname);
        }
        if !stale.is_empty() {
            tracing::debug!(removed = stale.len(), "pruned documents");
        }
    }

    /// Produce the index: documents in docname order, single-document posting
    /// lists as bare integers.
    pub fn freeze(&self) -> SearchIndex {
        let docnames: Vec<String> = self.titles.keys().cloned().collect();
        let positions: BTreeMap<&str, DocId> = self
            .titles
            .keys()
            .enumerate()
            .map(|(i, d)| (d.as_str(), DocId(i as u32)))
            .collect();

        let titles = self.titles.values().cloned().collect();
        let filenames = docnames
            .iter()
            .map(|d| self.filenames.get(d).cloned().unwrap_or_default())
            .collect();

        let mut index = SearchIndex {
            terms: freeze_mapping(&self.mapping, &positions),
            titleterms: freeze_mapping(&self.title_mapping, &positions),
            docnames,
            filenames,
            titles,
            envversion: self.envversion.clone(),
            ..Default::default()
        };
        self.freeze_objects(&positions, &mut index);

        tracing::debug!(
            docs = index.doc_count(),
            terms = index.terms.len(),
            titleterms = index.titleterms.len(),
            objects = index.object_count(),
            "froze index"
        );
        index
    }

    fn freeze_objects(&self, positions: &BTreeMap<&str, DocId>, index: &mut SearchIndex) {
        // Sorted by domain, then name, so objtype numbering is deterministic.
        let mut visible: Vec<(&str, &ObjectInput)> = self
            .objects
            .iter()
            .flat_map(|(docname, objs)| objs.values().map(move |o| (docname.as_str(), o)))
            .filter(|(_, o)| o.priority >= 0 && !o.name.is_empty())
            .collect();
        visible.sort_by(|(da, a), (db, b)| {
            (&a.domain, &a.name, &a.objtype, da).cmp(&(&b.domain, &b.name, &b.objtype, db))
        });

        let mut type_ids: BTreeMap<(&str, &str), u32> = BTreeMap::new();
        for (docname, object) in visible {
            let Some(&doc) = positions.get(docname) else {
                continue;
            };
            let next_id = type_ids.len() as u32;
            let objtype = *type_ids
                .entry((object.domain.as_str(), object.objtype.as_str()))
                .or_insert_with(|| {
                    index
                        .objtypes
                        .insert(next_id, format!("{}:{}", object.domain, object.objtype));
                    index.objnames.insert(
                        next_id,
                        ObjName {
                            domain: object.domain.clone(),
                            objtype: object.objtype.clone(),
                            label: object.label().to_string(),
                        },
                    );
                    next_id
                });

            let (prefix, name) = match object.name.rsplit_once('.') {
                Some((prefix, name)) => (prefix, name),
                None => ("", object.name.as_str()),
            };
            index.objects.entry(prefix.to_string()).or_default().insert(
                name.to_string(),
                ObjectEntry {
                    doc,
                    objtype,
                    priority: object.priority,
                    anchor: short_anchor(object),
                },
            );
        }
    }
}

fn add(mapping: &mut Mapping, key: String, docname: &str) {
    mapping.entry(key).or_default().insert(docname.to_string());
}

fn freeze_mapping(mapping: &Mapping, positions: &BTreeMap<&str, DocId>) -> TermMap {
    mapping
        .iter()
        .filter_map(|(term, docs)| {
            let ids: Vec<DocId> = docs
                .iter()
                .filter_map(|d| positions.get(d.as_str()).copied())
                .collect();
            (!ids.is_empty()).then(|| (term.clone(), PostingList::from_docs(ids)))
        })
        .collect()
}

/// `""` when the anchor is the full name, `"-"` when it is `type-fullname`.
fn short_anchor(object: &ObjectInput) -> String {
    let anchor = object.anchor();
    if anchor == object.name {
        String::new()
    } else if anchor.strip_prefix(object.objtype.as_str()).and_then(|s| s.strip_prefix('-'))
        == Some(object.name.as_str())
    {
        "-".to_string()
    } else {
        anchor.to_string()
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: whole-index checks and the validated wrapper.
//!
//! Two complementary entry points:
//!
//! 1. [`verify_index`] walks the entire index and collects *every* violation.
//!    This is what `sphindex verify` prints.
//!
//! 2. [`WellFormedIndex`] runs the same walk, stops at the first fatal error,
//!    and hands back a type whose lookups cannot go out of bounds.
//!
//! Negative `envversion` values never reach this layer: they fail
//! deserialization as a schema error.

mod types;

pub use types::*;

use crate::search::full_name;
use crate::types::{PostingList, SearchIndex, TermMap};

/// Everything wrong with an index, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// Broken references. Searches over this index can return garbage.
    pub errors: Vec<InvariantError>,
    /// Untidy but harmless: unsorted or duplicated postings.
    pub warnings: Vec<InvariantError>,
}

impl VerificationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, err: InvariantError) {
        if err.is_fatal() {
            self.errors.push(err);
        } else {
            self.warnings.push(err);
        }
    }
}

/// Check every invariant of `index` and report all violations.
pub fn verify_index(index: &SearchIndex) -> VerificationReport {
    let mut report = VerificationReport::default();
    let doc_count = index.docnames.len();

    if index.filenames.len() != doc_count || index.titles.len() != doc_count {
        report.push(InvariantError::MismatchedLengths {
            docnames: doc_count,
            filenames: index.filenames.len(),
            titles: index.titles.len(),
        });
    }

    check_terms(&mut report, "terms", &index.terms, doc_count);
    check_terms(&mut report, "titleterms", &index.titleterms, doc_count);

    for (prefix, names) in &index.objects {
        for (name, entry) in names {
            if entry.doc.as_usize() >= doc_count {
                report.push(InvariantError::DocOutOfRange {
                    field: "objects",
                    key: full_name(prefix, name),
                    doc: entry.doc.get(),
                    doc_count,
                });
            }
            if !index.objtypes.contains_key(&entry.objtype) {
                report.push(InvariantError::UnknownObjType {
                    prefix: prefix.clone(),
                    name: name.clone(),
                    objtype: entry.objtype,
                });
            }
        }
    }

    let objtypes = index.objtypes.keys();
    let objnames = index.objnames.keys();
    for objtype in objtypes.filter(|k| !index.objnames.contains_key(*k)) {
        report.push(InvariantError::MismatchedObjTypes { objtype: *objtype });
    }
    for objtype in objnames.filter(|k| !index.objtypes.contains_key(*k)) {
        report.push(InvariantError::MismatchedObjTypes { objtype: *objtype });
    }

    if !report.is_ok() {
        tracing::debug!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "index failed verification"
        );
    }
    report
}

fn check_terms(
    report: &mut VerificationReport,
    field: &'static str,
    terms: &TermMap,
    doc_count: usize,
) {
    for (term, list) in terms {
        if list.is_empty() {
            report.push(InvariantError::EmptyPostingList {
                field,
                term: term.clone(),
            });
            continue;
        }

        for doc in list.docs().filter(|d| d.as_usize() >= doc_count) {
            report.push(InvariantError::DocOutOfRange {
                field,
                key: term.clone(),
                doc: doc.get(),
                doc_count,
            });
        }

        if let PostingList::Many(postings) = list {
            let mut sorted = true;
            for pair in postings.windows(2) {
                if pair[0].doc == pair[1].doc {
                    report.push(InvariantError::DuplicatePosting {
                        field,
                        term: term.clone(),
                        doc: pair[0].doc.get(),
                    });
                } else if pair[0].doc > pair[1].doc {
                    sorted = false;
                }
            }
            if !sorted {
                report.push(InvariantError::UnsortedPostings {
                    field,
                    term: term.clone(),
                });
            }
        }
    }
}

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures to avoid duplication.

#![doc(hidden)]

use std::collections::BTreeMap;

use crate::build::Document;
use crate::envversion::EnvVersion;
use crate::types::{DocId, ObjName, ObjectEntry, Posting, PostingList, SearchIndex};

fn one(doc: u32) -> PostingList {
    PostingList::One(DocId(doc))
}

fn many(docs: &[u32]) -> PostingList {
    PostingList::Many(docs.iter().map(|&d| Posting::new(d)).collect())
}

/// A small, hand-written, well-formed index with three pages.
///
/// | id | docname | title           |
/// |----|---------|-----------------|
/// | 0  | `api`   | `API Reference` |
/// | 1  | `guide` | `User Guide`    |
/// | 2  | `index` | `Welcome`       |
///
/// `api` is a title term of page 0 and a body term of pages 1 and 2, which is
/// what the ranking tests lean on.
pub fn sample_index() -> SearchIndex {
    let terms = BTreeMap::from([
        ("api".to_string(), many(&[1, 2])),
        ("authent".to_string(), many(&[0, 1])),
        ("endpoint".to_string(), one(0)),
        ("guid".to_string(), one(2)),
        ("instal".to_string(), many(&[1, 2])),
        ("quickstart".to_string(), one(2)),
        ("token".to_string(), many(&[0, 1, 2])),
    ]);
    let titleterms = BTreeMap::from([
        ("api".to_string(), one(0)),
        ("guid".to_string(), one(1)),
        ("refer".to_string(), one(0)),
        ("user".to_string(), one(1)),
        ("welcom".to_string(), one(2)),
    ]);

    let mut objects = BTreeMap::new();
    objects.insert(
        "sphindex.format".to_string(),
        BTreeMap::from([(
            "parse_index".to_string(),
            ObjectEntry {
                doc: DocId(0),
                objtype: 0,
                priority: 1,
                anchor: String::new(),
            },
        )]),
    );
    objects.insert(
        String::new(),
        BTreeMap::from([(
            "sphindex".to_string(),
            ObjectEntry {
                doc: DocId(0),
                objtype: 1,
                priority: 0,
                anchor: "-".to_string(),
            },
        )]),
    );

    SearchIndex {
        docnames: vec!["api".into(), "guide".into(), "index".into()],
        filenames: vec!["api.rst".into(), "guide.rst".into(), "index.rst".into()],
        titles: vec!["API Reference".into(), "User Guide".into(), "Welcome".into()],
        terms,
        titleterms,
        envversion: EnvVersion::sphinx3(),
        objects,
        objnames: BTreeMap::from([
            (0, ObjName::from(("py".into(), "function".into(), "Python function".into()))),
            (1, ObjName::from(("py".into(), "module".into(), "Python module".into()))),
        ]),
        objtypes: BTreeMap::from([(0, "py:function".into()), (1, "py:module".into())]),
    }
}

/// Create a document with no headings or objects.
pub fn make_doc(docname: &str, title: &str, text: &str) -> Document {
    Document {
        docname: docname.to_string(),
        filename: format!("{}.rst", docname),
        title: title.to_string(),
        headings: Vec::new(),
        text: text.to_string(),
        objects: Vec::new(),
    }
}

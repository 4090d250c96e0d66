//! Read, verify, query and regenerate Sphinx `searchindex.js` files.
//!
//! Sphinx ships its full-text search as a single JavaScript file: a call to
//! `Search.setIndex({...})` whose argument holds the document table, two
//! inverted indexes (body and title terms, Porter-stemmed), and a table of
//! documented objects. This crate treats that file as a data format.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  format/    │────▶│   types.rs   │────▶│  verify/    │
//! │ (parse_index│     │ (SearchIndex,│     │ (verify_    │
//! │  dump_index)│     │  PostingList)│     │  index,     │
//! └─────────────┘     └──────────────┘     │  WellFormed │
//!        ▲                   │             │  Index)     │
//!        │                   ▼             └─────────────┘
//! ┌─────────────┐     ┌──────────────┐            │
//! │   build/    │     │  text.rs +   │            ▼
//! │ (IndexBuil- │────▶│  stemmer.rs  │     ┌─────────────┐
//! │  der, run_  │     │ (split, stop,│────▶│  search/ +  │
//! │  build)     │     │  stem)       │     │  scoring/   │
//! └─────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use sphindex::{load_index, search, Query, Scorer, WellFormedIndex};
//!
//! let index = WellFormedIndex::new(load_index("_build/html/searchindex.js")?)?;
//! for hit in search(&index, &Query::parse("install -windows"), &Scorer::default()) {
//!     println!("{} {}", hit.score, hit.title);
//! }
//! ```

pub mod build;
pub mod envversion;
pub mod error;
pub mod format;
pub mod inspect;
pub mod scoring;
pub mod search;
pub mod stemmer;
pub mod text;
pub mod types;
pub mod verify;

pub mod testing;

pub use build::{run_build, BuildOptions, BuildSummary, Document, IndexBuilder, InputManifest};
pub use envversion::{check_env_version, EnvVersion, Staleness};
pub use error::{Error, Result};
pub use format::{dump_index, load_index, parse_index, save_index, INDEX_FILENAME};
pub use inspect::IndexStats;
pub use scoring::Scorer;
pub use search::{lookup, search, MatchKind, Query, SearchResult};
pub use stemmer::stem;
pub use types::{DocId, DocRef, ObjName, ObjectEntry, Posting, PostingList, SearchIndex};
pub use verify::{verify_index, InvariantError, VerificationReport, WellFormedIndex};

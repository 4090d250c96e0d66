// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Environment version markers and staleness detection.
//!
//! Sphinx stamps every index with the schema version of each domain plus its
//! own environment version. A reader that expects a different set of numbers
//! must treat the file as stale and regenerate it; there is no migration path.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered `extension name -> schema version` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvVersion(pub BTreeMap<String, u32>);

impl EnvVersion {
    pub fn new() -> Self {
        Self::default()
    }

    /// The environment map written by Sphinx 3.x (environment version 56).
    pub fn sphinx3() -> Self {
        [
            ("sphinx.domains.c", 2),
            ("sphinx.domains.changeset", 1),
            ("sphinx.domains.citation", 1),
            ("sphinx.domains.cpp", 5),
            ("sphinx.domains.index", 1),
            ("sphinx.domains.javascript", 2),
            ("sphinx.domains.math", 2),
            ("sphinx.domains.python", 3),
            ("sphinx.domains.rst", 2),
            ("sphinx.domains.std", 2),
            ("sphinx", 56),
        ]
        .into_iter()
        .collect()
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    pub fn insert(&mut self, name: impl Into<String>, version: u32) {
        self.0.insert(name.into(), version);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The core environment version (`sphinx` key), if present.
    pub fn core(&self) -> Option<u32> {
        self.get("sphinx")
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for EnvVersion {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        EnvVersion(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A version that differs between the index and the expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChange {
    pub name: String,
    pub found: u32,
    pub expected: u32,
}

/// Outcome of comparing an index's environment against an expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    Current,
    Stale {
        changed: Vec<VersionChange>,
        /// Expected extensions the index does not mention.
        missing: Vec<String>,
        /// Extensions the index mentions that are not expected.
        extra: Vec<String>,
    },
}

impl Staleness {
    pub fn is_current(&self) -> bool {
        matches!(self, Staleness::Current)
    }
}

impl fmt::Display for Staleness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Staleness::Current => write!(f, "current"),
            Staleness::Stale {
                changed,
                missing,
                extra,
            } => {
                let mut parts = Vec::new();
                for c in changed {
                    parts.push(format!("{} {} != {}", c.name, c.found, c.expected));
                }
                for name in missing {
                    parts.push(format!("{} missing", name));
                }
                for name in extra {
                    parts.push(format!("{} unexpected", name));
                }
                write!(f, "stale ({})", parts.join(", "))
            }
        }
    }
}

/// Compare the environment found in an index against the expected one.
///
/// Any difference makes the index stale, including extensions that appear on
/// only one side.
pub fn check_env_version(found: &EnvVersion, expected: &EnvVersion) -> Staleness {
    let mut changed = Vec::new();
    let mut missing = Vec::new();
    let mut extra = Vec::new();

    for (name, &want) in &expected.0 {
        match found.0.get(name) {
            Some(&have) if have == want => {}
            Some(&have) => changed.push(VersionChange {
                name: name.clone(),
                found: have,
                expected: want,
            }),
            None => missing.push(name.clone()),
        }
    }
    for name in found.0.keys() {
        if !expected.0.contains_key(name) {
            extra.push(name.clone());
        }
    }

    if changed.is_empty() && missing.is_empty() && extra.is_empty() {
        Staleness::Current
    } else {
        tracing::debug!(
            changed = changed.len(),
            missing = missing.len(),
            extra = extra.len(),
            "environment version mismatch"
        );
        Staleness::Stale {
            changed,
            missing,
            extra,
        }
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The numbers behind search ranking.
//!
//! Scores are small integers added together. An object whose name matches
//! exactly gets `obj_name_match` plus a bonus for its priority; a page gets the
//! best score among the query words it matched.
//!
//! # Default weights
//!
//! | Weight              | Value | Awarded for                              |
//! |---------------------|-------|------------------------------------------|
//! | `obj_name_match`    | 11    | query equals an object's (last) name     |
//! | `obj_partial_match` | 6     | query is inside an object's last name    |
//! | `obj_prio[0]`       | 15    | important objects                        |
//! | `obj_prio[1]`       | 5     | default-priority objects                 |
//! | `obj_prio[2]`       | -5    | unimportant objects                      |
//! | `obj_prio_default`  | 0     | any other priority                       |
//! | `title`             | 15    | word is a title term of the page         |
//! | `partial_title`     | 7     | word is inside a title term              |
//! | `term`              | 5     | word is a body term of the page          |
//! | `partial_term`      | 2     | word is inside a body term               |
//!
//! Title hits outrank body hits by construction: `partial_title > term`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ranking weights.
///
/// Every field has a default, so a scorer file only needs the weights it
/// changes:
///
/// ```json
/// { "title": 20, "objPrio": { "0": 30 } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scorer {
    pub obj_name_match: i32,
    pub obj_partial_match: i32,
    /// Bonus by object priority. Replaces the default table when given.
    pub obj_prio: BTreeMap<i32, i32>,
    pub obj_prio_default: i32,
    pub title: i32,
    pub partial_title: i32,
    pub term: i32,
    pub partial_term: i32,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            obj_name_match: 11,
            obj_partial_match: 6,
            obj_prio: BTreeMap::from([(0, 15), (1, 5), (2, -5)]),
            obj_prio_default: 0,
            title: 15,
            partial_title: 7,
            term: 5,
            partial_term: 2,
        }
    }
}

impl Scorer {
    /// Parse a JSON scorer override.
    pub fn from_json(src: &str) -> Result<Self> {
        Ok(serde_json::from_str(src)?)
    }

    /// Load a JSON scorer override from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let scorer = Self::from_json(&src)?;
        tracing::debug!(path = %path.display(), ?scorer, "loaded scorer");
        Ok(scorer)
    }

    /// Bonus for an object of the given priority.
    pub fn priority_bonus(&self, priority: i32) -> i32 {
        self.obj_prio
            .get(&priority)
            .copied()
            .unwrap_or(self.obj_prio_default)
    }
}

//! Build state kept next to `searchindex.js`.
//!
//! A document file only names its docname inside the JSON, so an incremental
//! build cannot skip reading a file unless it remembers which docname the file
//! produced last time. That mapping is written after every build.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Written into the output directory beside the index.
pub const STATE_FILENAME: &str = ".sphindex-state.json";

pub const STATE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BuildState {
    pub version: u32,
    /// Manifest entry -> docname it produced.
    pub documents: BTreeMap<String, String>,
}

impl Default for BuildState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            documents: BTreeMap::new(),
        }
    }
}

impl BuildState {
    /// Read the state from `output_dir`. Missing or unusable state yields
    /// `None`, and every document is read again.
    pub fn load(output_dir: &Path) -> Option<Self> {
        let path = output_dir.join(STATE_FILENAME);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<BuildState>(&content) {
            Ok(state) if state.version == STATE_VERSION => Some(state),
            Ok(state) => {
                tracing::warn!(version = state.version, "ignoring build state of unknown version");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable build state");
                None
            }
        }
    }

    pub fn save(&self, output_dir: &Path) -> Result<()> {
        let path = output_dir.join(STATE_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|e| Error::io(&path, e))
    }
}

/// Modification time of `path`, if the filesystem reports one.
pub fn modified(path: &Path) -> Option<SystemTime> {
    let Ok(metadata) = fs::metadata(path) else {
        return None;
    };
    metadata.modified().ok()
}

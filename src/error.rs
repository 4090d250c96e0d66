// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Library error type.
//!
//! Everything fallible in the crate returns [`Result`]. The variants map onto
//! the places an index can go wrong: the file is missing, the literal does not
//! parse, the literal parses but has the wrong shape, or the shape is right and
//! the cross-references are broken.

use std::path::PathBuf;

use thiserror::Error;

use crate::verify::InvariantError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not a valid `Search.setIndex(...)` literal.
    #[error("parse error at byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// The literal parsed, but a field has the wrong type or is missing.
    #[error("index schema mismatch: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("index invariant violated: {0}")]
    Invariant(#[from] InvariantError),

    #[error("invalid manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("invalid document {path}: {message}")]
    Document { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            offset,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sphindex command-line interface.
//!
//! `index` builds a `searchindex.js` from a directory of JSON documents. The
//! other subcommands read an existing index: `inspect` summarizes it, `verify`
//! checks its structure, `stale` compares its environment versions against the
//! current ones, and `lookup` / `search` query it the way the Sphinx search
//! page does.

pub mod display;
pub mod logging;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sphindex",
    about = "Build, check and query Sphinx searchindex.js files",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Location of an existing index.
#[derive(Args, Clone, Debug)]
pub struct IndexArg {
    /// Path to searchindex.js
    #[arg(
        short = 'f',
        long = "index",
        env = "SPHINDEX_INDEX",
        default_value = "searchindex.js"
    )]
    pub path: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build searchindex.js from a directory of JSON documents
    Index {
        /// Input directory containing manifest.json and document files
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for searchindex.js
        #[arg(short, long)]
        output: PathBuf,

        /// Update the existing index in the output directory instead of
        /// starting over
        ///
        /// Documents missing from the manifest are dropped. A stale index
        /// (different environment versions) is rebuilt from scratch.
        #[arg(long)]
        incremental: bool,
    },

    /// Show counts, sizes and environment versions of an index
    Inspect {
        #[command(flatten)]
        index: IndexArg,

        /// Number of most widespread terms to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Check an index for structural errors; exits 1 if any are found
    Verify {
        #[command(flatten)]
        index: IndexArg,
    },

    /// Compare an index's environment versions with the current ones;
    /// exits 1 if it is stale
    Stale {
        #[command(flatten)]
        index: IndexArg,
    },

    /// List documents containing a term
    Lookup {
        /// Term to look up
        term: String,

        /// Stem the term first, as the search page does
        #[arg(long)]
        stem: bool,

        #[command(flatten)]
        index: IndexArg,
    },

    /// Search an index the way the Sphinx search page does
    Search {
        /// Search query; prefix a word with - to exclude pages containing it
        query: String,

        /// Maximum number of results to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// JSON file overriding the built-in scorer weights
        #[arg(long)]
        scorer: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        index: IndexArg,
    },
}

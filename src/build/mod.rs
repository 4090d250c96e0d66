pub mod builder;
pub mod document;
pub mod manifest;
pub mod parallel;
pub mod state;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::envversion::check_env_version;
use crate::error::{Error, Result};
use crate::format::{load_index, save_index, INDEX_FILENAME};

pub use builder::*;
pub use document::*;
pub use manifest::*;
pub use parallel::*;
pub use state::*;

/// Build settings beyond the input and output directories.
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    /// Start from the existing `searchindex.js` in the output directory.
    /// Entries older than that file are not read again; documents no longer
    /// in the manifest are dropped.
    pub incremental: bool,
}

/// What a build produced.
#[derive(Clone, Debug)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub docs: usize,
    /// Documents read from disk this run.
    pub loaded: usize,
    /// Documents carried over from the previous index without reading them.
    pub reused: usize,
    pub terms: usize,
    pub titleterms: usize,
    pub objects: usize,
    pub bytes: usize,
}

/// Create a progress style for the main progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

fn read_manifest(input_path: &Path) -> Result<InputManifest> {
    let manifest_path = input_path.join("manifest.json");
    let content = fs::read_to_string(&manifest_path).map_err(|e| Error::io(&manifest_path, e))?;
    let manifest: InputManifest =
        serde_json::from_str(&content).map_err(|e| Error::Manifest {
            path: manifest_path.clone(),
            message: e.to_string(),
        })?;
    if manifest.version != MANIFEST_VERSION {
        return Err(Error::Manifest {
            path: manifest_path,
            message: format!(
                "unsupported version {} (expected {})",
                manifest.version, MANIFEST_VERSION
            ),
        });
    }
    Ok(manifest)
}

/// Start from the previous index when asked to and when it is still current.
fn seed_builder(
    output_file: &Path,
    manifest: &InputManifest,
    options: &BuildOptions,
) -> Result<IndexBuilder> {
    let envversion = manifest.envversion();
    if !options.incremental || !output_file.exists() {
        return Ok(IndexBuilder::new(envversion));
    }

    let previous = load_index(output_file)?;
    let staleness = check_env_version(&previous.envversion, &envversion);
    if !staleness.is_current() {
        tracing::warn!(%staleness, "previous index is stale; rebuilding from scratch");
        return Ok(IndexBuilder::new(envversion));
    }
    IndexBuilder::from_index(&previous)
}

/// Which manifest entries to read, and which to carry over unread.
#[derive(Debug, Default)]
struct LoadPlan {
    /// entry -> docname, for entries the seeded builder already holds.
    reused: BTreeMap<String, String>,
    load: Vec<String>,
}

/// An entry is reused when the previous build recorded its docname, the
/// builder was seeded with that document, and the file is older than the
/// previous index.
fn plan_loads(
    input_path: &Path,
    output_path: &Path,
    output_file: &Path,
    manifest: &InputManifest,
    builder: &IndexBuilder,
    options: &BuildOptions,
) -> LoadPlan {
    let previous = if options.incremental {
        BuildState::load(output_path).zip(modified(output_file))
    } else {
        None
    };
    let Some((state, built_at)) = previous else {
        return LoadPlan {
            reused: BTreeMap::new(),
            load: manifest.documents.clone(),
        };
    };

    let mut plan = LoadPlan::default();
    for entry in &manifest.documents {
        let unchanged = modified(&input_path.join(entry)).is_some_and(|t| t < built_at);
        match state.documents.get(entry) {
            Some(docname) if unchanged && builder.contains(docname) => {
                plan.reused.insert(entry.clone(), docname.clone());
            }
            _ => plan.load.push(entry.clone()),
        }
    }
    tracing::debug!(
        reused = plan.reused.len(),
        load = plan.load.len(),
        "planned incremental build"
    );
    plan
}

/// Read `manifest.json` from `input_dir`, index every listed document and write
/// `searchindex.js` into `output_dir`.
pub fn run_build(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &BuildOptions,
) -> Result<BuildSummary> {
    let input_path = input_dir.as_ref();
    let output_path = output_dir.as_ref();
    let output_file = output_path.join(INDEX_FILENAME);

    // 1. Read manifest
    let manifest = read_manifest(input_path)?;
    tracing::debug!(documents = manifest.documents.len(), "read manifest");

    // 2. Seed from the previous index and decide what to read
    let mut builder = seed_builder(&output_file, &manifest, options)?;
    let plan = plan_loads(
        input_path,
        output_path,
        &output_file,
        &manifest,
        &builder,
        options,
    );

    // 3. Load documents in parallel with progress bar
    #[cfg(feature = "parallel")]
    let documents = {
        let multi = MultiProgress::new();
        let load_pb = multi.add(ProgressBar::new(plan.load.len() as u64));
        load_pb.set_style(create_progress_style());
        load_pb.set_prefix("Loading");
        load_pb.set_message("documents...");
        let documents = load_documents_with_progress(input_path, &plan.load, &load_pb)?;
        load_pb.finish_with_message(format!("loaded {} documents", documents.len()));
        documents
    };
    #[cfg(not(feature = "parallel"))]
    let documents = load_documents_with_progress(input_path, &plan.load)?;

    if manifest.documents.is_empty() {
        tracing::warn!("manifest lists no documents; writing an empty index");
    }

    // 4. Feed the builder
    builder.prune(
        plan.reused
            .values()
            .map(String::as_str)
            .chain(documents.iter().map(|d| d.document.docname.as_str())),
    );
    for loaded in &documents {
        builder.add_document(&loaded.document);
    }
    let index = builder.freeze();

    // 5. Write the index, then the state that refers to it
    fs::create_dir_all(output_path).map_err(|e| Error::io(output_path, e))?;
    save_index(&output_file, &index)?;
    let bytes = fs::metadata(&output_file)
        .map(|m| m.len() as usize)
        .map_err(|e| Error::io(&output_file, e))?;

    let mut state = BuildState {
        documents: plan.reused,
        ..Default::default()
    };
    let reused = state.documents.len();
    for loaded in &documents {
        state
            .documents
            .insert(loaded.entry.clone(), loaded.document.docname.clone());
    }
    state.save(output_path)?;

    let summary = BuildSummary {
        output: output_file,
        docs: index.doc_count(),
        loaded: documents.len(),
        reused,
        terms: index.terms.len(),
        titleterms: index.titleterms.len(),
        objects: index.object_count(),
        bytes,
    };
    tracing::info!(
        docs = summary.docs,
        loaded = summary.loaded,
        reused = summary.reused,
        terms = summary.terms,
        bytes = summary.bytes,
        "build complete"
    );
    Ok(summary)
}

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sphindex::text::stem_lower;
use sphindex::{
    check_env_version, load_index, lookup, parse_index, run_build, search, verify_index,
    BuildOptions, EnvVersion, IndexStats, Query, Scorer, SearchIndex, Staleness, WellFormedIndex,
};

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);

    let outcome = match cli.command {
        Commands::Index {
            input,
            output,
            incremental,
        } => cmd_index(&input, &output, incremental),
        Commands::Inspect { index, top } => cmd_inspect(&index.path, top),
        Commands::Verify { index } => cmd_verify(&index.path),
        Commands::Stale { index } => cmd_stale(&index.path),
        Commands::Lookup { term, stem, index } => cmd_lookup(&index.path, &term, stem),
        Commands::Search {
            query,
            limit,
            scorer,
            json,
            index,
        } => cmd_search(&index.path, &query, limit, scorer.as_deref(), json),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", themed(RED, &[BOLD], "error:"), e);
            ExitCode::FAILURE
        }
    }
}

fn load(path: &Path) -> Result<SearchIndex> {
    load_index(path).with_context(|| format!("cannot load {}", path.display()))
}

fn cmd_index(input: &Path, output: &Path, incremental: bool) -> Result<ExitCode> {
    let options = BuildOptions { incremental };
    let summary = run_build(input, output, &options)
        .with_context(|| format!("build from {} failed", input.display()))?;

    println!();
    section_top("BUILD");
    row(&format!(
        "  {:<14}{}",
        "Output",
        truncate_path(&summary.output.display().to_string(), 60)
    ));
    row(&format!("  {:<14}{}", "Documents", summary.docs));
    if incremental {
        row(&format!(
            "  {:<14}{} read, {} unchanged",
            "Incremental", summary.loaded, summary.reused
        ));
    }
    row(&format!("  {:<14}{}", "Terms", summary.terms));
    row(&format!("  {:<14}{}", "Title terms", summary.titleterms));
    row(&format!("  {:<14}{}", "Objects", summary.objects));
    row(&format!("  {:<14}{}", "Size", format_size(summary.bytes)));
    section_bot();
    Ok(ExitCode::SUCCESS)
}

fn cmd_inspect(path: &Path, top: usize) -> Result<ExitCode> {
    let raw = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let text = std::str::from_utf8(&raw)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
    let index = parse_index(text).with_context(|| format!("cannot parse {}", path.display()))?;
    let stats = IndexStats::collect(&index, &raw, top);
    let report = verify_index(&index);
    let staleness = check_env_version(&index.envversion, &EnvVersion::sphinx3());

    println!();
    double_header();
    title(&format!(
        "SEARCH INDEX: {}",
        truncate_path(&path.display().to_string(), 50)
    ));
    double_footer();
    println!();

    section_top("CONTENTS");
    row(&format!("  {:<16}{:>10}", "Documents", stats.docs));
    row(&format!("  {:<16}{:>10}", "Terms", stats.terms));
    row(&format!("  {:<16}{:>10}", "Title terms", stats.titleterms));
    row(&format!("  {:<16}{:>10}", "Postings", stats.postings));
    row(&format!("  {:<16}{:>10}", "Objects", stats.objects));
    row(&format!("  {:<16}{:>10}", "Object types", stats.objtypes));

    section_mid("SIZE");
    row(&format!(
        "  {:<16}{}",
        "Raw",
        pad_left(&format_size(stats.raw_bytes), 10)
    ));
    match stats.brotli_bytes {
        Some(compressed) => row(&format!(
            "  {:<16}{}  {} saved",
            "Brotli",
            pad_left(&format_size(compressed), 10),
            savings_colored(stats.raw_bytes, compressed)
        )),
        None => row(&format!("  {:<16}{}", "Brotli", pad_left("n/a", 10))),
    }
    row(&format!("  {:<16}{:>10}", "CRC32", format!("{:08x}", stats.crc32)));

    section_mid("ENVIRONMENT");
    for (name, version) in index.envversion.iter() {
        row(&format!("  {:<32}{:>4}", name, version));
    }
    let env_status = if staleness.is_current() {
        Status::Ok
    } else {
        Status::Warn
    };
    row(&format!("  {} {}", status_badge(env_status), staleness));

    section_mid("STRUCTURE");
    let structure_status = if !report.is_ok() {
        Status::Fail
    } else if !report.warnings.is_empty() {
        Status::Warn
    } else {
        Status::Ok
    };
    row(&format!(
        "  {} {} errors, {} warnings",
        status_badge(structure_status),
        report.errors.len(),
        report.warnings.len()
    ));

    if !stats.top_terms.is_empty() {
        section_mid("TOP TERMS");
        for (term, docs) in &stats.top_terms {
            row(&format!(
                "  {}{:>6} docs",
                pad_right(&themed(YELLOW, &[], term), 24),
                docs
            ));
        }
    }
    section_bot();
    Ok(ExitCode::SUCCESS)
}

fn cmd_verify(path: &Path) -> Result<ExitCode> {
    let index = load(path)?;
    let report = verify_index(&index);

    for err in &report.errors {
        println!("{} {}", status_badge(Status::Fail), err);
    }
    for warning in &report.warnings {
        println!("{} {}", status_badge(Status::Warn), warning);
    }

    if report.is_ok() {
        println!(
            "{} {} ({} documents, {} warnings)",
            status_badge(Status::Ok),
            path.display(),
            index.doc_count(),
            report.warnings.len()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} {} errors in {}",
            status_badge(Status::Fail),
            report.errors.len(),
            path.display()
        );
        Ok(ExitCode::FAILURE)
    }
}

fn cmd_stale(path: &Path) -> Result<ExitCode> {
    let index = load(path)?;
    match check_env_version(&index.envversion, &EnvVersion::sphinx3()) {
        Staleness::Current => {
            println!("{} {} is current", status_badge(Status::Ok), path.display());
            Ok(ExitCode::SUCCESS)
        }
        Staleness::Stale {
            changed,
            missing,
            extra,
        } => {
            println!("{} {} is stale", status_badge(Status::Warn), path.display());
            for change in &changed {
                println!(
                    "  {:<32} {} -> {}",
                    change.name, change.found, change.expected
                );
            }
            for name in &missing {
                println!("  {:<32} {}", name, styled(&[DIM], "missing"));
            }
            for name in &extra {
                println!("  {:<32} {}", name, styled(&[DIM], "unexpected"));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_lookup(path: &Path, term: &str, stem: bool) -> Result<ExitCode> {
    let index = load(path)?;
    let key = if stem {
        stem_lower(term)
    } else {
        term.to_string()
    };
    let docs = lookup(&index, &key);
    tracing::debug!(key = %key, hits = docs.len(), "lookup");

    if docs.is_empty() {
        println!("{}", themed(GRAY, &[], &format!("no documents for {:?}", key)));
        return Ok(ExitCode::SUCCESS);
    }
    for doc in docs.into_iter().filter_map(|id| index.doc(id)) {
        println!(
            "{:>5}  {}  {}",
            doc.id.get(),
            pad_right(&themed(CYAN, &[], doc.docname), 32),
            doc.title
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_search(
    path: &Path,
    text: &str,
    limit: usize,
    scorer: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let index = WellFormedIndex::new(load(path)?)
        .with_context(|| format!("{} is malformed; run `sphindex verify`", path.display()))?;
    let scorer = match scorer {
        Some(file) => Scorer::from_file(file)
            .with_context(|| format!("cannot load scorer {}", file.display()))?,
        None => Scorer::default(),
    };
    let query = Query::parse(text);
    let mut results = search(&index, &query, &scorer);
    results.truncate(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(ExitCode::SUCCESS);
    }

    if results.is_empty() {
        println!("{}", themed(GRAY, &[], "no results"));
        return Ok(ExitCode::SUCCESS);
    }
    for result in &results {
        let target = if result.anchor.is_empty() {
            result.filename.clone()
        } else {
            format!("{}#{}", result.filename, result.anchor)
        };
        println!(
            "{} {} {}  {}",
            score_value(result.score),
            pad_right(&kind_badge(result.kind), 8),
            themed(BRIGHT_CYAN, &[BOLD], &result.title),
            themed(GRAY, &[], &truncate_path(&target, 48))
        );
        if !result.description.is_empty() {
            println!("{:>15}{}", "", result.description);
        }
    }
    Ok(ExitCode::SUCCESS)
}

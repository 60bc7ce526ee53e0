//! CLI commands: render, check, resolve, symbols.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write as _};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Error;
use crate::locator;
use crate::marker;
use crate::resolver;
use crate::rewrite::{self, RewriteStats};
use crate::snapshot::Snapshot;
use crate::types::{Link, Reference};

/// Resolve every marker in the inputs without printing the document.
///
/// # Errors
///
/// Returns the first configuration, revision, or resolution error.
pub fn check(config: &Config, inputs: &[PathBuf]) -> Result<(), Error> {
    let base_url = config.base_url()?;
    let snapshot = open_snapshot(config)?;
    let stats = rewrite_inputs(&snapshot, base_url, inputs, &mut io::sink())?;
    println!("All {} markers resolve ({} lines)", stats.markers, stats.lines);
    return Ok(());
}

/// Capture the snapshot once, before any marker is looked at.
///
/// # Errors
///
/// Returns `Error::RevisionUnavailable` if the revision cannot be determined.
fn open_snapshot(config: &Config) -> Result<Snapshot, Error> {
    let provider = config.revision_provider();
    let snapshot = Snapshot::capture(config.root(), provider.as_ref())?;
    tracing::info!(
        revision = snapshot.revision(),
        root = %snapshot.root().display(),
        "pinning links to snapshot"
    );
    return Ok(snapshot);
}

/// Rewrite the inputs (stdin when none are given) to stdout.
///
/// # Errors
///
/// Returns the first configuration, revision, resolution, or I/O error. Lines
/// written before the error stay written.
pub fn render(config: &Config, inputs: &[PathBuf]) -> Result<(), Error> {
    let base_url = config.base_url()?;
    let snapshot = open_snapshot(config)?;
    let mut out = BufWriter::new(io::stdout().lock());
    let result = rewrite_inputs(&snapshot, base_url, inputs, &mut out);
    out.flush()?;
    let stats = result?;
    tracing::debug!(lines = stats.lines, markers = stats.markers, "rendered");
    return Ok(());
}

/// Resolve a single `path[:symbol]` reference and print its link.
///
/// # Errors
///
/// Returns parse, configuration, revision, or resolution errors.
pub fn resolve(config: &Config, reference: &str) -> Result<(), Error> {
    let reference = Reference::parse(reference)?;
    let base_url = config.base_url()?;
    let snapshot = open_snapshot(config)?;
    let link = resolver::resolve(&snapshot, base_url, &reference)?;
    println!("{link}");
    return Ok(());
}

/// Stream each input through the rewriter in order, stopping at the first failure.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if an input cannot be opened, or any rewrite error.
fn rewrite_inputs<W: io::Write>(
    snapshot: &Snapshot,
    base_url: &str,
    inputs: &[PathBuf],
    out: &mut W,
) -> Result<RewriteStats, Error> {
    let mut resolve = |reference: &Reference| -> Result<Link, Error> {
        return resolver::resolve(snapshot, base_url, reference);
    };

    if inputs.is_empty() {
        let stdin = io::stdin().lock();
        return rewrite::rewrite_stream(stdin, Path::new("<stdin>"), out, &mut resolve);
    }

    let mut total = RewriteStats::default();
    for input in inputs {
        let file = File::open(input).map_err(|_err| return Error::FileNotFound { path: input.clone() })?;
        let stats = rewrite::rewrite_stream(BufReader::new(file), input, out, &mut resolve)?;
        total.lines = total.lines.saturating_add(stats.lines);
        total.markers = total.markers.saturating_add(stats.markers);
    }
    return Ok(total);
}

/// List the addressable declarations of a file under the snapshot root.
///
/// # Errors
///
/// Returns `Error::InvalidReference` for a path outside the root, or errors
/// from file reading, language detection, parsing, or JSON output.
pub fn symbols(config: &Config, file: &str, json: bool) -> Result<(), Error> {
    let file = marker::source_path(file)?;
    let declarations = locator::list_declarations(&config.root(), &file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&declarations)?);
        return Ok(());
    }

    for decl in &declarations {
        println!("{}:{}\tL{}\t{}", file.display(), decl.name, decl.line, decl.kind);
    }
    return Ok(());
}

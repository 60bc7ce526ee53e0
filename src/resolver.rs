//! Marker resolution: one entry point for file and symbol references.

use crate::error::Error;
use crate::link;
use crate::locator;
use crate::snapshot::Snapshot;
use crate::types::{Link, Reference};

/// Resolve a reference against the snapshot into its substitution link.
///
/// Whole-file references link to the file; symbol references are located
/// first and link to the declaration's line.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if the path is missing (checked before any
/// parsing), `Error::SymbolNotFound` naming the symbol and the file searched,
/// or any parse error from the locator.
pub fn resolve(snapshot: &Snapshot, base_url: &str, reference: &Reference) -> Result<Link, Error> {
    let Some(symbol) = reference.symbol.as_deref() else {
        return link::file_link(snapshot, base_url, &reference.path);
    };

    let declaration = locator::locate(snapshot, &reference.path, symbol)?;
    tracing::debug!(
        path = %reference.path.display(),
        symbol,
        line = declaration.line,
        kind = %declaration.kind,
        "resolved declaration"
    );
    return link::symbol_link(snapshot, base_url, &reference.path, symbol, declaration.line);
}

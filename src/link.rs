//! Link composition: revision-pinned URLs plus display text.

use std::path::{Component, Path};

use crate::error::Error;
use crate::snapshot::Snapshot;
use crate::types::Link;

/// Link to a whole file (or directory), displayed by its base name.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if `path` does not exist under the snapshot root.
pub fn file_link(snapshot: &Snapshot, base_url: &str, path: &Path) -> Result<Link, Error> {
    snapshot.probe(path)?;
    let display_text = path
        .file_name()
        .map_or_else(|| return url_path(path), |name| return name.to_string_lossy().into_owned());
    return Ok(Link {
        display_text,
        url: tree_url(snapshot, base_url, path),
    });
}

/// Link to line `line` of `path`, displayed as the symbol name.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if `path` does not exist under the snapshot root.
pub fn symbol_link(
    snapshot: &Snapshot,
    base_url: &str,
    path: &Path,
    symbol: &str,
    line: u32,
) -> Result<Link, Error> {
    snapshot.probe(path)?;
    let url = tree_url(snapshot, base_url, path);
    return Ok(Link {
        display_text: symbol.to_string(),
        url: format!("{url}#L{line}"),
    });
}

/// `base/tree/revision/path`, ignoring trailing slashes on the base.
fn tree_url(snapshot: &Snapshot, base_url: &str, path: &Path) -> String {
    let base = base_url.trim_end_matches('/');
    return format!("{base}/tree/{}/{}", snapshot.revision(), url_path(path));
}

/// Join path components with `/` whatever the host separator is.
fn url_path(path: &Path) -> String {
    return path
        .components()
        .filter_map(|c| {
            return match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            };
        })
        .collect::<Vec<_>>()
        .join("/");
}

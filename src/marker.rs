//! Marker syntax: `@@path@@` and `@@path:symbol@@`.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;
use crate::types::Reference;

/// Non-greedy so two markers on one line stay two markers.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
pub static MARKER: LazyLock<Regex> = LazyLock::new(|| return Regex::new(r"@@(.+?)@@").expect("valid regex"));

impl Reference {
    /// Parse the text between the `@@` delimiters.
    /// The first colon separates the path from the symbol.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidReference` for an empty or absolute path, a path
    /// that climbs out of the root, or an empty or non-identifier symbol.
    pub fn parse(marker: &str) -> Result<Self, Error> {
        let invalid = |reason: &str| {
            return Error::InvalidReference {
                marker: marker.to_string(),
                reason: reason.to_string(),
            };
        };

        let (raw_path, symbol) = match marker.split_once(':') {
            None => (marker, None),
            Some((path, symbol)) => (path, Some(symbol)),
        };

        let path = relative_path(raw_path).map_err(invalid)?;

        if let Some(symbol) = symbol
            && !is_identifier(symbol)
        {
            let reason = if symbol.is_empty() { "empty symbol" } else { "symbol is not an identifier" };
            return Err(invalid(reason));
        }

        return Ok(Self {
            path,
            symbol: symbol.map(str::to_string),
        });
    }
}

/// Identifier per UAX #31, plus `$` which JavaScript allows.
fn is_identifier(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let starts = first == '_' || first == '$' || unicode_ident::is_xid_start(first);
    return starts && chars.all(|c| return c == '$' || unicode_ident::is_xid_continue(c));
}

/// Collapse `.` and `..` components in a path without touching the filesystem.
/// Preserves leading `..` when there is nothing left to pop.
fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        push_normalized_component(&mut components, component);
    }
    return components.iter().collect();
}

/// Handle a single path component during normalization.
/// Pops the last component for `..` when possible, preserves it otherwise.
fn push_normalized_component<'a>(components: &mut Vec<Component<'a>>, component: Component<'a>) {
    match component {
        Component::CurDir => {},
        Component::ParentDir => {
            let can_pop = matches!(components.last(), Some(c) if !matches!(c, Component::ParentDir));
            if can_pop {
                components.pop();
            } else {
                components.push(component);
            }
        },
        other => components.push(other),
    }
    return;
}

/// Normalize `raw` into a path that stays inside the source root.
fn relative_path(raw: &str) -> Result<PathBuf, &'static str> {
    if raw.is_empty() {
        return Err("empty path");
    }
    let raw = Path::new(raw);
    if raw.has_root() {
        return Err("path must be relative to the source root");
    }
    let path = normalize_path(raw);
    if path.starts_with("..") {
        return Err("path escapes the source root");
    }
    if path.as_os_str().is_empty() {
        return Err("path names the source root itself");
    }
    return Ok(path);
}

/// Check a bare source path the same way marker paths are checked.
///
/// # Errors
///
/// Returns `Error::InvalidReference` for an empty or absolute path, or one
/// that climbs out of the root.
pub fn source_path(raw: &str) -> Result<PathBuf, Error> {
    return relative_path(raw).map_err(|reason| {
        return Error::InvalidReference {
            marker: raw.to_string(),
            reason: reason.to_string(),
        };
    });
}

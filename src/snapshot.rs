//! The immutable source tree every link is pinned to.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::revision::RevisionProvider;

/// A local checkout plus the revision identifier it corresponds to.
/// Built once at startup and passed by reference to every resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Opaque, non-empty revision identifier (usually a commit hash).
    revision: String,
    /// Directory that marker paths are relative to.
    root: PathBuf,
}

impl Snapshot {
    /// Ask `provider` for the revision of the tree at `root`.
    ///
    /// # Errors
    ///
    /// Returns `Error::RevisionUnavailable` if the provider fails or returns
    /// an empty identifier. Surrounding whitespace is dropped.
    pub fn capture(root: PathBuf, provider: &dyn RevisionProvider) -> Result<Self, Error> {
        let revision = provider.revision(&root)?.trim().to_string();
        if revision.is_empty() {
            return Err(Error::RevisionUnavailable {
                reason: "provider returned an empty revision".to_string(),
                root,
            });
        }
        return Ok(Self::new(root, revision));
    }

    /// Build a snapshot from an already known revision.
    pub const fn new(root: PathBuf, revision: String) -> Self {
        return Self { revision, root };
    }

    /// Check that `path` exists under the root. Directories count.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileNotFound` with the on-disk path if nothing is there.
    pub fn probe(&self, path: &Path) -> Result<(), Error> {
        probe_under(&self.root, path)?;
        return Ok(());
    }

    /// The revision identifier links are pinned to.
    pub fn revision(&self) -> &str {
        return &self.revision;
    }

    /// The local checkout directory.
    pub fn root(&self) -> &Path {
        return &self.root;
    }
}

/// Check that `path` exists under `root` and return where it lives on disk.
///
/// # Errors
///
/// Returns `Error::FileNotFound` with the on-disk path if nothing is there.
pub fn probe_under(root: &Path, path: &Path) -> Result<PathBuf, Error> {
    let disk_path = root.join(path);
    if std::fs::metadata(&disk_path).is_err() {
        return Err(Error::FileNotFound { path: disk_path });
    }
    return Ok(disk_path);
}

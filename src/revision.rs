//! Revision providers: where the snapshot's immutable identifier comes from.

use std::path::Path;
use std::process::Command;

use crate::error::Error;

/// A revision given up front (config or `--revision`), no VCS involved.
#[derive(Debug, Clone)]
pub struct FixedRevision(
    /// The identifier returned verbatim.
    String,
);

impl FixedRevision {
    /// Wrap a known identifier.
    pub fn new(revision: impl Into<String>) -> Self {
        return Self(revision.into());
    }
}

impl RevisionProvider for FixedRevision {
    fn revision(&self, _root: &Path) -> Result<String, Error> {
        return Ok(self.0.clone());
    }
}

/// Reads `HEAD` of the git checkout at the snapshot root.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHead;

impl RevisionProvider for GitHead {
    fn revision(&self, root: &Path) -> Result<String, Error> {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(root)
            .output()
            .map_err(|e| {
                return Error::RevisionUnavailable {
                    reason: format!("cannot run git: {e}"),
                    root: root.to_path_buf(),
                };
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::RevisionUnavailable {
                reason: stderr.trim().to_string(),
                root: root.to_path_buf(),
            });
        }

        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!(root = %root.display(), %hash, "read git HEAD");
        return Ok(hash);
    }
}

/// Supplies the opaque identifier of the tree at a root.
pub trait RevisionProvider {
    /// Return the revision identifier for `root`.
    ///
    /// # Errors
    ///
    /// Returns `Error::RevisionUnavailable` if the identifier cannot be determined.
    fn revision(&self, root: &Path) -> Result<String, Error>;
}

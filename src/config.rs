use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::revision::{FixedRevision, GitHead, RevisionProvider};

/// Project configuration loaded from `.pinref.toml`, with command-line overrides applied.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Hosted repository URL that `/tree/<revision>/<path>` is appended to.
    base_url: Option<String>,
    /// Fixed revision; when absent the checkout's git `HEAD` is used.
    revision: Option<String>,
    /// Local checkout that marker paths are relative to.
    root: Option<PathBuf>,
}

/// Raw TOML structure for `.pinref.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct PinrefTomlConfig {
    /// See [`Config::base_url`].
    base_url: Option<String>,
    /// See [`Config::revision`].
    revision: Option<String>,
    /// See [`Config::root`].
    root: Option<PathBuf>,
}

impl Config {
    /// The base URL every link starts with.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingSetting` if neither the config nor a flag set one.
    pub fn base_url(&self) -> Result<&str, Error> {
        return self
            .base_url
            .as_deref()
            .filter(|url| return !url.trim().is_empty())
            .ok_or(Error::MissingSetting { key: "base_url" });
    }

    /// Load config from `.pinref.toml` in the given directory.
    /// Returns defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed: never silently
    /// falls back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let path = dir.join(".pinref.toml");
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Self::parse(&content);
    }

    /// Parse config from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: PinrefTomlConfig = toml::from_str(content)?;
        return Ok(Self {
            base_url: raw.base_url,
            revision: raw.revision,
            root: raw.root,
        });
    }

    /// The provider for the snapshot revision: the fixed one if configured,
    /// otherwise git.
    pub fn revision_provider(&self) -> Box<dyn RevisionProvider> {
        return match &self.revision {
            None => Box::new(GitHead),
            Some(revision) => Box::new(FixedRevision::new(revision.clone())),
        };
    }

    /// The snapshot root, defaulting to the current directory.
    pub fn root(&self) -> PathBuf {
        return self.root.clone().unwrap_or_else(|| return PathBuf::from("."));
    }

    /// Apply command-line values on top of the file's values.
    #[must_use]
    pub fn with_overrides(
        self,
        base_url: Option<String>,
        revision: Option<String>,
        root: Option<PathBuf>,
    ) -> Self {
        return Self {
            base_url: base_url.or(self.base_url),
            revision: revision.or(self.revision),
            root: root.or(self.root),
        };
    }
}

/// Crate-level error types for pinref diagnostics.
use std::path::PathBuf;

use crate::types::SourceRef;

/// Every failure is fatal to the run. Each variant names the file, symbol, or
/// reason so a human can fix the marker or the referenced tree.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resolution failure tied to the document line the marker came from.
    #[error("{}:{}: {source}", origin.file.display(), origin.line)]
    AtMarker {
        /// Document location of the failing marker.
        origin: SourceRef,
        /// The underlying resolution failure.
        source: Box<Error>,
    },

    /// A referenced source file does not exist under the snapshot root.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file, as seen on disk.
        path: PathBuf,
    },

    /// The interior of a marker cannot be turned into a reference.
    #[error("invalid reference `{marker}`: {reason}")]
    InvalidReference {
        /// Raw marker interior text.
        marker: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Underlying I/O error from the filesystem or the output stream.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// A required setting was given neither on the command line nor in the config.
    #[error("missing setting: `{key}`")]
    MissingSetting {
        /// Config key that has no value.
        key: &'static str,
    },

    /// The source file could not be parsed as valid source.
    #[error("parse failed: {}: {reason}", file.display())]
    ParseFailed {
        /// File that failed to parse.
        file: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// The snapshot's revision identifier could not be determined.
    #[error("revision unavailable for {}: {reason}", root.display())]
    RevisionUnavailable {
        /// Why the provider failed.
        reason: String,
        /// Snapshot root the revision was requested for.
        root: PathBuf,
    },

    /// The file parsed but declares nothing with the requested name.
    #[error("symbol not found: `{symbol}` in {}", file.display())]
    SymbolNotFound {
        /// Names of the top-level declarations the file does have.
        available: Vec<String>,
        /// File that was searched for the symbol.
        file: PathBuf,
        /// Symbol name that was not found.
        symbol: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// No declaration parser registered for this file extension.
    #[error("no grammar for extension: .{ext}")]
    UnsupportedLanguage {
        /// File extension without the leading dot.
        ext: String,
    },
}

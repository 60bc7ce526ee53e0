/// Tree-sitter grammar resolution by file extension.
use std::path::Path;

use tree_sitter::Language;

use crate::error::Error;

/// A source language pinref can locate declarations in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `.go`
    Go,
    /// `.py`
    Python,
    /// `.rs`
    Rust,
    /// `.js`, `.jsx`, `.ts`, `.tsx`. The flag selects the TSX grammar.
    TypeScript {
        /// Whether the file may contain JSX.
        jsx: bool,
    },
}

impl Dialect {
    /// Map a file extension to its dialect.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedLanguage` for unknown extensions.
    pub fn for_path(path: &Path) -> Result<Self, Error> {
        let ext = path.extension().and_then(|e| return e.to_str()).unwrap_or("");

        return match ext {
            "go" => Ok(Self::Go),
            "js" | "ts" => Ok(Self::TypeScript { jsx: false }),
            "jsx" | "tsx" => Ok(Self::TypeScript { jsx: true }),
            "py" => Ok(Self::Python),
            "rs" => Ok(Self::Rust),
            _ => Err(Error::UnsupportedLanguage {
                ext: ext.to_string(),
            }),
        };
    }

    /// The tree-sitter grammar for this dialect.
    pub fn language(self) -> Language {
        return match self {
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::TypeScript { jsx: false } => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::TypeScript { jsx: true } => tree_sitter_typescript::LANGUAGE_TSX.into(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_extensions() {
        assert_eq!(Dialect::for_path(Path::new("src/cmd/main.go")).unwrap(), Dialect::Go);
        assert_eq!(Dialect::for_path(Path::new("lib.rs")).unwrap(), Dialect::Rust);
        assert_eq!(Dialect::for_path(Path::new("app/views.py")).unwrap(), Dialect::Python);
        assert_eq!(
            Dialect::for_path(Path::new("web/App.tsx")).unwrap(),
            Dialect::TypeScript { jsx: true }
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = Dialect::for_path(Path::new("README.adoc")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage { ext } if ext == "adoc"));
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let err = Dialect::for_path(Path::new("Makefile")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage { ext } if ext.is_empty()));
    }
}

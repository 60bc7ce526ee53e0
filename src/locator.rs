//! Declaration locator: find the line a named top-level declaration starts on.

use std::path::Path;

use crate::declarations::DeclarationParser as _;
use crate::error::Error;
use crate::grammar::Dialect;
use crate::snapshot::{self, Snapshot};
use crate::types::Declaration;

/// Return the first declaration named `symbol`, scanning in file order.
/// Duplicate names are not an error: the earliest lexical occurrence is authoritative.
///
/// # Errors
///
/// Returns `Error::SymbolNotFound` naming both `symbol` and `path` when nothing matches.
fn first_named(
    declarations: Vec<Declaration>,
    path: &Path,
    symbol: &str,
) -> Result<Declaration, Error> {
    if let Some(found) = declarations.iter().find(|d| return d.name == symbol) {
        return Ok(found.clone());
    }
    return Err(Error::SymbolNotFound {
        available: declarations.into_iter().map(|d| return d.name).collect(),
        file: path.to_path_buf(),
        symbol: symbol.to_string(),
    });
}

/// Parse the file at `path` under `root` and list its top-level declarations.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if the file is missing, `Error::UnsupportedLanguage`
/// for unknown extensions, `Error::Io` if it cannot be read, or `Error::ParseFailed`.
pub fn list_declarations(root: &Path, path: &Path) -> Result<Vec<Declaration>, Error> {
    let disk_path = snapshot::probe_under(root, path)?;
    let dialect = Dialect::for_path(path)?;
    let source = std::fs::read_to_string(&disk_path)?;
    return dialect.declarations(path, &source);
}

/// Find the line the top-level declaration named `symbol` starts on.
///
/// # Errors
///
/// Returns `Error::FileNotFound` before any parsing if the file is missing,
/// `Error::SymbolNotFound` if nothing in the file is named `symbol`, or any
/// error from [`list_declarations`].
pub fn locate(snapshot: &Snapshot, path: &Path, symbol: &str) -> Result<Declaration, Error> {
    let declarations = list_declarations(snapshot.root(), path)?;
    return first_named(declarations, path, symbol);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeclarationKind;

    fn decl(name: &str, kind: DeclarationKind, line: u32) -> Declaration {
        return Declaration { kind, line, name: name.to_string() };
    }

    #[test]
    fn first_match_in_file_order_wins() {
        let declarations = vec![
            decl("Split", DeclarationKind::Function, 12),
            decl("Split", DeclarationKind::Value, 30),
        ];
        for _ in 0..3 {
            let found = first_named(declarations.clone(), Path::new("a.go"), "Split").unwrap();
            assert_eq!(found.line, 12);
            assert_eq!(found.kind, DeclarationKind::Function);
        }
    }

    #[test]
    fn missing_symbol_names_symbol_file_and_alternatives() {
        let declarations = vec![decl("Parse", DeclarationKind::Function, 4)];
        let err = first_named(declarations, Path::new("pkg/util.go"), "parse").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("`parse`"), "{message}");
        assert!(message.contains("pkg/util.go"), "{message}");
        let Error::SymbolNotFound { available, .. } = err else {
            panic!("expected SymbolNotFound");
        };
        assert_eq!(available, vec!["Parse".to_string()]);
    }

    #[test]
    fn locates_go_symbol_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("pkg")).unwrap();
        std::fs::write(
            dir.path().join("pkg/util.go"),
            "package util\n\nvar (\n\tfirst = 1\n\tsecond = 2\n)\n",
        )
        .unwrap();
        let snapshot = Snapshot::new(dir.path().to_path_buf(), "abc123".to_string());

        let found = locate(&snapshot, Path::new("pkg/util.go"), "second").unwrap();
        assert_eq!(found.line, 5);
        assert_eq!(found.kind, DeclarationKind::Value);
    }

    #[test]
    fn missing_file_fails_before_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::new(dir.path().to_path_buf(), "abc123".to_string());

        let err = locate(&snapshot, Path::new("nope.unknown"), "x").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }), "got {err:?}");
    }

    #[test]
    fn list_declarations_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_declarations(dir.path(), Path::new("gone.go")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }), "got {err:?}");
    }
}

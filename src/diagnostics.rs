use std::fmt::Write as _;
use std::io::IsTerminal as _;
use std::path::Path;

use crate::error::Error;
use crate::types::SourceRef;

/// ANSI bold, used for headings on a terminal.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Find a declared name that differs from `symbol` only by case.
pub(crate) fn find_closest_suggestion(symbol: &str, available: &[String]) -> Option<String> {
    let lowered = symbol.to_lowercase();
    return available.iter().find(|name| return name.to_lowercase() == lowered).cloned();
}

/// Render an error as valid markdown and print to stderr, bolding headings on a terminal.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    let bold = std::io::stderr().is_terminal();
    for line in md.lines() {
        if bold && line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
    return;
}

/// Render the underlying failure followed by where the marker sits.
fn render_at_marker(origin: &SourceRef, source: &Error) -> String {
    let mut out = render_error(source);
    out.push_str("\n## Referenced from\n\n");
    let _ = writeln!(out, "- {}:{}", origin.file.display(), origin.line);
    let _ = writeln!(out, "  {}", origin.content.trim());
    return out;
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::AtMarker { origin, source } => render_at_marker(origin, source),
        Error::FileNotFound { path } => render_file_not_found(path),
        Error::InvalidReference { marker, reason } => render_invalid_reference(marker, reason),
        Error::MissingSetting { key } => render_missing_setting(key),
        Error::RevisionUnavailable { root, reason } => render_revision_unavailable(root, reason),
        Error::SymbolNotFound { available, file, symbol } => {
            render_symbol_not_found(&file.display().to_string(), symbol, available)
        },
        Error::UnsupportedLanguage { ext } => render_unsupported_language(ext),
        _ => render_generic(e),
    };
}

/// Missing referenced file.
fn render_file_not_found(path: &Path) -> String {
    return format!("\
# Error: File Not Found

`{}` does not exist.

## Fix

Check the path. Marker paths are relative to the configured `root`.
", path.display());
}

/// Fallback for wrapped lower-level errors.
fn render_generic(e: &Error) -> String {
    return match e {
        Error::Io(err) => format!("\
# Error: I/O

{err}
"),
        Error::Json(err) => format!("\
# Error: JSON

{err}
"),
        Error::ParseFailed { file, reason } => format!("\
# Error: Parse Failed

Could not parse `{}`: {reason}
", file.display()),
        Error::TomlDe(err) => format!("\
# Error: Invalid TOML

{err}

## Fix

Check `.pinref.toml`. Known keys are `base_url`, `root`, and `revision`.
"),
        _ => format!("\
# Error

{e}
"),
    };
}

/// Malformed marker interior.
fn render_invalid_reference(marker: &str, reason: &str) -> String {
    return format!("\
# Error: Invalid Reference

`@@{marker}@@`: {reason}.

## Fix

Write markers as `@@path/to/file@@` or `@@path/to/file:symbol@@`,
with the path relative to the source root.
");
}

/// No base URL from flag or config.
fn render_missing_setting(key: &str) -> String {
    return format!("\
# Error: Missing Setting

No value for `{key}`.

## Fix

Add it to `.pinref.toml`:

    {key} = \"https://github.com/owner/repo\"

Or pass `--{}` on the command line.
", key.replace('_', "-"));
}

/// Revision provider failure.
fn render_revision_unavailable(root: &Path, reason: &str) -> String {
    return format!("\
# Error: Revision Unavailable

Could not determine the revision of `{}`: {reason}

## Fix

Make `root` point at a git checkout, or pin a revision explicitly:

    pinref --revision <commit> ...
", root.display());
}

/// Missing symbol, with a case-insensitive suggestion or the list of declared names.
fn render_symbol_not_found(file: &str, symbol: &str, available: &[String]) -> String {
    let mut out = format!("\
# Error: Symbol Not Found

Symbol `{symbol}` is not a top-level function, constant, or variable in `{file}`.
");

    if let Some(suggestion) = find_closest_suggestion(symbol, available) {
        let _ = write!(out, "\n## Did you mean `{suggestion}`?\n\n    @@{file}:{suggestion}@@\n");
    } else if !available.is_empty() {
        out.push_str("\n## Available symbols\n\n");
        for name in available {
            let _ = writeln!(out, "- `{name}`");
        }
    } else {
        out.push_str("\nThe file declares no addressable symbols; link the whole file instead.\n");
    }

    return out;
}

/// No grammar for the extension.
fn render_unsupported_language(ext: &str) -> String {
    return format!(
        "\
# Error: Unsupported Language

Symbols cannot be located in `.{ext}` files.

## Supported extensions

- `.go` — Go
- `.py` — Python
- `.rs` — Rust
- `.ts`, `.tsx`, `.js`, `.jsx` — TypeScript / JavaScript

Whole-file markers (`@@path@@`) work for any file.
"
    );
}

/// Core domain types for pinref references, declarations, and links.
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A top-level declaration found in a source file.
/// Produced per lookup and never cached across markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Whether this declares a function or a value.
    pub kind: DeclarationKind,
    /// One-based line the link anchor points at.
    pub line: u32,
    /// Declared identifier.
    pub name: String,
}

/// The two declaration shapes a marker can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// A function or method.
    Function,
    /// A constant or variable.
    Value,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::Function => f.write_str("function"),
            Self::Value => f.write_str("value"),
        };
    }
}

/// The substitution value for one marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Text shown for the link: a file base name or a symbol name.
    pub display_text: String,
    /// Revision-pinned URL, with a `#L<line>` anchor for symbols.
    pub url: String,
}

impl fmt::Display for Link {
    /// Render as ``url[`text`^]``, the caret opening the link in a new window.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}[`{}`^]", self.url, self.display_text);
    }
}

/// Parsed from the interior of a `@@...@@` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Normalized path relative to the snapshot root.
    pub path: PathBuf,
    /// Declaration name, absent for whole-file references.
    pub symbol: Option<String>,
}

/// Location in an input document that holds a marker.
/// Used in error diagnostics to show where a broken reference originated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    /// Raw text content of the marker line.
    pub content: String,
    /// Document containing the marker (`<stdin>` for piped input).
    pub file: PathBuf,
    /// One-based line number in the document.
    pub line: u32,
}

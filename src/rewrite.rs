//! Line-streaming substitution of markers in a document.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::Error;
use crate::marker::MARKER;
use crate::types::{Link, Reference, SourceRef};

/// Counts reported after a document has been rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Lines read from the input.
    pub lines: u32,
    /// Markers replaced by links.
    pub markers: u32,
}

/// Replace every marker in `line`, left to right, with its resolved link.
/// Lines without markers come back unchanged.
///
/// # Errors
///
/// Returns the first parse or resolution error; nothing after it is resolved.
pub fn rewrite_line<F>(line: &str, resolve: &mut F) -> Result<(String, u32), Error>
where
    F: FnMut(&Reference) -> Result<Link, Error>,
{
    let mut out = String::with_capacity(line.len());
    let mut cursor = 0;
    let mut replaced = 0_u32;

    for captures in MARKER.captures_iter(line) {
        let (Some(whole), Some(interior)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        out.push_str(line.get(cursor..whole.start()).unwrap_or(""));
        let reference = Reference::parse(interior.as_str())?;
        let link = resolve(&reference)?;
        out.push_str(&link.to_string());
        cursor = whole.end();
        replaced = replaced.saturating_add(1);
    }

    out.push_str(line.get(cursor..).unwrap_or(""));
    return Ok((out, replaced));
}

/// Copy `input` to `output` line by line, rewriting markers as they appear.
/// Each finished line is written before the next is read, so output produced
/// before a failure stays put.
///
/// # Errors
///
/// Returns `Error::AtMarker` carrying `name`, the line number, and the line text
/// for resolution failures, or `Error::Io` for read/write failures.
pub fn rewrite_stream<R, W, F>(
    input: R,
    name: &Path,
    output: &mut W,
    resolve: &mut F,
) -> Result<RewriteStats, Error>
where
    R: BufRead,
    W: Write,
    F: FnMut(&Reference) -> Result<Link, Error>,
{
    let mut stats = RewriteStats::default();

    for line in input.lines() {
        let line = line?;
        stats.lines = stats.lines.saturating_add(1);

        let (rewritten, replaced) = rewrite_line(&line, resolve).map_err(|e| {
            return Error::AtMarker {
                origin: SourceRef {
                    content: line.clone(),
                    file: name.to_path_buf(),
                    line: stats.lines,
                },
                source: Box::new(e),
            };
        })?;
        stats.markers = stats.markers.saturating_add(replaced);
        writeln!(output, "{rewritten}")?;
    }

    return Ok(stats);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    /// Resolves every reference to a fake link built from its parts.
    fn fake(reference: &Reference) -> Result<Link, Error> {
        if reference.path == Path::new("missing.go") {
            return Err(Error::FileNotFound { path: reference.path.clone() });
        }
        let display_text = reference.symbol.clone().unwrap_or_else(|| return "file".to_string());
        return Ok(Link {
            display_text,
            url: format!("u/{}", reference.path.display()),
        });
    }

    #[test]
    fn line_without_markers_passes_through() {
        let (out, count) = rewrite_line("plain text, with: colons @ and @signs", &mut fake).unwrap();
        assert_eq!(out, "plain text, with: colons @ and @signs");
        assert_eq!(count, 0);
    }

    #[test]
    fn substitutions_keep_source_order() {
        let (out, count) = rewrite_line("a @@x.go@@ b @@y.go:F@@ c", &mut fake).unwrap();
        assert_eq!(out, "a u/x.go[`file`^] b u/y.go[`F`^] c");
        assert_eq!(count, 2);
    }

    #[test]
    fn first_failure_stops_the_line() {
        let mut seen = Vec::new();
        let mut recording = |reference: &Reference| {
            seen.push(reference.path.clone());
            return fake(reference);
        };
        let err = rewrite_line("@@missing.go@@ @@later.go@@", &mut recording).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
        assert_eq!(seen, vec![PathBuf::from("missing.go")]);
    }

    #[test]
    fn stream_keeps_output_before_failure() {
        let input = "first @@a.go@@\nsecond\nthird @@missing.go@@\nfourth\n";
        let mut output = Vec::new();
        let err = rewrite_stream(input.as_bytes(), Path::new("doc.adoc"), &mut output, &mut fake)
            .unwrap_err();

        assert_eq!(String::from_utf8(output).unwrap(), "first u/a.go[`file`^]\nsecond\n");
        let Error::AtMarker { origin, source } = err else {
            panic!("expected AtMarker");
        };
        assert_eq!(origin.file, PathBuf::from("doc.adoc"));
        assert_eq!(origin.line, 3);
        assert_eq!(origin.content, "third @@missing.go@@");
        assert!(matches!(*source, Error::FileNotFound { .. }));
    }

    #[test]
    fn stream_counts_lines_and_markers() {
        let input = "@@a.go@@ @@b.go:G@@\n\nno markers\n";
        let mut output = Vec::new();
        let stats = rewrite_stream(input.as_bytes(), Path::new("<stdin>"), &mut output, &mut fake)
            .unwrap();
        assert_eq!(stats, RewriteStats { lines: 3, markers: 2 });
    }
}

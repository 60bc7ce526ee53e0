//! Top-level declaration listing per source language.
//!
//! The locator only needs "parse this file into a list of declarations with
//! line positions". [`DeclarationParser`] is that seam; [`Dialect`] implements
//! it with tree-sitter, one collector per language.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::Error;
use crate::grammar::Dialect;
use crate::types::{Declaration, DeclarationKind};

/// Turns source text into its top-level declarations, in file order.
pub trait DeclarationParser {
    /// List every top-level function and value declaration in `source`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ParseFailed` if `source` is not valid for the language.
    fn declarations(&self, file: &Path, source: &str) -> Result<Vec<Declaration>, Error>;
}

impl DeclarationParser for Dialect {
    fn declarations(&self, file: &Path, source: &str) -> Result<Vec<Declaration>, Error> {
        let tree = parse_source(file, source, *self)?;
        let root = tree.root_node();
        if root.has_error() {
            let reason = first_error_line(root).map_or_else(
                || return "syntax error".to_string(),
                |line| return format!("syntax error at line {line}"),
            );
            return Err(Error::ParseFailed {
                file: file.to_path_buf(),
                reason,
            });
        }

        let mut declarations = Vec::new();
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match *self {
                Self::Go => collect_go_declarations(node, source, &mut declarations),
                Self::Python => collect_python_declarations(node, source, &mut declarations),
                Self::Rust => collect_rust_declarations(node, source, &mut declarations),
                Self::TypeScript { .. } => collect_ts_declarations(node, source, &mut declarations),
            }
        }
        return Ok(declarations);
    }
}

// ── Go ─────────────────────────────────────────────────────────────────

/// Functions and methods anchor at `func`; every name bound by `const` or
/// `var` anchors at its own identifier, even inside a parenthesized group.
fn collect_go_declarations(node: Node<'_>, source: &str, declarations: &mut Vec<Declaration>) {
    match node.kind() {
        "const_declaration" | "var_declaration" => {
            collect_go_value_specs(node, source, declarations);
        },
        "function_declaration" | "method_declaration" => {
            let Some(name) = node.child_by_field_name("name") else {
                return;
            };
            declarations.extend(declaration(DeclarationKind::Function, name, node, source));
        },
        _ => {},
    }
    return;
}

/// Walk the specs of a `const`/`var` declaration, grouped or not.
/// Newer grammars wrap grouped `var` specs in a `var_spec_list`.
fn collect_go_value_specs(node: Node<'_>, source: &str, declarations: &mut Vec<Declaration>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "const_spec" | "var_spec" => {
                let mut names = child.walk();
                for name in child.children_by_field_name("name", &mut names) {
                    // The field also covers the commas between names.
                    if name.kind() == "identifier" {
                        declarations.extend(declaration(DeclarationKind::Value, name, name, source));
                    }
                }
            },
            "var_spec_list" => collect_go_value_specs(child, source, declarations),
            _ => {},
        }
    }
    return;
}

// ── Python ─────────────────────────────────────────────────────────────

/// Walk the targets of an `a = b = value` chain.
fn collect_python_assignment(
    assignment: Node<'_>,
    source: &str,
    declarations: &mut Vec<Declaration>,
) {
    if let Some(left) = assignment.child_by_field_name("left") {
        collect_python_targets(left, source, declarations);
    }
    if let Some(right) = assignment.child_by_field_name("right")
        && right.kind() == "assignment"
    {
        collect_python_assignment(right, source, declarations);
    }
    return;
}

/// `def` anchors at the `def` line even when decorated; module-level
/// assignments contribute every bound name.
fn collect_python_declarations(node: Node<'_>, source: &str, declarations: &mut Vec<Declaration>) {
    match node.kind() {
        "decorated_definition" => {
            if let Some(definition) = node.child_by_field_name("definition") {
                collect_python_declarations(definition, source, declarations);
            }
        },
        "expression_statement" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if child.kind() == "assignment" {
                    collect_python_assignment(child, source, declarations);
                }
            }
        },
        "function_definition" => {
            let Some(name) = node.child_by_field_name("name") else {
                return;
            };
            declarations.extend(declaration(DeclarationKind::Function, name, node, source));
        },
        _ => {},
    }
    return;
}

/// Collect plain identifiers from an assignment target, descending into tuple
/// and list unpacking. Attribute and subscript targets bind nothing new.
fn collect_python_targets(target: Node<'_>, source: &str, declarations: &mut Vec<Declaration>) {
    match target.kind() {
        "identifier" => {
            declarations.extend(declaration(DeclarationKind::Value, target, target, source));
        },
        "list_pattern" | "pattern_list" | "tuple_pattern" => {
            let mut cursor = target.walk();
            for child in target.named_children(&mut cursor) {
                collect_python_targets(child, source, declarations);
            }
        },
        _ => {},
    }
    return;
}

// ── Rust ───────────────────────────────────────────────────────────────

/// Free functions, consts, and statics. Impl and trait members are nested
/// scopes and are not addressable.
fn collect_rust_declarations(node: Node<'_>, source: &str, declarations: &mut Vec<Declaration>) {
    let kind = match node.kind() {
        "const_item" | "static_item" => DeclarationKind::Value,
        "function_item" => DeclarationKind::Function,
        _ => return,
    };
    let Some(name) = node.child_by_field_name("name") else {
        return;
    };
    let anchor = if kind == DeclarationKind::Function { node } else { name };
    declarations.extend(declaration(kind, name, anchor, source));
    return;
}

// ── TypeScript ─────────────────────────────────────────────────────────

/// Function declarations (exported or not) and `const`/`let`/`var` bindings.
fn collect_ts_declarations(node: Node<'_>, source: &str, declarations: &mut Vec<Declaration>) {
    match node.kind() {
        "export_statement" => {
            if let Some(inner) = node.child_by_field_name("declaration") {
                collect_ts_declarations(inner, source, declarations);
            }
        },
        "function_declaration" | "function_signature" | "generator_function_declaration" => {
            let Some(name) = node.child_by_field_name("name") else {
                return;
            };
            declarations.extend(declaration(DeclarationKind::Function, name, node, source));
        },
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = node.walk();
            for declarator in node.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                let Some(name) = declarator.child_by_field_name("name") else {
                    continue;
                };
                if name.kind() == "identifier" {
                    declarations.extend(declaration(DeclarationKind::Value, name, name, source));
                }
            }
        },
        _ => {},
    }
    return;
}

// ── Shared ─────────────────────────────────────────────────────────────

/// Build a declaration named by `name` whose line is the start of `anchor`.
fn declaration(
    kind: DeclarationKind,
    name: Node<'_>,
    anchor: Node<'_>,
    source: &str,
) -> Option<Declaration> {
    let text = name.utf8_text(source.as_bytes()).ok()?;
    let line = line_of(anchor)?;
    return Some(Declaration {
        kind,
        line,
        name: text.to_string(),
    });
}

/// One-based line of the first error or missing node under `node`.
fn first_error_line(node: Node<'_>) -> Option<u32> {
    if node.is_error() || node.is_missing() {
        return line_of(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            return first_error_line(child);
        }
    }
    return None;
}

/// One-based line on which `node` starts.
fn line_of(node: Node<'_>) -> Option<u32> {
    let row = u32::try_from(node.start_position().row).ok()?;
    return row.checked_add(1);
}

/// Parse source into a tree-sitter tree.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the language cannot be set or parsing fails.
fn parse_source(file: &Path, source: &str, dialect: Dialect) -> Result<Tree, Error> {
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .map_err(|e| {
            return Error::ParseFailed {
                file: file.to_path_buf(),
                reason: e.to_string(),
            };
        })?;

    return parser.parse(source, None).ok_or_else(|| {
        return Error::ParseFailed {
            file: file.to_path_buf(),
            reason: "tree-sitter returned None".to_string(),
        };
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(dialect: Dialect, file: &str, lines: &[&str]) -> Vec<(String, DeclarationKind, u32)> {
        let source = lines.join("\n");
        return dialect
            .declarations(Path::new(file), &source)
            .unwrap()
            .into_iter()
            .map(|d| return (d.name, d.kind, d.line))
            .collect();
    }

    #[test]
    fn go_functions_and_methods_anchor_at_func() {
        let found = listed(Dialect::Go, "util.go", &[
            "package util",
            "",
            "// Parse splits s.",
            "func Parse(s string) []string {",
            "\treturn nil",
            "}",
            "",
            "func (p Splitter) Split(s string) []string {",
            "\treturn nil",
            "}",
        ]);
        assert_eq!(found, vec![
            ("Parse".to_string(), DeclarationKind::Function, 4),
            ("Split".to_string(), DeclarationKind::Function, 8),
        ]);
    }

    #[test]
    fn go_grouped_values_anchor_at_their_own_name() {
        let found = listed(Dialect::Go, "modes.go", &[
            "package modes",
            "",
            "const (",
            "\tmodeA = iota",
            "\tmodeB",
            "",
            "\tmodeC, modeD = 7, 8",
            ")",
            "",
            "var (",
            "\tsep = \",\"",
            "\tlimit int",
            ")",
            "",
            "var single = 1",
        ]);
        let names: Vec<(&str, u32)> = found.iter().map(|(n, _, l)| return (n.as_str(), *l)).collect();
        assert_eq!(names, vec![
            ("modeA", 4),
            ("modeB", 5),
            ("modeC", 7),
            ("modeD", 7),
            ("sep", 11),
            ("limit", 12),
            ("single", 15),
        ]);
        assert!(found.iter().all(|(_, kind, _)| return *kind == DeclarationKind::Value));
    }

    #[test]
    fn go_skips_types_imports_and_function_locals() {
        let found = listed(Dialect::Go, "outer.go", &[
            "package outer",
            "",
            "import \"fmt\"",
            "",
            "type Config struct{ host string }",
            "",
            "func outer() {",
            "\tvar inner = 1",
            "\tfmt.Println(inner)",
            "}",
        ]);
        assert_eq!(found, vec![("outer".to_string(), DeclarationKind::Function, 7)]);
    }

    #[test]
    fn go_syntax_error_is_parse_failure() {
        let err = Dialect::Go
            .declarations(Path::new("broken.go"), "package broken\n\nfunc broken( {\n")
            .unwrap_err();
        assert!(matches!(err, Error::ParseFailed { .. }), "got {err:?}");
    }

    #[test]
    fn rust_items_at_top_level_only() {
        let found = listed(Dialect::Rust, "lib.rs", &[
            "use std::fmt;",
            "",
            "pub const LIMIT: usize = 8;",
            "static GREETING: &str = \"hi\";",
            "",
            "/// Docs.",
            "#[inline]",
            "pub fn helper() {}",
            "",
            "impl Thing {",
            "    fn method() {}",
            "}",
        ]);
        assert_eq!(found, vec![
            ("LIMIT".to_string(), DeclarationKind::Value, 3),
            ("GREETING".to_string(), DeclarationKind::Value, 4),
            ("helper".to_string(), DeclarationKind::Function, 8),
        ]);
    }

    #[test]
    fn python_defs_and_assignments() {
        let found = listed(Dialect::Python, "app.py", &[
            "import os",
            "",
            "LIMIT = 10",
            "a, b = 1, 2",
            "x = y = 0",
            "",
            "@decorator",
            "def run():",
            "    local = 1",
        ]);
        assert_eq!(found, vec![
            ("LIMIT".to_string(), DeclarationKind::Value, 3),
            ("a".to_string(), DeclarationKind::Value, 4),
            ("b".to_string(), DeclarationKind::Value, 4),
            ("x".to_string(), DeclarationKind::Value, 5),
            ("y".to_string(), DeclarationKind::Value, 5),
            ("run".to_string(), DeclarationKind::Function, 8),
        ]);
    }

    #[test]
    fn typescript_functions_and_bindings() {
        let found = listed(Dialect::TypeScript { jsx: false }, "greet.ts", &[
            "export function greet(name: string): string {",
            "  return name;",
            "}",
            "",
            "const first = 1,",
            "  second = 2;",
            "export let third = 3;",
        ]);
        assert_eq!(found, vec![
            ("greet".to_string(), DeclarationKind::Function, 1),
            ("first".to_string(), DeclarationKind::Value, 5),
            ("second".to_string(), DeclarationKind::Value, 6),
            ("third".to_string(), DeclarationKind::Value, 7),
        ]);
    }
}

//! Pseudo-source text rendering
//!
//! Decoded entities render into a source-like text view. Rendering is a
//! pure formatting pass: individual renders never emit a trailing newline,
//! and blank-line separation between blocks is owned by the section-level
//! pass in [`CodeSection::to_text_code`](crate::CodeSection::to_text_code).

use crate::types::name_map::IdToNameMap;

/// Indentation unit used in rendered output.
const INDENT_UNIT: &str = "    ";

/// Render an entity as pseudo-source text.
pub trait ToTextCode {
    /// Append this entity's text to `out` at the given indent level.
    ///
    /// Must not emit a trailing newline; multi-line renders separate their
    /// own lines with single newlines.
    fn to_text_code(&self, name_map: &IdToNameMap, out: &mut String, indent: usize);
}

/// Render a slice of entities, newline-joined.
pub fn write_join_code<T: ToTextCode>(
    items: &[T],
    name_map: &IdToNameMap,
    out: &mut String,
    indent: usize,
) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        item.to_text_code(name_map, out, indent);
    }
}

/// Append `indent` levels of indentation.
pub(crate) fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str(INDENT_UNIT);
    }
}

/// Append a trailing `  ; comment` if the comment is non-empty.
pub(crate) fn push_comment(out: &mut String, comment: &str) {
    if !comment.is_empty() {
        out.push_str("  ; ");
        out.push_str(comment);
    }
}

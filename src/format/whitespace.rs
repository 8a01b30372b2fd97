//! Interior space collapsing
//!
//! Runs of two or more spaces become a single space. Tabs are left alone.
//! The pass is not string- or comment-aware: spaces inside `"..."` literals
//! are collapsed too.

use std::borrow::Cow;

use crate::parser::patterns::SPACE_RUN_RE;

/// Collapse runs of spaces in `line` when `enabled`.
#[must_use]
pub fn trim_extra_spaces(line: &str, enabled: bool) -> String {
    if !enabled {
        return line.to_string();
    }
    SPACE_RUN_RE.replace_all(line, " ").into_owned()
}

/// Collapse space runs after the line's leading indentation.
///
/// Rendered space indentation is kept intact.
#[must_use]
pub fn trim_line_content(line: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(line);
    }
    let content = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - content.len()];
    match SPACE_RUN_RE.replace_all(content, " ") {
        Cow::Borrowed(_) => Cow::Borrowed(line),
        Cow::Owned(trimmed) => Cow::Owned(format!("{indent}{trimmed}")),
    }
}

//! Line purification
//!
//! Turns a raw line into a structurally safe line: string literals become
//! `""`, trailing comments disappear and command-style invocations collapse
//! to their bare command name. The result is what the indenter counts braces
//! and parentheses on.

use crate::parser::char_filter::CharFilter;
use crate::parser::patterns::{ASSIGNMENT_TAIL_RE, FIRST_TOKEN_RE, KEYWORD_RE};

/// How a line's first token is used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `Name(args)`: a function call, structure kept
    Expression,
    /// `Name, args` or `Name args`: legacy command, arguments discarded
    Command,
    /// A lone identifier
    Bare,
    /// Anything else whose structure is kept: keywords, assignments, lines
    /// not starting with an identifier
    Structured,
}

/// Classify a raw line by its first identifier token.
#[must_use]
pub fn classify(line: &str) -> LineKind {
    let Some(caps) = FIRST_TOKEN_RE.captures(line) else {
        return LineKind::Structured;
    };
    let token = caps.get(1).map_or("", |m| m.as_str());
    let tail = caps.get(2).map_or("", |m| m.as_str());

    if tail.starts_with('(') {
        return LineKind::Expression;
    }
    if tail.trim_end().is_empty() {
        return LineKind::Bare;
    }
    let command_like = tail.starts_with(',') || tail.starts_with(char::is_whitespace);
    if !command_like {
        return LineKind::Structured;
    }
    if KEYWORD_RE.is_match(token) || ASSIGNMENT_TAIL_RE.is_match(tail) {
        return LineKind::Structured;
    }
    LineKind::Command
}

/// Purify a single raw line.
///
/// Command lines reduce to the command name; every other line goes through
/// the [`CharFilter`] scan. The result is trimmed.
#[must_use]
pub fn purify(line: &str) -> String {
    if classify(line) == LineKind::Command {
        if let Some(token) = FIRST_TOKEN_RE.captures(line).and_then(|caps| caps.get(1)) {
            return token.as_str().to_string();
        }
    }
    purify_expression(line)
}

/// Purify a line known to continue an open expression.
///
/// No command collapse: strings and the trailing comment are neutralized and
/// every bracket is kept.
#[must_use]
pub fn purify_expression(line: &str) -> String {
    CharFilter::new(line).filter_all().trim().to_string()
}

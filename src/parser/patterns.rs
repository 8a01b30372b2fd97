//! Regex patterns for AutoHotkey line structure
//!
//! All patterns are compiled once on first use via `LazyLock`.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Build a case-insensitive regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. All patterns in this module are
/// constants exercised by the tests below.
fn build_re(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(true)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

/// First identifier token of a line and everything after it.
///
/// Group 1 is the token, group 2 the tail (may be empty).
pub static FIRST_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^\s*([\w#@$]+)(.*)$"));

/// Tail that makes a whitespace-separated line an assignment rather than a
/// command: `x = 1`, `x := 1`, `x += 1`, `x++`.
pub static ASSIGNMENT_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(r"^\s*(:=|//=|<<=|>>=|[-+*/.|&^]=|=|\+\+|--)")
});

/// Keywords that take expressions (and may open blocks) even when followed
/// by whitespace.
pub static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(
        r"^(if|else|while|loop|for|try|catch|finally|return|switch|case|default|until|throw|global|local|static|class)$",
    )
});

/// Start of a `/* ... */` block comment
pub static BLOCK_COMMENT_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^\s*/\*"));

/// Line that closes a block comment
pub static BLOCK_COMMENT_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^\s*\*/"));

/// Two or more consecutive spaces
pub static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r" {2,}"));

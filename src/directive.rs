//! Inline directive parsing for `; ahkfmt:` comments
//!
//! Supports in-file configuration overrides via special comments:
//! `; ahkfmt: --tab-width 2 --use-tabs`

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;

/// Pattern to match ahkfmt directives
static AHKFMT_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*;\s*ahkfmt:\s*(.*?)\s*$").unwrap());

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveOverrides {
    pub tab_width: Option<usize>,
    pub use_spaces: Option<bool>,
    pub max_blank_lines: Option<i32>,
    pub trim_extra_spaces: Option<bool>,
    pub impose_indent: Option<bool>,
    pub preserve_continuation_indent: Option<bool>,
}

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the overrides to a configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(v) = self.tab_width {
            config.tab_width = v;
        }
        if let Some(v) = self.use_spaces {
            config.use_spaces = v;
        }
        if let Some(v) = self.max_blank_lines {
            config.max_blank_lines = v;
        }
        if let Some(v) = self.trim_extra_spaces {
            config.trim_extra_spaces = v;
        }
        if let Some(v) = self.impose_indent {
            config.impose_indent = v;
        }
        if let Some(v) = self.preserve_continuation_indent {
            config.preserve_continuation_indent = v;
        }
    }
}

/// Check if a line contains an ahkfmt directive
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    AHKFMT_DIRECTIVE_RE.is_match(line)
}

/// Parse an ahkfmt directive line and return option overrides
///
/// Returns `None` if the line is not a directive or sets nothing.
#[must_use]
pub fn parse_directive(line: &str) -> Option<DirectiveOverrides> {
    let caps = AHKFMT_DIRECTIVE_RE.captures(line)?;
    let args_str = caps.get(1)?.as_str();
    parse_directive_args(args_str)
}

/// Parse directive arguments into overrides
fn parse_directive_args(args_str: &str) -> Option<DirectiveOverrides> {
    let mut overrides = DirectiveOverrides::default();
    let mut tokens = args_str.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "-t" | "--tab-width" => {
                overrides.tab_width = tokens.next().and_then(|v| v.parse().ok());
            }
            "-b" | "--max-blank-lines" => {
                overrides.max_blank_lines = tokens.next().and_then(|v| v.parse().ok());
            }
            "--use-tabs" => overrides.use_spaces = Some(false),
            "--use-spaces" => overrides.use_spaces = Some(true),
            "--trim-spaces" => overrides.trim_extra_spaces = Some(true),
            "--no-trim-spaces" => overrides.trim_extra_spaces = Some(false),
            "--no-indent" => overrides.impose_indent = Some(false),
            "--enable-indent" => overrides.impose_indent = Some(true),
            "--preserve-continuation-indent" => {
                overrides.preserve_continuation_indent = Some(true);
            }
            _ => {
                // Unknown option, skip
            }
        }
    }

    if overrides.is_empty() {
        None
    } else {
        Some(overrides)
    }
}

/// Scan a document for ahkfmt directives and return the first found
pub fn find_directive(text: &str) -> Option<DirectiveOverrides> {
    text.lines()
        .find(|line| is_directive_line(line))
        .and_then(parse_directive)
}

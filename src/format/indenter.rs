//! Brace- and paren-driven indentation reflow
//!
//! Walks a document line by line, threading a [`ReflowState`] through the
//! fold: block depth from braces, open parentheses carried into continuation
//! lines, and whether we are inside a `/* ... */` comment. Each line's
//! leading whitespace is replaced by the rendered indentation for its depth.

use tracing::debug;

use crate::format::parens::{brace_balance, paren_balance};
use crate::parser::patterns::{BLOCK_COMMENT_CLOSE_RE, BLOCK_COMMENT_OPEN_RE};
use crate::parser::{purify, purify_expression};

/// Options controlling how indentation is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentOptions {
    /// Indent with spaces (`tab_width` per level) instead of tabs
    pub use_spaces: bool,
    /// Width of one indentation level in spaces
    pub tab_width: usize,
    /// Keep the original leading whitespace of continuation lines
    pub preserve_continuation_indent: bool,
}

impl IndentOptions {
    #[must_use]
    pub fn new(use_spaces: bool, tab_width: usize) -> Self {
        Self {
            use_spaces,
            tab_width,
            preserve_continuation_indent: false,
        }
    }
}

impl Default for IndentOptions {
    fn default() -> Self {
        Self::new(true, 4)
    }
}

/// Whitespace for `depth` levels of indentation
#[must_use]
pub fn build_indentation_chars(depth: usize, options: &IndentOptions) -> String {
    if options.use_spaces {
        " ".repeat(depth * options.tab_width)
    } else {
        "\t".repeat(depth)
    }
}

/// Prefix `formatted_line` with indentation.
///
/// An empty line stays empty unless `preserve_indent` is set.
fn indent_line(
    formatted_line: &str,
    depth: usize,
    options: &IndentOptions,
    preserve_indent: bool,
) -> String {
    if formatted_line.is_empty() && !preserve_indent {
        return String::new();
    }
    let mut line = build_indentation_chars(depth, options);
    line.push_str(formatted_line);
    line
}

/// Render line `line_index` of a document with `last_line_index` lines.
///
/// Every line but the last gets a trailing `\n`.
#[must_use]
pub fn build_indented_line(
    line_index: usize,
    last_line_index: usize,
    formatted_line: &str,
    depth: usize,
    options: &IndentOptions,
    preserve_indent: bool,
) -> String {
    let mut line = indent_line(formatted_line, depth, options, preserve_indent);
    if line_index + 1 != last_line_index {
        line.push('\n');
    }
    line
}

/// Cross-line state carried through the reflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReflowState {
    /// Current block depth
    pub depth: usize,
    /// Parentheses left open by previous lines
    pub continuation: usize,
    /// Inside a `/* ... */` comment
    pub in_block_comment: bool,
}

fn apply_delta(value: usize, delta: isize) -> usize {
    value.saturating_add_signed(delta)
}

impl ReflowState {
    /// True if the next line continues an unclosed parenthesized expression
    #[must_use]
    pub fn is_continued(&self) -> bool {
        self.continuation > 0
    }

    fn render_depth(&self) -> usize {
        if self.is_continued() {
            self.depth + 1
        } else {
            self.depth
        }
    }

    /// Render one raw line and compute the state for the next one.
    #[must_use]
    pub fn step(self, raw: &str, options: &IndentOptions) -> (ReflowState, String) {
        if self.in_block_comment {
            if BLOCK_COMMENT_CLOSE_RE.is_match(raw) {
                let next = ReflowState {
                    in_block_comment: false,
                    ..self
                };
                return (next, indent_line(raw.trim_start(), self.render_depth(), options, false));
            }
            let next = ReflowState {
                in_block_comment: !raw.contains("*/"),
                ..self
            };
            return (next, raw.to_string());
        }

        if BLOCK_COMMENT_OPEN_RE.is_match(raw) {
            let body = raw.trim_start();
            let next = ReflowState {
                in_block_comment: !body[2..].contains("*/"),
                ..self
            };
            return (next, indent_line(body, self.render_depth(), options, false));
        }

        // A continued line is never a command invocation
        let purified = if self.is_continued() {
            purify_expression(raw)
        } else {
            purify(raw)
        };
        let content = raw.trim_start();
        let mut next = self;
        let mut delta = brace_balance(&purified);

        let rendered = if self.is_continued() {
            let depth = self.depth + 1;
            if options.preserve_continuation_indent {
                if content.is_empty() {
                    build_indentation_chars(depth, options)
                } else {
                    raw.to_string()
                }
            } else {
                indent_line(content, depth, options, false)
            }
        } else {
            if purified.starts_with('}') && next.depth > 0 {
                next.depth -= 1;
                delta += 1;
            }
            indent_line(content, next.depth, options, false)
        };

        next.depth = apply_delta(next.depth, delta);
        next.continuation = apply_delta(self.continuation, paren_balance(&purified));
        (next, rendered)
    }
}

/// Re-indent a whole document starting from depth zero.
#[must_use]
pub fn reindent(text: &str, options: &IndentOptions) -> String {
    reindent_from(text, options, ReflowState::default()).0
}

/// Re-indent a document from an injected starting state.
///
/// Returns the rendered text and the state after the last line. Lines are
/// re-joined with `\r\n` if the input uses it, `\n` otherwise.
#[must_use]
pub fn reindent_from(
    text: &str,
    options: &IndentOptions,
    state: ReflowState,
) -> (String, ReflowState) {
    let terminator = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let mut lines: Vec<&str> = text.split('\n').collect();
    let ends_with_newline = lines.len() > 1 && lines.last() == Some(&"");
    if ends_with_newline {
        lines.pop();
    }

    let mut rendered = Vec::with_capacity(lines.len());
    let final_state = lines.iter().fold(state, |state, line| {
        let raw = line.strip_suffix('\r').unwrap_or(line);
        let (next, out) = state.step(raw, options);
        rendered.push(out);
        next
    });

    if final_state.depth > 0 || final_state.is_continued() {
        debug!(
            depth = final_state.depth,
            continuation = final_state.continuation,
            "document ends with unclosed blocks"
        );
    }

    let mut output = rendered.join(terminator);
    if ends_with_newline {
        output.push_str(terminator);
    }
    (output, final_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spaces() -> IndentOptions {
        IndentOptions::new(true, 4)
    }

    fn tabs() -> IndentOptions {
        IndentOptions::new(false, 4)
    }

    #[test]
    fn test_indentation_chars() {
        assert_eq!(build_indentation_chars(0, &spaces()), "");
        assert_eq!(build_indentation_chars(1, &spaces()), "    ");
        assert_eq!(build_indentation_chars(2, &spaces()), "        ");
        assert_eq!(build_indentation_chars(1, &tabs()), "\t");
        assert_eq!(build_indentation_chars(2, &tabs()), "\t\t");
    }

    #[test]
    fn test_indentation_chars_tab_width() {
        assert_eq!(build_indentation_chars(2, &IndentOptions::new(true, 2)), "    ");
        assert_eq!(build_indentation_chars(2, &IndentOptions::new(false, 8)), "\t\t");
    }

    #[test]
    fn test_build_indented_line() {
        assert_eq!(build_indented_line(0, 1, "SoundBeep", 0, &spaces(), false), "SoundBeep");
        assert_eq!(build_indented_line(0, 1, "SoundBeep", 1, &spaces(), false), "    SoundBeep");
        assert_eq!(build_indented_line(0, 1, "SoundBeep", 2, &spaces(), false), "        SoundBeep");
        assert_eq!(build_indented_line(0, 1, "SoundBeep", 1, &tabs(), false), "\tSoundBeep");
        assert_eq!(build_indented_line(0, 1, "SoundBeep", 2, &tabs(), false), "\t\tSoundBeep");
        assert_eq!(build_indented_line(0, 1, "Beep", 1, &spaces(), false), "    Beep");
    }

    #[test]
    fn test_build_indented_line_empty() {
        assert_eq!(build_indented_line(0, 1, "", 1, &spaces(), true), "    ");
        assert_eq!(build_indented_line(0, 1, "", 2, &tabs(), true), "\t\t");
        assert_eq!(build_indented_line(0, 1, "", 2, &tabs(), false), "");
    }

    #[test]
    fn test_build_indented_line_newline_unless_last() {
        assert_eq!(build_indented_line(0, 3, "a", 0, &spaces(), false), "a\n");
        assert_eq!(build_indented_line(2, 3, "a", 0, &spaces(), false), "a");
    }

    #[test]
    fn test_braces() {
        let input = "if (x) {\nMsgBox, hi\n}\n";
        assert_eq!(reindent(input, &spaces()), "if (x) {\n    MsgBox, hi\n}\n");
    }

    #[test]
    fn test_else_on_closing_line() {
        let input = "if (x) {\na()\n} else {\nb()\n}";
        let expected = "if (x) {\n    a()\n} else {\n    b()\n}";
        assert_eq!(reindent(input, &spaces()), expected);
    }

    #[test]
    fn test_nested_blocks_with_tabs() {
        let input = "f() {\n  loop {\n     x++\n  }\n}";
        let expected = "f() {\n\tloop {\n\t\tx++\n\t}\n}";
        assert_eq!(reindent(input, &tabs()), expected);
    }

    #[test]
    fn test_continuation_lines() {
        let input = "x := foo(a,\nb,\nc)\ny := 1";
        let expected = "x := foo(a,\n    b,\n    c)\ny := 1";
        assert_eq!(reindent(input, &spaces()), expected);
    }

    #[test]
    fn test_continuation_inside_block() {
        let input = "{\nfoo(a,\nb)\n}";
        let expected = "{\n    foo(a,\n        b)\n}";
        assert_eq!(reindent(input, &spaces()), expected);
    }

    #[test]
    fn test_continuation_ending_with_brace() {
        let input = "if (a\n&& b) {\nc()\n}";
        let expected = "if (a\n    && b) {\n    c()\n}";
        assert_eq!(reindent(input, &spaces()), expected);
    }

    #[test]
    fn test_continuation_starting_with_word_operator() {
        let input = "if (a\nor b) {\nx()\n}\ny := 1";
        let expected = "if (a\n    or b) {\n    x()\n}\ny := 1";
        assert_eq!(reindent(input, &spaces()), expected);

        let input = "x := (a\nand not b)\ny := 1";
        let expected = "x := (a\n    and not b)\ny := 1";
        assert_eq!(reindent(input, &spaces()), expected);
    }

    #[test]
    fn test_continuation_starting_with_identifier_and_string() {
        let input = "MsgBox(Format(\"{}\",\nvalue \" s\"))\ny := 1";
        let expected = "MsgBox(Format(\"{}\",\n    value \" s\"))\ny := 1";
        let (output, state) = reindent_from(input, &spaces(), ReflowState::default());
        assert_eq!(output, expected);
        assert_eq!(state, ReflowState::default());
    }

    #[test]
    fn test_preserve_continuation_indent() {
        let options = IndentOptions {
            preserve_continuation_indent: true,
            ..spaces()
        };
        let input = "x := foo(a,\n\n          b)";
        let expected = "x := foo(a,\n    \n          b)";
        assert_eq!(reindent(input, &options), expected);
    }

    #[test]
    fn test_empty_lines_lose_indentation() {
        let input = "{\n    \n}";
        assert_eq!(reindent(input, &spaces()), "{\n\n}");
    }

    #[test]
    fn test_braces_in_strings_and_comments_ignored() {
        let input = "if (x) { ; }\ns := \"}\"\nMsgBox, {\n}";
        let expected = "if (x) { ; }\n    s := \"}\"\n    MsgBox, {\n}";
        assert_eq!(reindent(input, &spaces()), expected);
    }

    #[test]
    fn test_unbalanced_closers_saturate() {
        let input = "}\n}\nx := 1";
        assert_eq!(reindent(input, &spaces()), "}\n}\nx := 1");
    }

    #[test]
    fn test_unbalanced_document_completes() {
        let (output, state) =
            reindent_from("f() {\ng(a,\nb", &spaces(), ReflowState::default());
        assert_eq!(output, "f() {\n    g(a,\n        b");
        assert_eq!(state.depth, 1);
        assert_eq!(state.continuation, 1);
    }

    #[test]
    fn test_injected_start_state() {
        let state = ReflowState {
            depth: 2,
            ..Default::default()
        };
        let (output, end) = reindent_from("x := 1\n}", &spaces(), state);
        assert_eq!(output, "        x := 1\n    }");
        assert_eq!(end.depth, 1);
    }

    #[test]
    fn test_crlf_preserved() {
        let input = "{\r\nx()\r\n}\r\n";
        assert_eq!(reindent(input, &spaces()), "{\r\n    x()\r\n}\r\n");
    }

    #[test]
    fn test_block_comment_interior_verbatim() {
        let input = "{\n/*\n  keep { this (\n*/\nx()\n}";
        let expected = "{\n    /*\n  keep { this (\n    */\n    x()\n}";
        assert_eq!(reindent(input, &spaces()), expected);
    }

    #[test]
    fn test_one_line_block_comment() {
        let input = "{\n/* { */\nx()\n}";
        let expected = "{\n    /* { */\n    x()\n}";
        assert_eq!(reindent(input, &spaces()), expected);
    }

    #[test]
    fn test_step_reports_next_state() {
        let (state, line) = ReflowState::default().step("  foo(", &spaces());
        assert_eq!(line, "foo(");
        assert!(state.is_continued());
        let (state, line) = state.step("x)", &spaces());
        assert_eq!(line, "    x)");
        assert!(!state.is_continued());
    }
}

//! AutoHotkey source formatting.
//!
//! This module contains the formatting passes, organized into submodules:
//! - [`indenter`]: Re-indents lines from brace depth and open parentheses
//! - [`parens`]: Single-line parenthesis and brace balance
//! - [`blank_lines`]: Limits runs of consecutive blank lines
//! - [`whitespace`]: Collapses runs of interior spaces

pub mod blank_lines;
pub mod indenter;
pub mod parens;
pub mod whitespace;

pub use blank_lines::{collapse_blank_runs, is_blank_line};
pub use indenter::{
    build_indentation_chars, build_indented_line, reindent, reindent_from, IndentOptions,
    ReflowState,
};
pub use parens::{brace_balance, has_unmatched_close, has_unmatched_open, paren_balance};
pub use whitespace::{trim_extra_spaces, trim_line_content};

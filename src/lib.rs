//! ahkfmt - Formatter for AutoHotkey scripts
//!
//! Re-indents scripts from their brace and parenthesis structure, limits
//! blank-line runs, collapses interior spaces and assembles completion
//! suggestions from an external script model.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::struct_excessive_bools)]

pub mod cli;
pub mod completion;
pub mod config;
pub mod directive;
pub mod error;
pub mod format;
pub mod parser;
pub mod process;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use completion::{provide_completion_items, CompletionItem, MethodRecord, ScriptModel};
pub use config::Config;
pub use directive::{find_directive, parse_directive, DirectiveOverrides};
pub use error::Result;
pub use format::{collapse_blank_runs, reindent, trim_extra_spaces, IndentOptions};
pub use parser::{purify, LineKind};
pub use process::{format_document, format_file};

//! Document processing and formatting pipeline.
//!
//! This module orchestrates the formatting passes over a whole script:
//!
//! - Re-indent every line from brace depth and open parentheses
//! - Limit runs of blank lines
//! - Collapse runs of interior spaces
//!
//! The entry points are [`format_document`] for in-memory text and
//! [`format_file`] which processes a buffered reader and writes formatted
//! output to any `Write` implementation.

pub mod pipeline;

pub use pipeline::{format_document, format_file};

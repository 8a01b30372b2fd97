//! AutoHotkey line parsing utilities.
//!
//! This module provides the per-line structural view the formatter works on:
//! - [`CharFilter`]: Iterator adapter driven by the string/comment scan state machine
//! - [`purify`]: Reduces a raw line to its nesting-relevant structure
//! - [`patterns`]: Precompiled regex patterns for line classification
//!
//! Nothing here is cumulative across lines; cross-line state (block depth,
//! open parentheses) is owned by the indenter.

pub mod char_filter;
pub mod patterns;
pub mod purify;

pub use char_filter::{CharFilter, ScanState};
pub use purify::{classify, purify, purify_expression, LineKind};

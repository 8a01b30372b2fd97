//! Completion suggestions from a script model.
//!
//! The model of a workspace (declared methods with their parameters, locals
//! and line ranges, plus each document's top-level variables) comes from an
//! external [`ScriptModel`]. This module only turns it into suggestions:
//! - every method, inserted as a call
//! - parameters and locals of the method enclosing the cursor
//! - the current document's top-level variables

pub mod provider;
pub mod types;

pub use provider::{provide_completion_items, ScriptModel, ScriptSnapshot};
pub use types::{CompletionItem, CompletionKind, MethodRecord};

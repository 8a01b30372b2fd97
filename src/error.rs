//! Error handling for ahkfmt.
//!
//! The formatting core is total over script text; the only reported failures
//! are invalid configuration and I/O in the front end. Both flow through
//! [`Result<T>`], an alias for `anyhow::Result<T>`.

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;

//! Formatting pipeline
//!
//! Implements the full-document formatting pipeline:
//! - Pass 1 (optional): Re-indentation
//! - Pass 2: Blank-line run limiting
//! - Pass 3 (optional): Interior space collapsing

use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::Config;
use crate::format::{collapse_blank_runs, reindent, trim_line_content};
use crate::Result;

/// Format a whole document held in memory
///
/// Fails only if the configuration is invalid; any script text is accepted.
pub fn format_document(text: &str, config: &Config) -> Result<String> {
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    // Pass 1: Indentation
    let indented = if config.impose_indent {
        reindent(text, &config.indent_options())
    } else {
        debug!("indentation disabled, keeping original leading whitespace");
        text.to_string()
    };

    // Pass 2: Blank lines
    let collapsed = collapse_blank_runs(&indented, config.max_blank_lines);

    // Pass 3: Interior spaces
    if !config.trim_extra_spaces {
        return Ok(collapsed);
    }
    let mut output = String::with_capacity(collapsed.len());
    for segment in collapsed.split_inclusive('\n') {
        let (line, terminator) = split_terminator(segment);
        output.push_str(&trim_line_content(line, true));
        output.push_str(terminator);
    }
    Ok(output)
}

/// Split a line segment into its content and its `\n` / `\r\n` terminator
fn split_terminator(segment: &str) -> (&str, &str) {
    let content = segment.trim_end_matches(['\n', '\r']);
    (content, &segment[content.len()..])
}

/// Format a script read from `input`, writing the result to `output`
pub fn format_file<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
    filename: &str,
) -> Result<()> {
    let mut contents = String::new();
    input.read_to_string(&mut contents)?;

    debug!(
        file = filename,
        lines = contents.lines().count(),
        "formatting"
    );

    let formatted = format_document(&contents, config)?;
    output.write_all(formatted.as_bytes())?;
    Ok(())
}

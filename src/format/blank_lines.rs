//! Blank-line run limiting
//!
//! A blank line is empty or holds only spaces and tabs. Runs before the first
//! non-blank line are dropped; later runs keep at most `max_allowed` lines,
//! with their original whitespace.

/// Check if a line (with or without its terminator) is blank
#[must_use]
pub fn is_blank_line(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r'])
        .chars()
        .all(|c| c == ' ' || c == '\t')
}

/// Limit runs of consecutive blank lines.
///
/// A negative `max_allowed` (`-1` by convention) disables the pass.
#[must_use]
pub fn collapse_blank_runs(text: &str, max_allowed: i32) -> String {
    let Ok(max_allowed) = usize::try_from(max_allowed) else {
        return text.to_string();
    };

    let mut output = String::with_capacity(text.len());
    let mut seen_content = false;
    let mut run = 0;

    for segment in text.split_inclusive('\n') {
        if is_blank_line(segment) {
            if !seen_content {
                continue;
            }
            run += 1;
            if run <= max_allowed {
                output.push_str(segment);
            }
        } else {
            seen_content = true;
            run = 0;
            output.push_str(segment);
        }
    }

    output
}

//! Bracket balance on purified lines
//!
//! Single-line, non-cumulative counts. The indenter accumulates them.

/// Net count of `open` minus `close` characters
fn balance(line: &str, open: char, close: char) -> isize {
    line.chars().fold(0isize, |acc, c| {
        if c == open {
            acc + 1
        } else if c == close {
            acc - 1
        } else {
            acc
        }
    })
}

/// Opening minus closing parentheses
#[must_use]
pub fn paren_balance(line: &str) -> isize {
    balance(line, '(', ')')
}

/// Opening minus closing braces
#[must_use]
pub fn brace_balance(line: &str) -> isize {
    balance(line, '{', '}')
}

/// True if the line leaves parentheses open
#[must_use]
pub fn has_unmatched_open(line: &str) -> bool {
    paren_balance(line) > 0
}

/// True if the line closes more parentheses than it opens
#[must_use]
pub fn has_unmatched_close(line: &str) -> bool {
    paren_balance(line) < 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_close() {
        assert!(has_unmatched_close(")"));
        assert!(!has_unmatched_close("()"));
        assert!(has_unmatched_close("())"));
        assert!(!has_unmatched_close("(::"));
        assert!(!has_unmatched_close(""));
    }

    #[test]
    fn test_unmatched_open() {
        assert!(has_unmatched_open("("));
        assert!(!has_unmatched_open("()"));
        assert!(has_unmatched_open("(()"));
        assert!(has_unmatched_open("(::"));
        assert!(!has_unmatched_open(""));
    }

    #[test]
    fn test_balance_counts() {
        assert_eq!(paren_balance("foo((a, b"), 2);
        assert_eq!(paren_balance("))"), -2);
        assert_eq!(brace_balance("} else {"), 0);
        assert_eq!(brace_balance("if (x) {"), 1);
    }
}

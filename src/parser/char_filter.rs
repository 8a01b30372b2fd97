//! `CharFilter` - Iterator that neutralizes strings and comments
//!
//! Wraps a line's characters and drives an explicit scan state machine
//! (see [`ScanState::transition`]). The filter yields only the characters
//! that survive purification: code outside strings, the quote pair of each
//! string literal, and escaped code characters. String contents and the
//! trailing `;` comment are dropped.

/// Scanner state while walking a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Ordinary code
    #[default]
    Code,
    /// A backtick was just seen in code; the next character is literal
    CodeEscaped,
    /// Inside a `"..."` literal
    String,
    /// A backtick was just seen inside a literal
    StringEscaped,
    /// A trailing comment started; nothing else on the line is kept
    Comment,
}

/// What to do with the character that drove a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Emit,
    Drop,
}

impl ScanState {
    /// Transition table for one character.
    ///
    /// | state         | `"`          | `` ` ``             | `;`            | other        |
    /// |---------------|--------------|---------------------|----------------|--------------|
    /// | Code          | emit, String | emit, CodeEscaped   | drop, Comment  | emit         |
    /// | CodeEscaped   | emit, Code   | emit, Code          | emit, Code     | emit, Code   |
    /// | String        | emit, Code   | drop, StringEscaped | drop           | drop         |
    /// | StringEscaped | drop, String | drop, String        | drop, String   | drop, String |
    /// | Comment       | drop         | drop                | drop           | drop         |
    #[must_use]
    pub fn transition(self, c: char) -> (ScanState, Action) {
        match (self, c) {
            (ScanState::Code, '"') => (ScanState::String, Action::Emit),
            (ScanState::Code, '`') => (ScanState::CodeEscaped, Action::Emit),
            (ScanState::Code, ';') => (ScanState::Comment, Action::Drop),
            (ScanState::Code, _) => (ScanState::Code, Action::Emit),
            (ScanState::CodeEscaped, _) => (ScanState::Code, Action::Emit),
            (ScanState::String, '"') => (ScanState::Code, Action::Emit),
            (ScanState::String, '`') => (ScanState::StringEscaped, Action::Drop),
            (ScanState::String, _) => (ScanState::String, Action::Drop),
            (ScanState::StringEscaped, _) => (ScanState::String, Action::Drop),
            (ScanState::Comment, _) => (ScanState::Comment, Action::Drop),
        }
    }

    /// Check if the scanner is inside a string literal
    #[must_use]
    pub fn in_string(self) -> bool {
        matches!(self, ScanState::String | ScanState::StringEscaped)
    }
}

/// Iterator adapter that yields the purified characters of a line
///
/// Yields `(position, character)` pairs where position is the byte offset in
/// the original line.
pub struct CharFilter<'a> {
    chars: std::str::CharIndices<'a>,
    state: ScanState,
}

impl<'a> CharFilter<'a> {
    /// Create a new `CharFilter` starting in code state
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        Self::with_state(content, ScanState::Code)
    }

    /// Create a `CharFilter` with an initial scan state
    #[must_use]
    pub fn with_state(content: &'a str, state: ScanState) -> Self {
        Self {
            chars: content.char_indices(),
            state,
        }
    }

    /// Current scan state
    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Check if we're currently inside a string
    #[must_use]
    pub fn in_string(&self) -> bool {
        self.state.in_string()
    }

    /// Collect the remaining purified characters into a string
    pub fn filter_all(&mut self) -> String {
        let size_hint = self.chars.size_hint().1.unwrap_or(0);
        let mut result = String::with_capacity(size_hint);
        for (_, c) in self.by_ref() {
            result.push(c);
        }
        result
    }
}

impl Iterator for CharFilter<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == ScanState::Comment {
                return None;
            }
            let (pos, c) = self.chars.next()?;
            let (next_state, action) = self.state.transition(c);
            self.state = next_state;
            if action == Action::Emit {
                return Some((pos, c));
            }
        }
    }
}

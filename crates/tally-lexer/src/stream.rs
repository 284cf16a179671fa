//! Sequential character cursor with one character of lookahead.

/// A source of characters for the lexer.
///
/// Positions are zero-based indices of the character last returned by
/// [`next_char`](CharStream::next_char). Reading past the end leaves the
/// position at the input length.
pub trait CharStream {
    /// Advance and return the next character, or `None` at end of input.
    fn next_char(&mut self) -> Option<char>;

    /// The next character, without advancing.
    fn peek_char(&self) -> Option<char>;

    /// The character last returned by `next_char`.
    fn current_char(&self) -> Option<char>;

    /// Index of the character last returned by `next_char`.
    fn current_position(&self) -> usize;
}

/// A [`CharStream`] over an in-memory string.
#[derive(Debug, Clone)]
pub struct StrCharStream {
    chars: Vec<char>,
    /// Number of characters handed out so far, counting one read past the end.
    consumed: usize,
}

impl StrCharStream {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            consumed: 0,
        }
    }
}

impl CharStream for StrCharStream {
    fn next_char(&mut self) -> Option<char> {
        if self.consumed <= self.chars.len() {
            self.consumed += 1;
        }
        self.chars.get(self.consumed - 1).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.consumed).copied()
    }

    fn current_char(&self) -> Option<char> {
        self.consumed
            .checked_sub(1)
            .and_then(|i| self.chars.get(i))
            .copied()
    }

    fn current_position(&self) -> usize {
        self.consumed.saturating_sub(1)
    }
}

impl From<&str> for StrCharStream {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_characters_in_order() {
        let mut s = StrCharStream::new("ab");
        assert_eq!(s.current_char(), None);
        assert_eq!(s.peek_char(), Some('a'));
        assert_eq!(s.next_char(), Some('a'));
        assert_eq!(s.current_position(), 0);
        assert_eq!(s.peek_char(), Some('b'));
        assert_eq!(s.next_char(), Some('b'));
        assert_eq!(s.current_char(), Some('b'));
        assert_eq!(s.current_position(), 1);
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let mut s = StrCharStream::new("ab");
        s.next_char();
        s.next_char();
        assert_eq!(s.peek_char(), None);
        assert_eq!(s.next_char(), None);
        assert_eq!(s.current_position(), 2);
        assert_eq!(s.next_char(), None);
        assert_eq!(s.current_position(), 2);
        assert_eq!(s.current_char(), None);
    }

    #[test]
    fn test_empty_input() {
        let mut s = StrCharStream::new("");
        assert_eq!(s.next_char(), None);
        assert_eq!(s.current_position(), 0);
    }

    #[test]
    fn test_positions_count_characters_not_bytes() {
        let mut s = StrCharStream::new("é+");
        s.next_char();
        assert_eq!(s.next_char(), Some('+'));
        assert_eq!(s.current_position(), 1);
    }
}

//! Token sources the parser can consume.

use crate::error::LexResult;
use crate::token::Token;

/// A stream of tokens with one token of lookahead.
///
/// Once the terminator is reached, every further call returns it again.
pub trait TokenSource {
    /// Consume and return the next token.
    fn next_token(&mut self) -> LexResult<Token>;

    /// Return the next token without consuming it.
    fn peek_token(&mut self) -> LexResult<Token>;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> LexResult<Token> {
        (**self).next_token()
    }

    fn peek_token(&mut self) -> LexResult<Token> {
        (**self).peek_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn next_token(&mut self) -> LexResult<Token> {
        (**self).next_token()
    }

    fn peek_token(&mut self) -> LexResult<Token> {
        (**self).peek_token()
    }
}

/// A [`TokenSource`] over tokens that were produced ahead of time.
///
/// When the list runs out (or an explicit terminator is reached) it keeps
/// returning a terminator positioned just past the last token.
#[derive(Debug, Clone)]
pub struct TokenList {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenList {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current(&self) -> Token {
        match self.tokens.get(self.pos) {
            Some(token) => token.clone(),
            None => Token::terminator(self.end_position()),
        }
    }

    fn end_position(&self) -> usize {
        self.tokens
            .last()
            .map(|t| t.position + t.text().chars().count())
            .unwrap_or(0)
    }
}

impl TokenSource for TokenList {
    fn next_token(&mut self) -> LexResult<Token> {
        let token = self.current();
        if !token.is_terminator() {
            self.pos += 1;
        }
        Ok(token)
    }

    fn peek_token(&mut self) -> LexResult<Token> {
        Ok(self.current())
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_appends_terminator_after_last_token() {
        let mut list = TokenList::new(vec![
            Token::new(TokenKind::Number, 0, "10"),
            Token::new(TokenKind::Plus, 2, "+"),
        ]);
        assert_eq!(list.next_token().unwrap().text(), "10");
        assert_eq!(list.peek_token().unwrap().kind, TokenKind::Plus);
        assert_eq!(list.next_token().unwrap().kind, TokenKind::Plus);
        assert_eq!(list.next_token().unwrap(), Token::terminator(3));
        assert_eq!(list.next_token().unwrap(), Token::terminator(3));
    }

    #[test]
    fn test_explicit_terminator_repeats() {
        let mut list = TokenList::new(vec![
            Token::terminator(0),
            Token::new(TokenKind::Number, 1, "1"),
        ]);
        assert!(list.next_token().unwrap().is_terminator());
        assert!(list.next_token().unwrap().is_terminator());
    }

    #[test]
    fn test_empty_list() {
        let mut list = TokenList::new(vec![]);
        assert_eq!(list.next_token().unwrap(), Token::terminator(0));
    }
}

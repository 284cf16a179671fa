//! Core tally lexer: turns a character stream into tokens on demand.
//!
//! Features:
//! - Identifiers are runs of ASCII letters; digits and `_` never continue one
//! - Numbers take digits and at most one `.`; a second `.` ends the number
//!   and is left for the next token
//! - Symbols use greedy longest-prefix matching against [`SYMBOLS`](crate::SYMBOLS)
//! - One token of lookahead for [`TokenSource::peek_token`]
//! - Errors are fatal: the first unknown character aborts lexing

use tracing::trace;

use crate::error::{LexError, LexResult};
use crate::source::TokenSource;
use crate::stream::{CharStream, StrCharStream};
use crate::token::{Token, TokenKind};

/// The tally lexer.
pub struct Lexer<S: CharStream = StrCharStream> {
    stream: S,
    /// Token scanned by `peek_token` and not yet handed out.
    lookahead: Option<Token>,
}

impl Lexer<StrCharStream> {
    /// Create a lexer over a string.
    pub fn from_source(source: &str) -> Self {
        Self::new(StrCharStream::new(source))
    }
}

impl<S: CharStream> Lexer<S> {
    /// Create a lexer over an existing character stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            lookahead: None,
        }
    }

    /// Lex the remaining input into a token vector ending with the terminator.
    pub fn tokenize(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_terminator();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan one token from the stream.
    fn scan(&mut self) -> LexResult<Token> {
        let mut buf = [0u8; 4];
        while let Some(ch) = self.stream.next_char() {
            if ch.is_ascii_alphabetic() {
                return Ok(self.scan_identifier(ch));
            }
            if ch.is_ascii_digit() {
                return Ok(self.scan_number(ch));
            }
            if TokenKind::is_symbol_prefix(ch.encode_utf8(&mut buf)) {
                return self.scan_symbol(ch);
            }
            if ch.is_whitespace() {
                continue;
            }
            return Err(LexError::UnknownCharacter {
                ch,
                position: self.stream.current_position(),
            });
        }
        Ok(Token::terminator(self.stream.current_position()))
    }

    fn scan_identifier(&mut self, first: char) -> Token {
        let mut text = String::from(first);
        while let Some(ch) = self.stream.peek_char() {
            if !ch.is_ascii_alphabetic() {
                break;
            }
            self.stream.next_char();
            text.push(ch);
        }
        self.make_token(TokenKind::Identifier, text)
    }

    fn scan_number(&mut self, first: char) -> Token {
        let mut text = String::from(first);
        let mut seen_dot = false;
        while let Some(ch) = self.stream.peek_char() {
            if ch == '.' {
                if seen_dot {
                    break;
                }
                seen_dot = true;
            } else if !ch.is_ascii_digit() {
                break;
            }
            self.stream.next_char();
            text.push(ch);
        }
        self.make_token(TokenKind::Number, text)
    }

    /// Greedy longest-prefix symbol match.
    ///
    /// The search string grows one peeked character at a time while some
    /// symbol still starts with it. A peeked character is consumed only once
    /// the loop commits to it, so the first non-matching character stays in
    /// the stream.
    fn scan_symbol(&mut self, first: char) -> LexResult<Token> {
        let mut search = String::from(first);
        let mut last_match = None;
        let mut has_peeked = false;
        while TokenKind::is_symbol_prefix(&search) {
            if has_peeked {
                self.stream.next_char();
            }
            if let Some(kind) = TokenKind::from_symbol(&search) {
                last_match = Some(kind);
            }
            match self.stream.peek_char() {
                Some(next) => search.push(next),
                None => break,
            }
            has_peeked = true;
        }
        match last_match {
            Some(kind) => {
                let text = kind.symbol().unwrap_or_default();
                Ok(self.make_token(kind, text))
            }
            // Unreachable while every symbol's first character is itself a
            // symbol in `SYMBOLS`.
            None => Err(LexError::UnknownSymbol {
                text: first.to_string(),
                position: self.stream.current_position(),
            }),
        }
    }

    /// Build a token whose last character is the stream's current character.
    fn make_token(&self, kind: TokenKind, text: impl Into<String>) -> Token {
        let text = text.into();
        let width = text.chars().count();
        let position = self.stream.current_position() + 1 - width.max(1);
        Token::new(kind, position, text)
    }
}

impl<S: CharStream> TokenSource for Lexer<S> {
    fn next_token(&mut self) -> LexResult<Token> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.scan()?,
        };
        trace!(kind = %token.kind, position = token.position, "token");
        Ok(token)
    }

    fn peek_token(&mut self) -> LexResult<Token> {
        if let Some(token) = &self.lookahead {
            return Ok(token.clone());
        }
        let token = self.scan()?;
        self.lookahead = Some(token.clone());
        Ok(token)
    }
}

impl From<&str> for Lexer<StrCharStream> {
    fn from(source: &str) -> Self {
        Self::from_source(source)
    }
}

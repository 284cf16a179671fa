//! Token types for the tally lexer.
//!
//! Defines [`TokenKind`] covering every lexeme of the expression grammar,
//! [`Token`], which pairs a kind with its source offset, and the symbol
//! table the lexer matches operators against.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every symbol the lexer recognises, paired with its token kind.
///
/// The first character of every entry is itself an entry, so any character
/// that starts a symbol lexes to at least a one-character token. The lexer
/// picks the longest entry that matches.
pub const SYMBOLS: &[(&str, TokenKind)] = &[
    // Unary
    ("!", TokenKind::Exclamation),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    // Relational / boolean
    ("!=", TokenKind::ExclamationEquals),
    ("=", TokenKind::Equals),
    (">", TokenKind::GreaterThan),
    (">=", TokenKind::GreaterThanEquals),
    ("<", TokenKind::LessThan),
    ("<=", TokenKind::LessThanEquals),
    ("&", TokenKind::Ampersand),
    ("|", TokenKind::Pipe),
    // Multiplicative
    ("/", TokenKind::Slash),
    ("*", TokenKind::Asterisk),
    ("%", TokenKind::Percent),
    // Punctuation
    (",", TokenKind::Comma),
    ("(", TokenKind::ParenOpen),
    (")", TokenKind::ParenClose),
    (".", TokenKind::Period),
];

/// Token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // ── Literals & names ─────────────────────────────────────

    /// `[A-Za-z]+`
    Identifier,
    /// Digits with at most one decimal point.
    Number,

    // ── Operators ────────────────────────────────────────────

    /// `!`
    Exclamation,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `=`
    Equals,
    /// `!=`
    ExclamationEquals,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEquals,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEquals,
    /// `&`
    Ampersand,
    /// `|`
    Pipe,

    // ── Punctuation ──────────────────────────────────────────

    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `,`
    Comma,
    /// `.`
    Period,

    // ── Special ──────────────────────────────────────────────

    /// End of input. Repeats once reached.
    Terminator,
}

impl TokenKind {
    /// Look up a symbol by its exact text.
    pub fn from_symbol(s: &str) -> Option<TokenKind> {
        SYMBOLS
            .iter()
            .find(|(text, _)| *text == s)
            .map(|(_, kind)| *kind)
    }

    /// Returns `true` if some symbol starts with `prefix`.
    pub fn is_symbol_prefix(prefix: &str) -> bool {
        SYMBOLS.iter().any(|(text, _)| text.starts_with(prefix))
    }

    /// The source text of a symbol kind.
    pub fn symbol(self) -> Option<&'static str> {
        SYMBOLS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => f.write_str("identifier"),
            TokenKind::Number => f.write_str("number"),
            TokenKind::Terminator => f.write_str("terminator"),
            other => f.write_str(other.symbol().unwrap_or("?")),
        }
    }
}

/// A token with its kind, the offset of its first character, and its text.
///
/// The terminator carries no text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            text: Some(text.into()),
        }
    }

    /// A symbol token, using the symbol's source text.
    pub fn symbol(kind: TokenKind, position: usize) -> Self {
        Self {
            kind,
            position,
            text: kind.symbol().map(str::to_string),
        }
    }

    /// The end-of-input token.
    pub fn terminator(position: usize) -> Self {
        Self {
            kind: TokenKind::Terminator,
            position,
            text: None,
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn is_terminator(&self) -> bool {
        self.kind == TokenKind::Terminator
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} '{}' at {}", self.kind, text, self.position),
            None => write!(f, "{} at {}", self.kind, self.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(TokenKind::from_symbol("<="), Some(TokenKind::LessThanEquals));
        assert_eq!(TokenKind::from_symbol("!"), Some(TokenKind::Exclamation));
        assert_eq!(TokenKind::from_symbol("=="), None);
        assert_eq!(TokenKind::Period.symbol(), Some("."));
        assert_eq!(TokenKind::Number.symbol(), None);
    }

    #[test]
    fn test_symbol_prefix() {
        assert!(TokenKind::is_symbol_prefix("!"));
        assert!(TokenKind::is_symbol_prefix("!="));
        assert!(!TokenKind::is_symbol_prefix("<<"));
        assert!(!TokenKind::is_symbol_prefix("_"));
    }

    #[test]
    fn test_symbol_first_characters_are_symbols() {
        // `scan_symbol` relies on this to always find a match.
        for (text, _) in SYMBOLS {
            let first: String = text.chars().take(1).collect();
            assert!(
                TokenKind::from_symbol(&first).is_some(),
                "'{first}' starts '{text}' but is not a symbol"
            );
        }
    }

    #[test]
    fn test_every_symbol_round_trips() {
        for (text, kind) in SYMBOLS {
            assert_eq!(kind.symbol(), Some(*text));
            assert_eq!(kind.to_string(), *text);
        }
    }

    #[test]
    fn test_token_display() {
        assert_eq!(
            Token::new(TokenKind::Identifier, 0, "floor").to_string(),
            "identifier 'floor' at 0"
        );
        assert_eq!(Token::terminator(10).to_string(), "terminator at 10");
    }

    #[test]
    fn test_token_json() {
        let json = serde_json::to_string(&Token::symbol(TokenKind::ParenOpen, 5)).unwrap();
        assert_eq!(json, r#"{"kind":"paren_open","position":5,"text":"("}"#);
        let json = serde_json::to_string(&Token::terminator(2)).unwrap();
        assert_eq!(json, r#"{"kind":"terminator","position":2}"#);
    }
}

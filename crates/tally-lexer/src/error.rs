//! Lexical errors. These abort the parse immediately.

use tally_types::ErrorCode;

/// A fatal lexical error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A character that starts no identifier, number or symbol.
    #[error("unknown token '{ch}' at position {position}")]
    UnknownCharacter { ch: char, position: usize },
    /// Characters that prefix a symbol without ever matching one.
    #[error("incomplete symbol '{text}' at position {position}")]
    UnknownSymbol { text: String, position: usize },
}

impl LexError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownCharacter { .. } => ErrorCode::UNKNOWN_CHARACTER,
            Self::UnknownSymbol { .. } => ErrorCode::UNKNOWN_SYMBOL,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            Self::UnknownCharacter { position, .. } | Self::UnknownSymbol { position, .. } => {
                *position
            }
        }
    }
}

/// Result alias for lexing.
pub type LexResult<T> = Result<T, LexError>;

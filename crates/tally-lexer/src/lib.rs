//! Tally lexer: converts expression text into a token stream.

pub mod error;
pub mod lexer;
pub mod source;
pub mod stream;
pub mod token;

pub use error::{LexError, LexResult};
pub use lexer::Lexer;
pub use source::{TokenList, TokenSource};
pub use stream::{CharStream, StrCharStream};
pub use token::{Token, TokenKind, SYMBOLS};

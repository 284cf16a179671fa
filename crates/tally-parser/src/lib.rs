//! Tally parser: compiles a token stream directly into an [`Evaluator`].
//!
//! There is no intermediate syntax tree. Each grammar production returns
//! the evaluator for what it matched, and grammar errors are collected in
//! [`ParseErrors`] instead of stopping the parse.
//!
//! ```
//! let result = tally_parser::parse("10 * 5 + 2").unwrap();
//! assert!(result.is_ok());
//! assert_eq!(result.evaluate_default(), Ok(tally_types::Value::Number(52.0)));
//! ```

mod config;
mod error;
pub mod grammar;
mod parse_expr;
mod parser;

pub use config::{ParserConfig, MAX_DEPTH};
pub use error::{ErrorMessage, ParseErrors};
pub use parser::{parse, parse_tokens, parse_with_config, ParseResult, Parser};

pub use tally_eval::{DefaultContext, EvaluationContext, Evaluator};

//! Shared types for tally.
//!
//! This crate defines the runtime value model, the resolver contract between
//! compiled expressions and their host, and the error codes used across the
//! lexer, parser and evaluator.

mod error;
mod path;
mod resolve;
mod value;

pub use error::{ErrorCategory, ErrorCode, EvalError, EvalResult, MAX_ERRORS};
pub use path::DottedIdentifier;
pub use resolve::{ResolutionContext, Resolver};
pub use value::{Environment, NativeFn, Value};

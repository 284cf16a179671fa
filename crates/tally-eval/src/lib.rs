//! Tally evaluator: compiled expression graphs and the contexts they run in.
//!
//! The parser produces an [`Evaluator`]; running it needs a [`Resolver`]
//! (usually a [`DefaultContext`] over a caller environment), or an
//! [`EvaluationContext`] when evaluations should be counted.
//!
//! [`Resolver`]: tally_types::Resolver

pub mod builtins;
pub mod context;
pub mod evaluator;
pub mod ops;

pub use builtins::{default_function, DEFAULT_FUNCTIONS};
pub use context::{DefaultContext, EvaluationContext};
pub use evaluator::Evaluator;
pub use ops::{BinaryOp, UnaryOp};

//! Compiled expressions.
//!
//! The parser emits an [`Evaluator`] directly while it consumes tokens; there
//! is no separate syntax tree. Each node owns its already-compiled operands
//! and the literal and operator data fixed at parse time, so running it again
//! costs only the evaluation work. Evaluation never mutates the graph, and
//! names are resolved through the supplied [`Resolver`] on every run.

use tally_types::{DottedIdentifier, EvalError, EvalResult, ResolutionContext, Resolver, Value};

use crate::context::DefaultContext;
use crate::ops::{BinaryOp, UnaryOp};

/// A compiled, side-effect-free expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluator {
    /// A numeric literal, converted once at parse time.
    Number(f64),
    /// A variable reference, resolved on each evaluation.
    Variable(DottedIdentifier),
    /// A call; the function is looked up on each evaluation.
    Call {
        name: DottedIdentifier,
        args: Vec<Evaluator>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Evaluator>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Evaluator>,
        right: Box<Evaluator>,
    },
    /// A left-associative run such as `a + b - c`, folded in order.
    ///
    /// Kept flat so that long chains cost no stack depth when evaluated or
    /// dropped.
    Chain {
        first: Box<Evaluator>,
        rest: Vec<(BinaryOp, Evaluator)>,
    },
    /// Placeholder for a factor that failed to parse.
    Invalid { position: usize },
}

impl Evaluator {
    pub fn unary(op: UnaryOp, operand: Evaluator) -> Self {
        Evaluator::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Evaluator, right: Evaluator) -> Self {
        Evaluator::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build a left-associative chain. A chain with no operators is just
    /// its first operand.
    pub fn chain(first: Evaluator, rest: Vec<(BinaryOp, Evaluator)>) -> Self {
        if rest.is_empty() {
            return first;
        }
        Evaluator::Chain {
            first: Box::new(first),
            rest,
        }
    }

    /// Evaluate against a resolver, as the first (ordinal 0) evaluation.
    pub fn evaluate(&self, resolver: &dyn Resolver) -> EvalResult<Value> {
        self.evaluate_with(resolver, &ResolutionContext::default())
    }

    /// Evaluate against the default function table and an empty environment.
    pub fn evaluate_default(&self) -> EvalResult<Value> {
        self.evaluate(&DefaultContext::default())
    }

    /// Evaluate with explicit per-evaluation context.
    pub fn evaluate_with(
        &self,
        resolver: &dyn Resolver,
        ctx: &ResolutionContext,
    ) -> EvalResult<Value> {
        match self {
            Evaluator::Number(n) => Ok(Value::Number(*n)),
            Evaluator::Variable(path) => resolver.resolve_variable(path, ctx),
            Evaluator::Call { name, args } => {
                let function = resolver.resolve_function(name, ctx)?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(arg.evaluate_with(resolver, ctx)?);
                }
                function.call(&values)
            }
            Evaluator::Unary { op, operand } => op.apply(&operand.evaluate_with(resolver, ctx)?),
            Evaluator::Binary { op, left, right } => {
                let lhs = left.evaluate_with(resolver, ctx)?;
                apply_binary(*op, lhs, right, resolver, ctx)
            }
            Evaluator::Chain { first, rest } => {
                let mut acc = first.evaluate_with(resolver, ctx)?;
                for (op, operand) in rest {
                    acc = apply_binary(*op, acc, operand, resolver, ctx)?;
                }
                Ok(acc)
            }
            Evaluator::Invalid { position } => Err(EvalError::InvalidExpression {
                position: *position,
            }),
        }
    }

    /// Returns `false` if any node is a parse-error placeholder.
    pub fn is_complete(&self) -> bool {
        match self {
            Evaluator::Number(_) | Evaluator::Variable(_) => true,
            Evaluator::Call { args, .. } => args.iter().all(Evaluator::is_complete),
            Evaluator::Unary { operand, .. } => operand.is_complete(),
            Evaluator::Binary { left, right, .. } => left.is_complete() && right.is_complete(),
            Evaluator::Chain { first, rest } => {
                first.is_complete() && rest.iter().all(|(_, operand)| operand.is_complete())
            }
            Evaluator::Invalid { .. } => false,
        }
    }
}

/// Combine an evaluated left operand with the right one, running the right
/// operand only if the operator needs it.
fn apply_binary(
    op: BinaryOp,
    lhs: Value,
    right: &Evaluator,
    resolver: &dyn Resolver,
    ctx: &ResolutionContext,
) -> EvalResult<Value> {
    if let Some(value) = op.short_circuit(&lhs) {
        return Ok(value);
    }
    let rhs = right.evaluate_with(resolver, ctx)?;
    op.apply(&lhs, &rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Evaluator {
        Evaluator::Number(n)
    }

    #[test]
    fn test_literal() {
        assert_eq!(num(12.56).evaluate_default(), Ok(Value::Number(12.56)));
    }

    #[test]
    fn test_nested_binary() {
        // 10 * 5 + 2
        let e = Evaluator::binary(
            BinaryOp::Add,
            Evaluator::binary(BinaryOp::Multiply, num(10.0), num(5.0)),
            num(2.0),
        );
        assert_eq!(e.evaluate_default(), Ok(Value::Number(52.0)));
    }

    #[test]
    fn test_and_skips_right_operand() {
        // The right side would fail if it ran.
        let e = Evaluator::binary(BinaryOp::And, num(0.0), Evaluator::Invalid { position: 2 });
        assert_eq!(e.evaluate_default(), Ok(Value::Bool(false)));
        let e = Evaluator::binary(BinaryOp::Or, num(1.0), Evaluator::Invalid { position: 2 });
        assert_eq!(e.evaluate_default(), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_invalid_node_fails() {
        let e = Evaluator::unary(UnaryOp::Negate, Evaluator::Invalid { position: 1 });
        assert!(!e.is_complete());
        assert_eq!(
            e.evaluate_default(),
            Err(EvalError::InvalidExpression { position: 1 })
        );
    }

    #[test]
    fn test_chain_folds_left() {
        // 10 - 4 - 3
        let e = Evaluator::chain(
            num(10.0),
            vec![(BinaryOp::Subtract, num(4.0)), (BinaryOp::Subtract, num(3.0))],
        );
        assert_eq!(e.evaluate_default(), Ok(Value::Number(3.0)));
        assert_eq!(Evaluator::chain(num(1.0), Vec::new()), num(1.0));
    }

    #[test]
    fn test_long_chain_is_flat() {
        let rest = (0..200_000).map(|_| (BinaryOp::Add, num(1.0))).collect();
        let e = Evaluator::chain(num(0.0), rest);
        assert_eq!(e.evaluate_default(), Ok(Value::Number(200_000.0)));
        drop(e);
    }

    #[test]
    fn test_default_functions_are_callable() {
        let e = Evaluator::Call {
            name: DottedIdentifier::single("abs"),
            args: vec![Evaluator::unary(UnaryOp::Negate, num(1.0))],
        };
        assert!(e.is_complete());
        assert_eq!(e.evaluate_default(), Ok(Value::Number(1.0)));
    }
}

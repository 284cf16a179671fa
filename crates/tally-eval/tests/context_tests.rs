//! Resolution and evaluation-context tests over hand-built evaluators.

use tally_eval::{BinaryOp, DefaultContext, EvaluationContext, Evaluator, UnaryOp};
use tally_types::{DottedIdentifier, Environment, EvalError, Value};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn var(path: &str) -> Evaluator {
    let segments = path.split('.').map(str::to_string).collect();
    Evaluator::Variable(DottedIdentifier::new(segments).unwrap())
}

fn call(name: &str, args: Vec<Evaluator>) -> Evaluator {
    Evaluator::Call {
        name: DottedIdentifier::single(name),
        args,
    }
}

fn env(entries: &[(&str, Value)]) -> Environment {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────
// Default context
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_nested_map_lookup() {
    let ctx = DefaultContext::new(env(&[(
        "a",
        Value::map([("b", Value::map([("c", Value::Number(3.0))]))]),
    )]));
    assert_eq!(var("a.b.c").evaluate(&ctx), Ok(Value::Number(3.0)));
    assert!(matches!(var("a.b").evaluate(&ctx), Ok(Value::Map(_))));
}

#[test]
fn test_default_function_as_variable() {
    let ctx = DefaultContext::default();
    assert!(matches!(var("sqrt").evaluate(&ctx), Ok(Value::Function(_))));
    assert_eq!(
        var("sqrt.x").evaluate(&ctx),
        Err(EvalError::NotTraversable {
            path: "sqrt".into(),
            segment: "x".into(),
            found: "function"
        })
    );
}

#[test]
fn test_arguments_evaluated_in_order() {
    let expr = call(
        "max",
        vec![
            Evaluator::Number(1.0),
            Evaluator::binary(BinaryOp::Multiply, var("x"), Evaluator::Number(4.0)),
            Evaluator::unary(UnaryOp::Negate, Evaluator::Number(9.0)),
        ],
    );
    let ctx = DefaultContext::new(env(&[("x", Value::Number(2.0))]));
    assert_eq!(expr.evaluate(&ctx), Ok(Value::Number(8.0)));
}

#[test]
fn test_function_resolved_before_arguments() {
    let expr = call("nope", vec![var("missing")]);
    assert_eq!(
        expr.evaluate_default(),
        Err(EvalError::UnresolvedName {
            path: "nope".into()
        })
    );
}

// ─────────────────────────────────────────────────────────────────────
// Evaluation context
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_context_keeps_evaluator_and_resolver() {
    let expr = Evaluator::binary(BinaryOp::Add, var("x"), Evaluator::Number(1.0));
    let mut ctx = EvaluationContext::new(expr.clone(), DefaultContext::from(env(&[(
        "x",
        Value::Number(1.0),
    )])));
    assert_eq!(ctx.evaluator(), &expr);
    assert_eq!(ctx.evaluate(), Ok(Value::Number(2.0)));
    assert_eq!(ctx.resolver().environment().len(), 1);
}

#[test]
fn test_reset_is_idempotent() {
    let mut ctx = EvaluationContext::with_defaults(Evaluator::Number(0.0));
    ctx.reset();
    ctx.reset();
    assert_eq!(ctx.ordinal(), 0);
    for expected in 1..=5 {
        ctx.evaluate().unwrap();
        assert_eq!(ctx.ordinal(), expected);
    }
}

#[test]
fn test_invalid_node_fails_at_evaluation() {
    let mut ctx = EvaluationContext::with_defaults(Evaluator::binary(
        BinaryOp::Add,
        Evaluator::Number(1.0),
        Evaluator::Invalid { position: 4 },
    ));
    assert_eq!(
        ctx.evaluate(),
        Err(EvalError::InvalidExpression { position: 4 })
    );
}

//! Operator semantics bound into compiled expressions at parse time.

use std::fmt;
use tally_types::{EvalError, EvalResult, Value};

/// Prefix operators, applied to the first term of a simple expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Negate,
    /// `!x`
    Not,
}

/// Binary operators, grouped by precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // additive
    Add,
    Subtract,
    // multiplicative
    Multiply,
    Divide,
    Modulo,
    // relational / boolean
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }

    pub fn apply(self, operand: &Value) -> EvalResult<Value> {
        match self {
            UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
            UnaryOp::Plus => Ok(Value::Number(numeric(self.symbol(), operand)?)),
            UnaryOp::Negate => Ok(Value::Number(-numeric(self.symbol(), operand)?)),
        }
    }
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Equal => "=",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
        }
    }

    /// `&` and `|` decide from the left operand alone when they can.
    pub fn is_short_circuit(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// The value a short-circuit operator settles on from its left operand,
    /// or `None` when the right operand must run.
    pub fn short_circuit(self, left: &Value) -> Option<Value> {
        if !self.is_short_circuit() {
            return None;
        }
        let truthy = left.is_truthy();
        (truthy == (self == BinaryOp::Or)).then_some(Value::Bool(truthy))
    }

    /// Apply the operator to two evaluated operands.
    ///
    /// Short-circuit operators are normally handled by the evaluator before
    /// the right operand runs; here they just combine truthiness.
    pub fn apply(self, left: &Value, right: &Value) -> EvalResult<Value> {
        let op = self.symbol();
        let value = match self {
            BinaryOp::Add => Value::Number(numeric(op, left)? + numeric(op, right)?),
            BinaryOp::Subtract => Value::Number(numeric(op, left)? - numeric(op, right)?),
            BinaryOp::Multiply => Value::Number(numeric(op, left)? * numeric(op, right)?),
            BinaryOp::Divide => Value::Number(numeric(op, left)? / numeric(op, right)?),
            BinaryOp::Modulo => Value::Number(numeric(op, left)? % numeric(op, right)?),
            BinaryOp::Equal => Value::Bool(equals(op, left, right)?),
            BinaryOp::NotEqual => Value::Bool(!equals(op, left, right)?),
            BinaryOp::Less => Value::Bool(numeric(op, left)? < numeric(op, right)?),
            BinaryOp::LessEqual => Value::Bool(numeric(op, left)? <= numeric(op, right)?),
            BinaryOp::Greater => Value::Bool(numeric(op, left)? > numeric(op, right)?),
            BinaryOp::GreaterEqual => Value::Bool(numeric(op, left)? >= numeric(op, right)?),
            BinaryOp::And => Value::Bool(left.is_truthy() && right.is_truthy()),
            BinaryOp::Or => Value::Bool(left.is_truthy() || right.is_truthy()),
        };
        Ok(value)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

fn numeric(op: &str, value: &Value) -> EvalResult<f64> {
    value.as_number().ok_or_else(|| EvalError::TypeMismatch {
        op: op.to_string(),
        found: value.type_name(),
    })
}

/// Numbers compare numerically, booleans by value; the two never mix.
fn equals(op: &str, left: &Value, right: &Value) -> EvalResult<bool> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Number(_), Value::Bool(_)) | (Value::Bool(_), Value::Number(_)) => Ok(false),
        (Value::Number(_) | Value::Bool(_), other) | (other, _) => Err(EvalError::TypeMismatch {
            op: op.to_string(),
            found: other.type_name(),
        }),
    }
}

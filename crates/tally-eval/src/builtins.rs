//! Default function table available to every expression.
//!
//! Initialized once on first use and never mutated. Caller environments
//! shadow these names; they do not modify the table.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use tally_types::{EvalError, EvalResult, NativeFn, Value};

/// Registry of the built-in numeric functions, keyed by name.
pub static DEFAULT_FUNCTIONS: LazyLock<BTreeMap<String, NativeFn>> = LazyLock::new(|| {
    [
        unary("abs", f64::abs),
        unary("floor", f64::floor),
        unary("ceil", f64::ceil),
        unary("exp", f64::exp),
        unary("log", f64::ln),
        unary("log10", f64::log10),
        unary("sqrt", f64::sqrt),
        unary("sign", sign),
        unary("round", round),
        NativeFn::new("pow", 2, |args| {
            let base = number_arg("pow", &args[0])?;
            let exponent = number_arg("pow", &args[1])?;
            Ok(Value::Number(base.powf(exponent)))
        }),
        NativeFn::variadic("max", |args| fold("max", args, f64::NEG_INFINITY, f64::max)),
        NativeFn::variadic("min", |args| fold("min", args, f64::INFINITY, f64::min)),
    ]
    .into_iter()
    .map(|f| (f.name().to_string(), f))
    .collect()
});

/// Look up a built-in function.
pub fn default_function(name: &str) -> Option<&'static NativeFn> {
    DEFAULT_FUNCTIONS.get(name)
}

fn unary(name: &'static str, f: fn(f64) -> f64) -> NativeFn {
    NativeFn::new(name, 1, move |args| {
        Ok(Value::Number(f(number_arg(name, &args[0])?)))
    })
}

fn number_arg(name: &str, value: &Value) -> EvalResult<f64> {
    value.as_number().ok_or_else(|| EvalError::TypeMismatch {
        op: name.to_string(),
        found: value.type_name(),
    })
}

/// `max`/`min` over any number of arguments. NaN in, NaN out.
fn fold(name: &str, args: &[Value], init: f64, pick: fn(f64, f64) -> f64) -> EvalResult<Value> {
    let mut acc = init;
    for arg in args {
        let n = number_arg(name, arg)?;
        if n.is_nan() {
            return Ok(Value::Number(f64::NAN));
        }
        acc = pick(acc, n);
    }
    Ok(Value::Number(acc))
}

/// -1, 0 or 1; zero and NaN are returned unchanged.
fn sign(x: f64) -> f64 {
    if x == 0.0 || x.is_nan() {
        x
    } else {
        x.signum()
    }
}

/// Nearest integer, with halves rounded toward positive infinity.
fn round(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

//! Runtime values seen by compiled expressions.

use crate::error::{EvalError, EvalResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied bindings: names to numbers, booleans, nested maps or functions.
pub type Environment = BTreeMap<String, Value>;

type NativeFnImpl = dyn Fn(&[Value]) -> EvalResult<Value> + Send + Sync;

/// A host function callable from an expression.
///
/// `arity` is `None` for variadic functions; otherwise the argument count
/// is checked before the body runs.
#[derive(Clone)]
pub struct NativeFn {
    name: Arc<str>,
    arity: Option<usize>,
    body: Arc<NativeFnImpl>,
}

impl NativeFn {
    /// A function taking exactly `arity` arguments.
    pub fn new<F>(name: &str, arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> EvalResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            arity: Some(arity),
            body: Arc::new(body),
        }
    }

    /// A function taking any number of arguments.
    pub fn variadic<F>(name: &str, body: F) -> Self
    where
        F: Fn(&[Value]) -> EvalResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            arity: None,
            body: Arc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    /// Invoke the function, checking arity first.
    pub fn call(&self, args: &[Value]) -> EvalResult<Value> {
        if let Some(expected) = self.arity {
            if args.len() != expected {
                return Err(EvalError::ArityMismatch {
                    name: self.name.to_string(),
                    expected,
                    found: args.len(),
                });
            }
        }
        (self.body)(args)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity {
            Some(n) => write!(f, "<fn {}/{}>", self.name, n),
            None => write!(f, "<fn {}/*>", self.name),
        }
    }
}

impl PartialEq for NativeFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

/// A dynamically-typed runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Map(BTreeMap<String, Value>),
    Function(NativeFn),
}

impl Value {
    /// Build a map value from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wrap a fixed-arity closure as a function value.
    pub fn function<F>(name: &str, arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> EvalResult<Value> + Send + Sync + 'static,
    {
        Value::Function(NativeFn::new(name, arity, body))
    }

    /// Human-readable name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Map(_) => "map",
            Value::Function(_) => "function",
        }
    }

    /// Truthiness used by `!`, `&` and `|`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Map(_) | Value::Function(_) => true,
        }
    }

    /// Numeric view of the value. Booleans coerce to 1 and 0.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Map(_) | Value::Function(_) => None,
        }
    }

    /// Member lookup on a map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(fields) => fields.get(key),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NativeFn> for Value {
    fn from(f: NativeFn) -> Self {
        Value::Function(f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Map(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Function(func) => write!(f, "{func:?}"),
        }
    }
}

/// Environments can be loaded from JSON. Only numbers, booleans and
/// objects have a runtime representation.
impl TryFrom<serde_json::Value> for Value {
    type Error = EvalError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        let unsupported = |found| EvalError::TypeMismatch {
            op: "json".to_string(),
            found,
        };
        match json {
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| unsupported("number")),
            serde_json::Value::Object(fields) => {
                let mut map = BTreeMap::new();
                for (k, v) in fields {
                    map.insert(k, Value::try_from(v)?);
                }
                Ok(Value::Map(map))
            }
            serde_json::Value::String(_) => Err(unsupported("string")),
            serde_json::Value::Array(_) => Err(unsupported("array")),
            serde_json::Value::Null => Err(unsupported("null")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(Value::Number(-2.0).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::map::<&str, _>([]).is_truthy());
    }

    #[test]
    fn test_bool_coerces_to_number() {
        assert_eq!(Value::Bool(true).as_number(), Some(1.0));
        assert_eq!(Value::Bool(false).as_number(), Some(0.0));
        assert_eq!(Value::map::<&str, _>([]).as_number(), None);
    }

    #[test]
    fn test_native_fn_arity_check() {
        let double = NativeFn::new("double", 1, |args| {
            Ok(Value::Number(args[0].as_number().unwrap_or(0.0) * 2.0))
        });
        assert_eq!(double.call(&[Value::Number(4.0)]), Ok(Value::Number(8.0)));
        let err = double.call(&[]).unwrap_err();
        assert_eq!(
            err,
            EvalError::ArityMismatch {
                name: "double".into(),
                expected: 1,
                found: 0
            }
        );
    }

    #[test]
    fn test_native_fn_equality_is_identity() {
        let a = NativeFn::variadic("a", |_| Ok(Value::Bool(true)));
        let b = NativeFn::variadic("a", |_| Ok(Value::Bool(true)));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_map_get() {
        let v = Value::map([("bar", Value::Number(6.0))]);
        assert_eq!(v.get("bar"), Some(&Value::Number(6.0)));
        assert_eq!(v.get("baz"), None);
        assert_eq!(Value::Number(1.0).get("bar"), None);
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({ "x": 10, "foo": { "bar": 6.5, "on": true } });
        let value = Value::try_from(json).unwrap();
        assert_eq!(value.get("x"), Some(&Value::Number(10.0)));
        let foo = value.get("foo").unwrap();
        assert_eq!(foo.get("bar"), Some(&Value::Number(6.5)));
        assert_eq!(foo.get("on"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_from_json_rejects_strings() {
        let err = Value::try_from(serde_json::json!({ "name": "x" })).unwrap_err();
        assert_eq!(
            err,
            EvalError::TypeMismatch {
                op: "json".into(),
                found: "string"
            }
        );
    }

    #[test]
    fn test_display() {
        let v = Value::map([("a", Value::Number(1.0)), ("b", Value::Bool(false))]);
        assert_eq!(v.to_string(), "{a: 1, b: false}");
    }
}

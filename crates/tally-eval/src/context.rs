//! Resolution contexts: the default environment-backed resolver and the
//! ordinal-tracking evaluation context.

use tracing::debug;

use tally_types::{
    DottedIdentifier, Environment, EvalError, EvalResult, NativeFn, ResolutionContext, Resolver,
    Value,
};

use crate::builtins::default_function;
use crate::evaluator::Evaluator;

/// Resolves names against a caller environment layered over the default
/// function table.
///
/// The environment is consulted first, so a caller binding shadows a
/// built-in of the same name. Neither layer is modified by resolution.
#[derive(Debug, Clone, Default)]
pub struct DefaultContext {
    environment: Environment,
}

impl DefaultContext {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Replace the caller environment. Takes effect on the next evaluation.
    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    fn lookup_variable(&self, path: &DottedIdentifier) -> EvalResult<Value> {
        let segments = path.segments();
        let root = path.root();

        let Some(mut current) = self.environment.get(root) else {
            let function = default_function(root).ok_or_else(|| EvalError::UnresolvedName {
                path: root.to_string(),
            })?;
            return match segments.get(1) {
                None => Ok(Value::Function(function.clone())),
                Some(segment) => Err(EvalError::NotTraversable {
                    path: root.to_string(),
                    segment: segment.clone(),
                    found: "function",
                }),
            };
        };

        for (i, segment) in segments.iter().enumerate().skip(1) {
            current = match current {
                Value::Map(fields) => {
                    fields
                        .get(segment)
                        .ok_or_else(|| EvalError::UnresolvedName {
                            path: segments[..=i].join("."),
                        })?
                }
                other => {
                    return Err(EvalError::NotTraversable {
                        path: segments[..i].join("."),
                        segment: segment.clone(),
                        found: other.type_name(),
                    })
                }
            };
        }
        Ok(current.clone())
    }

    fn lookup_function(&self, name: &DottedIdentifier) -> EvalResult<NativeFn> {
        let key = name.joined();
        match self.environment.get(&key) {
            Some(Value::Function(function)) => Ok(function.clone()),
            Some(other) => Err(EvalError::NotCallable {
                name: key,
                found: other.type_name(),
            }),
            None => default_function(&key)
                .cloned()
                .ok_or(EvalError::UnresolvedName { path: key }),
        }
    }
}

impl Resolver for DefaultContext {
    fn resolve_variable(
        &self,
        path: &DottedIdentifier,
        _ctx: &ResolutionContext,
    ) -> EvalResult<Value> {
        self.lookup_variable(path).inspect_err(|e| {
            debug!(path = %path, code = %e.code(), "variable resolution failed");
        })
    }

    fn resolve_function(
        &self,
        name: &DottedIdentifier,
        _ctx: &ResolutionContext,
    ) -> EvalResult<NativeFn> {
        self.lookup_function(name).inspect_err(|e| {
            debug!(name = %name, code = %e.code(), "function resolution failed");
        })
    }
}

impl From<Environment> for DefaultContext {
    fn from(environment: Environment) -> Self {
        Self::new(environment)
    }
}

/// Pairs one compiled expression with one resolver and counts evaluations.
///
/// Each [`evaluate`](Self::evaluate) call passes the current ordinal to the
/// resolver and then advances it by one; [`reset`](Self::reset) returns it to
/// zero. This is the only mutable state around a compiled expression, so it
/// is not meant to be shared between threads.
#[derive(Debug)]
pub struct EvaluationContext<R: Resolver = DefaultContext> {
    evaluator: Evaluator,
    resolver: R,
    ordinal: u64,
}

impl<R: Resolver> EvaluationContext<R> {
    pub fn new(evaluator: Evaluator, resolver: R) -> Self {
        Self {
            evaluator,
            resolver,
            ordinal: 0,
        }
    }

    /// Run the expression as the next evaluation in the sequence.
    pub fn evaluate(&mut self) -> EvalResult<Value> {
        let ctx = ResolutionContext::new(self.ordinal);
        self.ordinal += 1;
        self.evaluator.evaluate_with(&self.resolver, &ctx)
    }

    /// Restart the evaluation count at zero.
    pub fn reset(&mut self) {
        self.ordinal = 0;
    }

    /// Number of evaluations since creation or the last reset.
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }
}

impl EvaluationContext<DefaultContext> {
    /// Evaluate against the default function table and an empty environment.
    pub fn with_defaults(evaluator: Evaluator) -> Self {
        Self::new(evaluator, DefaultContext::default())
    }
}

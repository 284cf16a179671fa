//! The contract between compiled expressions and the host.

use crate::error::EvalResult;
use crate::path::DottedIdentifier;
use crate::value::{NativeFn, Value};

/// Per-evaluation information handed to every resolver call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    /// Zero-based count of evaluations already run in the owning
    /// evaluation context. Always 0 for one-shot evaluation.
    pub ordinal: u64,
}

impl ResolutionContext {
    pub fn new(ordinal: u64) -> Self {
        Self { ordinal }
    }
}

/// Binds identifiers and function names to runtime values.
///
/// Implementations must not mutate their bindings while resolving; a compiled
/// expression may be evaluated against the same resolver from several threads.
pub trait Resolver {
    /// Resolve a variable reference, walking nested maps segment by segment.
    fn resolve_variable(
        &self,
        path: &DottedIdentifier,
        ctx: &ResolutionContext,
    ) -> EvalResult<Value>;

    /// Resolve a function by name.
    fn resolve_function(
        &self,
        name: &DottedIdentifier,
        ctx: &ResolutionContext,
    ) -> EvalResult<NativeFn>;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve_variable(
        &self,
        path: &DottedIdentifier,
        ctx: &ResolutionContext,
    ) -> EvalResult<Value> {
        (**self).resolve_variable(path, ctx)
    }

    fn resolve_function(
        &self,
        name: &DottedIdentifier,
        ctx: &ResolutionContext,
    ) -> EvalResult<NativeFn> {
        (**self).resolve_function(name, ctx)
    }
}

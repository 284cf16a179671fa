use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of grammar errors stored before the rest are only counted.
pub const MAX_ERRORS: usize = 20;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Resolution,
    Type,
}

/// Numeric error code (E001–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Lexical errors (E001–E099) ──
    pub const UNKNOWN_CHARACTER: Self = Self(1);
    pub const UNKNOWN_SYMBOL: Self = Self(2);

    // ── Syntax errors (E100–E199) ──
    pub const UNEXPECTED_TOKEN: Self = Self(100);
    pub const UNCLOSED_PAREN: Self = Self(101);
    pub const EXPECTED_FACTOR: Self = Self(102);
    pub const NESTING_LIMIT_EXCEEDED: Self = Self(103);
    pub const TRAILING_TOKEN: Self = Self(104);

    // ── Resolution errors (E200–E299) ──
    pub const UNRESOLVED_NAME: Self = Self(200);
    pub const NOT_TRAVERSABLE: Self = Self(201);
    pub const NOT_CALLABLE: Self = Self(202);
    pub const ARITY_MISMATCH: Self = Self(203);

    // ── Type errors (E300–E399) ──
    pub const TYPE_MISMATCH: Self = Self(300);
    pub const INVALID_EXPRESSION: Self = Self(301);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            0..=99 => ErrorCategory::Lexical,
            100..=199 => ErrorCategory::Syntax,
            200..=299 => ErrorCategory::Resolution,
            _ => ErrorCategory::Type,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:03}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical"),
            Self::Syntax => write!(f, "syntax"),
            Self::Resolution => write!(f, "resolution"),
            Self::Type => write!(f, "type"),
        }
    }
}

/// Evaluation error, raised while a compiled expression runs.
///
/// The parser never checks names, arity or operand types; all of that
/// surfaces here, at the moment the offending node executes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// No binding exists for the name (or for one of its segments).
    #[error("unresolved name '{path}'")]
    UnresolvedName { path: String },
    /// A path segment was applied to a value that has no members.
    #[error("cannot access '{segment}' on non-map value '{path}' ({found})")]
    NotTraversable {
        path: String,
        segment: String,
        found: &'static str,
    },
    /// The name resolved, but not to a function.
    #[error("'{name}' is not callable ({found})")]
    NotCallable { name: String, found: &'static str },
    /// A built-in function received the wrong number of arguments.
    #[error("'{name}' expects {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    /// An operator was applied to an unsupported operand.
    #[error("operator '{op}' cannot be applied to {found}")]
    TypeMismatch { op: String, found: &'static str },
    /// A placeholder left behind by a grammar error was evaluated.
    #[error("expression at position {position} failed to parse")]
    InvalidExpression { position: usize },
}

impl EvalError {
    /// The stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnresolvedName { .. } => ErrorCode::UNRESOLVED_NAME,
            Self::NotTraversable { .. } => ErrorCode::NOT_TRAVERSABLE,
            Self::NotCallable { .. } => ErrorCode::NOT_CALLABLE,
            Self::ArityMismatch { .. } => ErrorCode::ARITY_MISMATCH,
            Self::TypeMismatch { .. } => ErrorCode::TYPE_MISMATCH,
            Self::InvalidExpression { .. } => ErrorCode::INVALID_EXPRESSION,
        }
    }
}

/// Result alias for evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_category() {
        assert_eq!(
            ErrorCode::UNKNOWN_CHARACTER.category(),
            ErrorCategory::Lexical
        );
        assert_eq!(ErrorCode::UNCLOSED_PAREN.category(), ErrorCategory::Syntax);
        assert_eq!(
            ErrorCode::NOT_CALLABLE.category(),
            ErrorCategory::Resolution
        );
        assert_eq!(ErrorCode::TYPE_MISMATCH.category(), ErrorCategory::Type);
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::UNKNOWN_SYMBOL), "E002");
        assert_eq!(format!("{}", ErrorCode::UNEXPECTED_TOKEN), "E100");
        assert_eq!(format!("{}", ErrorCategory::Resolution), "resolution");
    }

    #[test]
    fn test_eval_error_codes() {
        let err = EvalError::ArityMismatch {
            name: "pow".into(),
            expected: 2,
            found: 1,
        };
        assert_eq!(err.code(), ErrorCode::ARITY_MISMATCH);
        assert_eq!(err.to_string(), "'pow' expects 2 argument(s), got 1");

        let err = EvalError::InvalidExpression { position: 3 };
        assert_eq!(err.code().category(), ErrorCategory::Type);
    }

    #[test]
    fn test_error_code_json_serialization() {
        let json = serde_json::to_string(&ErrorCode::TRAILING_TOKEN).unwrap();
        assert_eq!(json, "104");
        let cat = serde_json::to_string(&ErrorCode::TRAILING_TOKEN.category()).unwrap();
        assert_eq!(cat, "\"syntax\"");
    }
}

//! Grammar diagnostics collected during a parse.

use serde::Serialize;
use std::fmt;
use tally_lexer::Token;
use tally_types::{ErrorCategory, ErrorCode, MAX_ERRORS};

/// A structured grammar error.
///
/// Recorded where the problem was detected; never raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorMessage {
    pub code: ErrorCode,
    pub category: ErrorCategory,
    /// Human-readable expected-vs-found description.
    pub text: String,
    /// The offending token.
    pub token: Token,
    /// Grammar productions active when the error was recorded, outermost first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl ErrorMessage {
    pub fn new(code: ErrorCode, text: impl Into<String>, token: Token) -> Self {
        Self {
            code,
            category: code.category(),
            text: text.into(),
            token,
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    pub fn position(&self) -> usize {
        self.token.position
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.token.position, self.code, self.category, self.text
        )
    }
}

/// Ordered grammar errors from one parse.
///
/// Storage is capped; `total_errors` keeps counting past the cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseErrors {
    pub errors: Vec<ErrorMessage>,
    pub total_errors: usize,
    #[serde(skip)]
    limit: usize,
}

impl ParseErrors {
    /// An empty list that stores up to `limit` errors.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            errors: Vec::new(),
            total_errors: 0,
            limit,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn is_empty(&self) -> bool {
        !self.has_errors()
    }

    /// Number of errors stored.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorMessage> {
        self.errors.iter()
    }

    pub fn first(&self) -> Option<&ErrorMessage> {
        self.errors.first()
    }

    /// Add an error, respecting the storage limit.
    pub fn push(&mut self, error: ErrorMessage) {
        if self.errors.len() < self.limit {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }
}

impl Default for ParseErrors {
    fn default() -> Self {
        Self::with_limit(MAX_ERRORS)
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ErrorMessage;
    type IntoIter = std::slice::Iter<'a, ErrorMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

use serde::{Deserialize, Serialize};
use tally_types::MAX_ERRORS;

/// Default limit on nested sub-expressions.
pub const MAX_DEPTH: usize = 64;

/// Parser limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Errors stored in a [`ParseErrors`](crate::ParseErrors); later ones are only counted.
    pub max_errors: usize,
    /// Maximum nesting of parenthesized expressions and call arguments.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_errors: MAX_ERRORS,
            max_depth: MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.max_errors, 20);
        assert_eq!(config.max_depth, 64);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ParserConfig = serde_json::from_str(r#"{ "max_depth": 4 }"#).unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_errors, MAX_ERRORS);
    }
}

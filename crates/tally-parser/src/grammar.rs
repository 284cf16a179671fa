//! Grammar tables: which tokens start which operators at each precedence level.

use tally_eval::{BinaryOp, UnaryOp};
use tally_lexer::TokenKind;

/// Prefix operators allowed at the start of a simple expression.
pub fn unary_op(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Minus => Some(UnaryOp::Negate),
        TokenKind::Exclamation => Some(UnaryOp::Not),
        _ => None,
    }
}

/// `+` and `-` between terms.
pub fn additive_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Subtract),
        _ => None,
    }
}

/// `*`, `/` and `%` between factors.
pub fn multiplicative_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Asterisk => Some(BinaryOp::Multiply),
        TokenKind::Slash => Some(BinaryOp::Divide),
        TokenKind::Percent => Some(BinaryOp::Modulo),
        _ => None,
    }
}

/// Comparison and boolean operators between simple expressions.
pub fn relational_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Equals => Some(BinaryOp::Equal),
        TokenKind::ExclamationEquals => Some(BinaryOp::NotEqual),
        TokenKind::LessThan => Some(BinaryOp::Less),
        TokenKind::LessThanEquals => Some(BinaryOp::LessEqual),
        TokenKind::GreaterThan => Some(BinaryOp::Greater),
        TokenKind::GreaterThanEquals => Some(BinaryOp::GreaterEqual),
        TokenKind::Ampersand => Some(BinaryOp::And),
        TokenKind::Pipe => Some(BinaryOp::Or),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_lexer::SYMBOLS;

    #[test]
    fn test_minus_is_both_unary_and_additive() {
        assert_eq!(unary_op(TokenKind::Minus), Some(UnaryOp::Negate));
        assert_eq!(additive_op(TokenKind::Minus), Some(BinaryOp::Subtract));
        assert_eq!(unary_op(TokenKind::Asterisk), None);
    }

    #[test]
    fn test_operator_symbols_match_tokens() {
        for (text, kind) in SYMBOLS {
            let op = additive_op(*kind)
                .or_else(|| multiplicative_op(*kind))
                .or_else(|| relational_op(*kind));
            if let Some(op) = op {
                assert_eq!(op.symbol(), *text);
            }
        }
    }

    #[test]
    fn test_punctuation_is_not_an_operator() {
        for kind in [TokenKind::Comma, TokenKind::Period, TokenKind::ParenOpen] {
            assert_eq!(relational_op(kind), None);
            assert_eq!(multiplicative_op(kind), None);
            assert_eq!(additive_op(kind), None);
        }
    }
}

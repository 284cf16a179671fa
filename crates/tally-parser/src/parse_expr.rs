//! Expression parsing with operator precedence.
//!
//! Precedence (lowest → highest):
//! 4. `= != < <= > >= & |` (at most one per expression)
//! 3. `+`, `-` (left-associative); a leading unary `+ - !` applies to the first term
//! 2. `*`, `/`, `%` (left-associative)
//! 1. number, dotted identifier, call, `( expression )`
//!
//! Every production returns a compiled [`Evaluator`] rather than a syntax
//! node: literals are converted and operators chosen here, once. Additive and
//! multiplicative runs compile to one flat chain each, so only parentheses
//! and call arguments add nesting, and those are bounded by `max_depth`.

use tally_eval::Evaluator;
use tally_lexer::{LexResult, TokenKind, TokenSource};
use tally_types::{DottedIdentifier, ErrorCode};

use crate::grammar::{additive_op, multiplicative_op, relational_op, unary_op};
use crate::parser::{describe_token, Parser};

impl<S: TokenSource> Parser<S> {
    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// `Expression = SimpleExpression [ RelOp SimpleExpression ]`
    ///
    /// Relational operators do not chain; a second one is left unconsumed.
    pub fn parse_expression(&mut self) -> LexResult<Evaluator> {
        self.rule("expression", |p| {
            let left = p.parse_simple_expression()?;
            let Some(op) = relational_op(p.peek_kind()?) else {
                return Ok(left);
            };
            p.advance()?; // consume operator
            let right = p.parse_simple_expression()?;
            Ok(Evaluator::binary(op, left, right))
        })
    }

    /// `SimpleExpression = [ UnaryOp ] Term { AddOp Term }`
    ///
    /// The unary operator wraps the whole first term, so `-2*3+1` is
    /// `(-(2*3))+1`.
    pub fn parse_simple_expression(&mut self) -> LexResult<Evaluator> {
        self.rule("simple_expression", |p| {
            let prefix = unary_op(p.peek_kind()?);
            if prefix.is_some() {
                p.advance()?;
            }
            let mut first = p.parse_term()?;
            if let Some(op) = prefix {
                first = Evaluator::unary(op, first);
            }
            let mut rest = Vec::new();
            while let Some(op) = additive_op(p.peek_kind()?) {
                p.advance()?;
                rest.push((op, p.parse_term()?));
            }
            Ok(Evaluator::chain(first, rest))
        })
    }

    /// `Term = Factor { MulOp Factor }`
    pub fn parse_term(&mut self) -> LexResult<Evaluator> {
        self.rule("term", |p| {
            let first = p.parse_factor()?;
            let mut rest = Vec::new();
            while let Some(op) = multiplicative_op(p.peek_kind()?) {
                p.advance()?;
                rest.push((op, p.parse_factor()?));
            }
            Ok(Evaluator::chain(first, rest))
        })
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Factors
    // ══════════════════════════════════════════════════════════════════════════

    /// `Factor = Number | DottedIdentifier [ FunctionCall ] | "(" Expression ")"`
    ///
    /// Any other token records an error, is left unconsumed, and yields a
    /// placeholder that fails if evaluated.
    pub fn parse_factor(&mut self) -> LexResult<Evaluator> {
        self.rule("factor", |p| {
            let token = p.peek()?;
            match token.kind {
                TokenKind::Number => p.parse_number(),
                TokenKind::Identifier => {
                    let name = p.parse_dotted_identifier()?;
                    if p.peek_kind()? == TokenKind::ParenOpen {
                        p.parse_function_call(name)
                    } else {
                        Ok(Evaluator::Variable(name))
                    }
                }
                TokenKind::ParenOpen => p.parse_bracketed_expression(),
                _ => {
                    let message = format!(
                        "expected number, identifier or '(', found {}",
                        describe_token(&token)
                    );
                    let position = token.position;
                    p.error_at(ErrorCode::EXPECTED_FACTOR, message, token);
                    Ok(Evaluator::Invalid { position })
                }
            }
        })
    }

    /// A numeric literal, converted to its value now rather than per evaluation.
    pub fn parse_number(&mut self) -> LexResult<Evaluator> {
        let token = self.expect_and_consume(TokenKind::Number)?;
        if token.kind != TokenKind::Number {
            return Ok(Evaluator::Invalid {
                position: token.position,
            });
        }
        match token.text().parse::<f64>() {
            Ok(value) => Ok(Evaluator::Number(value)),
            Err(_) => {
                let message = format!("invalid number literal '{}'", token.text());
                let position = token.position;
                self.error_at(ErrorCode::UNEXPECTED_TOKEN, message, token);
                Ok(Evaluator::Invalid { position })
            }
        }
    }

    /// `DottedIdentifier = Identifier { "." Identifier }`
    pub fn parse_dotted_identifier(&mut self) -> LexResult<DottedIdentifier> {
        self.rule("dotted_identifier", |p| {
            let first = p.expect_and_consume(TokenKind::Identifier)?;
            let mut path = DottedIdentifier::single(first.text());
            while p.peek_kind()? == TokenKind::Period {
                p.advance()?; // eat `.`
                let segment = p.expect_and_consume(TokenKind::Identifier)?;
                path.push(segment.text());
            }
            Ok(path)
        })
    }

    /// `FunctionCall = "(" [ Expression { "," Expression } ] ")"`
    ///
    /// The function itself is resolved by name on every evaluation.
    pub fn parse_function_call(&mut self, name: DottedIdentifier) -> LexResult<Evaluator> {
        self.rule("function_call", |p| {
            p.expect_and_consume(TokenKind::ParenOpen)?;
            let mut args = Vec::new();
            if p.peek_kind()? != TokenKind::ParenClose {
                args.push(p.parse_nested_expression()?);
                while p.peek_kind()? == TokenKind::Comma {
                    p.advance()?; // eat `,`
                    args.push(p.parse_nested_expression()?);
                }
            }
            p.expect_and_consume(TokenKind::ParenClose)?;
            Ok(Evaluator::Call { name, args })
        })
    }

    /// `"(" Expression ")"`
    pub fn parse_bracketed_expression(&mut self) -> LexResult<Evaluator> {
        self.rule("bracketed_expression", |p| {
            p.expect_and_consume(TokenKind::ParenOpen)?;
            let inner = p.parse_nested_expression()?;
            p.expect_and_consume(TokenKind::ParenClose)?;
            Ok(inner)
        })
    }

    /// An expression one nesting level deeper, bounded by `max_depth`.
    fn parse_nested_expression(&mut self) -> LexResult<Evaluator> {
        let max_depth = self.config().max_depth;
        if self.depth >= max_depth {
            let token = self.peek()?;
            let position = token.position;
            self.error_at(
                ErrorCode::NESTING_LIMIT_EXCEEDED,
                format!("maximum expression nesting depth is {max_depth}"),
                token,
            );
            return Ok(Evaluator::Invalid { position });
        }
        self.depth += 1;
        let result = self.parse_expression();
        self.depth -= 1;
        result
    }
}

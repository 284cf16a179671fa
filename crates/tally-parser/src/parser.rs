//! Core parser infrastructure: token cursor, error reporting, helpers.

use tracing::debug;

use tally_eval::{EvaluationContext, Evaluator};
use tally_lexer::{LexResult, Lexer, StrCharStream, Token, TokenKind, TokenSource};
use tally_types::{ErrorCode, EvalResult, Resolver, Value};

use crate::config::ParserConfig;
use crate::error::{ErrorMessage, ParseErrors};

/// The tally parser.
///
/// Pulls tokens from a [`TokenSource`] and compiles them straight into an
/// [`Evaluator`]. Grammar errors are collected and parsing carries on;
/// lexical errors from the token source abort the parse.
pub struct Parser<S: TokenSource> {
    /// The token stream.
    tokens: S,
    /// Parser limits.
    config: ParserConfig,
    /// Collected errors.
    errors: ParseErrors,
    /// Grammar productions currently being parsed, for error traces.
    rules: Vec<&'static str>,
    /// Position of the most recently reported token.
    last_error_position: Option<usize>,
    /// Current parenthesis / argument nesting depth.
    pub(crate) depth: usize,
}

/// Result of parsing.
///
/// Callers should check `errors` before evaluating: after a grammar error the
/// evaluator may contain placeholders that fail when run.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub evaluator: Evaluator,
    pub errors: ParseErrors,
}

impl ParseResult {
    /// `true` if parsing recorded no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Evaluate against a resolver.
    pub fn evaluate(&self, resolver: &dyn Resolver) -> EvalResult<Value> {
        self.evaluator.evaluate(resolver)
    }

    /// Evaluate against the default function table and an empty environment.
    pub fn evaluate_default(&self) -> EvalResult<Value> {
        self.evaluator.evaluate_default()
    }

    /// Pair the compiled expression with a resolver for counted evaluation.
    pub fn into_context<R: Resolver>(self, resolver: R) -> EvaluationContext<R> {
        EvaluationContext::new(self.evaluator, resolver)
    }
}

impl Parser<Lexer<StrCharStream>> {
    /// Create a parser that lexes `source` on demand.
    pub fn from_source(source: &str) -> Self {
        Self::new(Lexer::from_source(source))
    }
}

impl<S: TokenSource> Parser<S> {
    /// Create a parser over an existing token source.
    pub fn new(tokens: S) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(tokens: S, config: ParserConfig) -> Self {
        Self {
            tokens,
            config,
            errors: ParseErrors::with_limit(config.max_errors),
            rules: Vec::new(),
            last_error_position: None,
            depth: 0,
        }
    }

    pub(crate) fn config(&self) -> &ParserConfig {
        &self.config
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the next token without consuming it.
    pub(crate) fn peek(&mut self) -> LexResult<Token> {
        self.tokens.peek_token()
    }

    /// Returns the kind of the next token.
    pub(crate) fn peek_kind(&mut self) -> LexResult<TokenKind> {
        Ok(self.tokens.peek_token()?.kind)
    }

    /// Consume and return the next token.
    pub(crate) fn advance(&mut self) -> LexResult<Token> {
        self.tokens.next_token()
    }

    // ── Expect Helpers ────────────────────────────────────────────────────────

    /// Check the next token's kind without consuming it. Records an error on
    /// mismatch; the token is returned either way.
    pub(crate) fn expect(&mut self, expected: TokenKind) -> LexResult<Token> {
        let actual = self.peek()?;
        if actual.kind != expected {
            self.error_token(expected, &actual);
        }
        Ok(actual)
    }

    /// Like [`expect`](Self::expect), then consume the token regardless.
    pub(crate) fn expect_and_consume(&mut self, expected: TokenKind) -> LexResult<Token> {
        self.expect(expected)?;
        self.advance()
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    /// Report a token of the wrong kind.
    pub(crate) fn error_token(&mut self, expected: TokenKind, actual: &Token) {
        let code = if expected == TokenKind::ParenClose {
            ErrorCode::UNCLOSED_PAREN
        } else {
            ErrorCode::UNEXPECTED_TOKEN
        };
        let message = format!(
            "expected {}, found {}",
            describe_kind(expected),
            describe_token(actual)
        );
        self.error_at(code, message, actual.clone());
    }

    /// Report an error at a specific token.
    pub(crate) fn error_at(&mut self, code: ErrorCode, message: impl Into<String>, token: Token) {
        self.last_error_position = Some(token.position);
        let mut error = ErrorMessage::new(code, message, token);
        if !self.rules.is_empty() {
            error = error.with_trace(self.rules.join(" > "));
        }
        self.errors.push(error);
    }

    /// Run a grammar production with `name` on the trace stack.
    pub(crate) fn rule<T>(
        &mut self,
        name: &'static str,
        f: impl FnOnce(&mut Self) -> LexResult<T>,
    ) -> LexResult<T> {
        self.rules.push(name);
        let result = f(self);
        self.rules.pop();
        result
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse one expression followed by the end of input.
    ///
    /// A leftover token that already has an error against it is not
    /// reported again.
    pub fn parse(mut self) -> LexResult<ParseResult> {
        let evaluator = self.parse_expression()?;
        let trailing = self.peek()?;
        if !trailing.is_terminator() && self.last_error_position != Some(trailing.position) {
            let message = format!("expected end of input, found {}", describe_token(&trailing));
            self.error_at(ErrorCode::TRAILING_TOKEN, message, trailing);
        }
        debug!(
            errors = self.errors.total_errors,
            complete = evaluator.is_complete(),
            "parsed expression"
        );
        Ok(ParseResult {
            evaluator,
            errors: self.errors,
        })
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> &ParseErrors {
        &self.errors
    }
}

fn describe_kind(kind: TokenKind) -> String {
    match kind {
        TokenKind::Identifier | TokenKind::Number => kind.to_string(),
        TokenKind::Terminator => "end of input".to_string(),
        symbol => format!("'{symbol}'"),
    }
}

pub(crate) fn describe_token(token: &Token) -> String {
    match token.kind {
        TokenKind::Identifier | TokenKind::Number => {
            format!("{} '{}'", token.kind, token.text())
        }
        kind => describe_kind(kind),
    }
}

/// Parse a source string into a compiled expression.
pub fn parse(source: &str) -> LexResult<ParseResult> {
    Parser::from_source(source).parse()
}

/// Parse a source string with explicit limits.
pub fn parse_with_config(source: &str, config: ParserConfig) -> LexResult<ParseResult> {
    Parser::with_config(Lexer::from_source(source), config).parse()
}

/// Parse from any token source.
pub fn parse_tokens<S: TokenSource>(tokens: S) -> LexResult<ParseResult> {
    Parser::new(tokens).parse()
}

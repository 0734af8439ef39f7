//! Recursive-descent parser for the arithmetic grammar
//!
//! One method per production, one token of lookahead. Operator chains group
//! to the right, `1-2-3` becomes `Sub(1, Sub(2, 3))`. Only parentheses add
//! parse depth.

use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::grammar::{BinaryOp, Expr};
use crate::log_debug;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{SpannedToken, TokenKind, TokenStream, TokenStreamError};
use crate::utils::Span;

const EXPECTED_LITERAL: &str = "NUMBER or LPAREN";

pub struct Parser {
    tokens: TokenStream,
    depth: usize,
    max_depth: usize,
    trace: bool,
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        log_debug!("Creating parser", "tokens" => tokens.len());

        Self {
            tokens,
            depth: 0,
            max_depth: MAX_PARSE_DEPTH,
            trace: false,
        }
    }

    /// Log every production entered at debug level
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Lower the nesting limit below the compile-time maximum
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_PARSE_DEPTH);
        self
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn into_tokens(self) -> TokenStream {
        self.tokens
    }

    /// Parse one complete expression. The whole stream must be consumed:
    /// anything other than END-OF-INPUT after the expression is an error.
    pub fn parse(&mut self) -> SyntaxResult<Expr> {
        if !self.tokens.has_eof() {
            return Err(SyntaxError::EmptyTokenStream);
        }

        let expr = self.parse_t()?;

        let current = self.current()?;
        if current.value.is_end_of_input() {
            Ok(expr)
        } else {
            Err(SyntaxError::trailing_input(&current.value, current.span))
        }
    }

    /// `T -> F AddOp T | F`
    ///
    /// The chain is read in a loop and folded from the right, so a long
    /// flat sum costs no parse depth.
    fn parse_t(&mut self) -> SyntaxResult<Expr> {
        self.trace("T");
        let first = self.parse_f()?;
        let mut rest = Vec::new();
        while let Some(op) = self.operator(TokenKind::is_add_op) {
            rest.push((op, self.parse_f()?));
        }
        Ok(fold_right(first, rest))
    }

    /// `F -> Lit MulOp F | Lit`
    fn parse_f(&mut self) -> SyntaxResult<Expr> {
        self.trace("F");
        let first = self.parse_lit()?;
        let mut rest = Vec::new();
        while let Some(op) = self.operator(TokenKind::is_mul_op) {
            rest.push((op, self.parse_lit()?));
        }
        Ok(fold_right(first, rest))
    }

    /// `Lit -> NUMBER | ( T )`
    fn parse_lit(&mut self) -> SyntaxResult<Expr> {
        self.trace("Lit");
        let current = self.current()?;
        match current.value.kind {
            TokenKind::Number => {
                self.tokens.advance();
                current
                    .value
                    .lexeme
                    .parse::<f64>()
                    .map(Expr::literal)
                    .map_err(|_| SyntaxError::invalid_number(&current.value.lexeme, current.span))
            }
            TokenKind::LParen => self.nested(|parser| {
                parser.tokens.advance();
                let inner = parser.parse_t()?;
                parser.expect_closing()?;
                Ok(inner)
            }),
            _ => Err(SyntaxError::unexpected(
                EXPECTED_LITERAL,
                &current.value,
                current.span,
            )),
        }
    }

    fn expect_closing(&mut self) -> SyntaxResult<()> {
        self.tokens
            .expect(TokenKind::RParen)
            .map(|_| ())
            .map_err(|error| match error {
                TokenStreamError::UnexpectedToken {
                    expected,
                    found,
                    span,
                } => SyntaxError::unexpected(expected.as_str(), &found, span),
                TokenStreamError::UnexpectedEndOfStream { expected } => {
                    SyntaxError::UnexpectedEndOfInput {
                        expected: expected.as_str().to_string(),
                        span: self.last_span(),
                    }
                }
            })
    }

    /// Consume the current token if `is_op` accepts its kind
    fn operator(&mut self, is_op: fn(&TokenKind) -> bool) -> Option<BinaryOp> {
        let kind = self.tokens.current_kind().filter(is_op)?;
        self.tokens.advance();
        BinaryOp::from_token_kind(kind)
    }

    fn current(&self) -> SyntaxResult<SpannedToken> {
        self.tokens.current().cloned().ok_or_else(|| {
            SyntaxError::UnexpectedEndOfInput {
                expected: EXPECTED_LITERAL.to_string(),
                span: self.last_span(),
            }
        })
    }

    fn last_span(&self) -> Span {
        self.tokens
            .iter_significant()
            .last()
            .map(|token| token.span)
            .unwrap_or_else(Span::dummy)
    }

    /// One level of parenthesised nesting
    fn nested<T>(&mut self, body: impl FnOnce(&mut Self) -> SyntaxResult<T>) -> SyntaxResult<T> {
        if self.depth >= self.max_depth {
            let span = self
                .tokens
                .current_span()
                .unwrap_or_else(|| self.last_span());
            return Err(SyntaxError::max_recursion_depth(self.max_depth, span));
        }

        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    fn trace(&self, production: &'static str) {
        if self.trace {
            log_debug!("Entering production",
                "production" => production,
                "depth" => self.depth,
                "token" => self
                    .tokens
                    .current()
                    .map(|t| t.value.to_string())
                    .unwrap_or_default()
            );
        }
    }
}

/// `a op1 b op2 c` becomes `op1(a, op2(b, c))`
fn fold_right(first: Expr, rest: Vec<(BinaryOp, Expr)>) -> Expr {
    let mut pending = rest.into_iter().rev();
    let Some((mut op, mut acc)) = pending.next() else {
        return first;
    };

    for (left_op, operand) in pending {
        acc = Expr::binary(op, operand, acc);
        op = left_op;
    }
    Expr::binary(op, first, acc)
}

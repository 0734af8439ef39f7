//! Syntax errors with error code mapping and span-accurate reporting

use crate::logging::{codes, Code};
use crate::tokens::{Token, TokenKind};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Parse failures. Every variant is fatal to the current parse.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unexpected token: expected {expected}, found {kind} '{found}' at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        kind: TokenKind,
        span: Span,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEndOfInput { expected: String, span: Span },

    #[error("Unexpected {kind} '{found}' after complete expression at {span}")]
    TrailingInput {
        found: String,
        kind: TokenKind,
        span: Span,
    },

    #[error("Invalid number literal '{lexeme}' at {span}")]
    InvalidNumber { lexeme: String, span: Span },

    #[error("Empty token stream - no tokens to parse")]
    EmptyTokenStream,

    #[error("Maximum recursion depth {depth} exceeded at {span}")]
    MaxRecursionDepth { depth: usize, span: Span },
}

impl SyntaxError {
    /// Error for a token that cannot continue the current production.
    /// END-OF-INPUT is reported as [`SyntaxError::UnexpectedEndOfInput`].
    pub fn unexpected(expected: &str, token: &Token, span: Span) -> Self {
        if token.is_end_of_input() {
            Self::UnexpectedEndOfInput {
                expected: expected.to_string(),
                span,
            }
        } else {
            Self::UnexpectedToken {
                expected: expected.to_string(),
                found: token.lexeme.clone(),
                kind: token.kind,
                span,
            }
        }
    }

    pub fn trailing_input(token: &Token, span: Span) -> Self {
        Self::TrailingInput {
            found: token.lexeme.clone(),
            kind: token.kind,
            span,
        }
    }

    pub fn invalid_number(lexeme: &str, span: Span) -> Self {
        Self::InvalidNumber {
            lexeme: lexeme.to_string(),
            span,
        }
    }

    pub fn max_recursion_depth(depth: usize, span: Span) -> Self {
        Self::MaxRecursionDepth { depth, span }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfInput { .. } => codes::syntax::UNEXPECTED_END_OF_INPUT,
            Self::TrailingInput { .. } => codes::syntax::TRAILING_INPUT,
            Self::InvalidNumber { .. } => codes::syntax::INVALID_NUMBER_LITERAL,
            Self::EmptyTokenStream => codes::syntax::EMPTY_TOKEN_STREAM,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::UnexpectedEndOfInput { span, .. }
            | Self::TrailingInput { span, .. }
            | Self::InvalidNumber { span, .. }
            | Self::MaxRecursionDepth { span, .. } => Some(*span),
            Self::EmptyTokenStream => None,
        }
    }

    /// Kind of the offending token, when there is one
    pub fn found_kind(&self) -> Option<TokenKind> {
        match self {
            Self::UnexpectedToken { kind, .. } | Self::TrailingInput { kind, .. } => Some(*kind),
            Self::UnexpectedEndOfInput { .. } => Some(TokenKind::EndOfInput),
            Self::InvalidNumber { .. } => Some(TokenKind::Number),
            _ => None,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;
    use assert_matches::assert_matches;

    fn span_at(offset: usize) -> Span {
        Span::single(Position::new(offset, 1, offset as u32 + 1), 'x')
    }

    #[test]
    fn test_unexpected_end_of_input_from_eof_token() {
        let error = SyntaxError::unexpected("RPAREN", &Token::end_of_input(), span_at(4));
        assert_matches!(error, SyntaxError::UnexpectedEndOfInput { ref expected, .. } if expected == "RPAREN");
        assert_eq!(error.found_kind(), Some(TokenKind::EndOfInput));
        assert_eq!(error.error_code(), codes::syntax::UNEXPECTED_END_OF_INPUT);
    }

    #[test]
    fn test_unexpected_token_reports_kind() {
        let token = Token::new(TokenKind::Plus, "+");
        let error = SyntaxError::unexpected("NUMBER or LPAREN", &token, span_at(0));

        assert_matches!(
            error,
            SyntaxError::UnexpectedToken {
                kind: TokenKind::Plus,
                ..
            }
        );
        assert!(error.to_string().contains("PLUS '+'"));
        assert_eq!(error.span(), Some(span_at(0)));
    }

    #[test]
    fn test_codes_are_registered() {
        let errors = [
            SyntaxError::EmptyTokenStream,
            SyntaxError::invalid_number("1.2.3", span_at(0)),
            SyntaxError::max_recursion_depth(10, span_at(0)),
            SyntaxError::trailing_input(&Token::new(TokenKind::Number, "2"), span_at(2)),
        ];

        for error in &errors {
            assert!(codes::get_error_metadata(error.error_code().as_str()).is_some());
            assert_eq!(error.category(), "Syntax");
            assert!(error.requires_halt());
        }
        assert_eq!(SyntaxError::EmptyTokenStream.span(), None);
    }
}

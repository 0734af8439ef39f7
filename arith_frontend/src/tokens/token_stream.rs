//! Whitespace-filtering token stream consumed by the parser
//!
//! The stream keeps every lexed token (whitespace included) with its
//! original span, but navigation only ever visits significant tokens.

use crate::tokens::token::{Token, TokenKind};
use crate::utils::{Position, SourceMap, Span, Spanned};

/// A token with span information
pub type SpannedToken = Spanned<Token>;

#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens (including whitespace) with original spans
    all_tokens: Vec<SpannedToken>,
    /// Indices into all_tokens for significant tokens
    significant_indices: Vec<usize>,
    /// Current position in significant_indices
    position: usize,
    source_map: Option<SourceMap>,
}

impl TokenStream {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let significant_indices: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.value.kind.is_significant())
            .map(|(i, _)| i)
            .collect();

        crate::log_debug!("Token stream filtered",
            "total_tokens" => tokens.len(),
            "significant_tokens" => significant_indices.len()
        );

        Self {
            all_tokens: tokens,
            significant_indices,
            position: 0,
            source_map: None,
        }
    }

    /// Create stream with source map for caret diagnostics
    pub fn with_source_map(tokens: Vec<SpannedToken>, source_map: SourceMap) -> Self {
        Self {
            source_map: Some(source_map),
            ..Self::new(tokens)
        }
    }

    // === NAVIGATION ===

    /// Current significant token
    pub fn current(&self) -> Option<&SpannedToken> {
        self.peek_ahead(0)
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|spanned| spanned.value.kind)
    }

    pub fn current_span(&self) -> Option<Span> {
        self.current().map(|spanned| spanned.span)
    }

    /// Significant token `n` positions ahead of the current one
    pub fn peek_ahead(&self, n: usize) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position + n)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Advance to the next significant token
    pub fn advance(&mut self) {
        if self.position < self.significant_indices.len() {
            self.position += 1;
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.significant_indices.len()
    }

    /// Number of significant tokens
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.significant_indices.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    // === PARSER INTEGRATION ===

    /// One-token lookahead: is the current token of `kind`?
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Consume the current token if it is of `kind`
    pub fn consume_if(&mut self, kind: TokenKind) -> Option<SpannedToken> {
        if self.check(kind) {
            let token = self.current().cloned();
            self.advance();
            token
        } else {
            None
        }
    }

    /// Consume a token of `kind` or report what was found instead
    pub fn expect(&mut self, kind: TokenKind) -> Result<SpannedToken, TokenStreamError> {
        match self.current() {
            Some(current) if current.value.kind == kind => {
                let token = current.clone();
                self.advance();
                Ok(token)
            }
            Some(current) => Err(TokenStreamError::UnexpectedToken {
                expected: kind,
                found: current.value.clone(),
                span: current.span,
            }),
            None => Err(TokenStreamError::UnexpectedEndOfStream { expected: kind }),
        }
    }

    /// Whether the last significant token is END-OF-INPUT
    pub fn has_eof(&self) -> bool {
        self.significant_indices
            .last()
            .and_then(|&idx| self.all_tokens.get(idx))
            .map(|token| token.value.is_end_of_input())
            .unwrap_or(false)
    }

    // === ITERATION ===

    pub fn iter_significant(&self) -> impl Iterator<Item = &SpannedToken> {
        self.significant_indices
            .iter()
            .filter_map(|&i| self.all_tokens.get(i))
    }

    /// All tokens, whitespace included
    pub fn all_tokens(&self) -> &[SpannedToken] {
        &self.all_tokens
    }

    /// Significant tokens without spans
    pub fn significant_tokens(&self) -> Vec<Token> {
        self.iter_significant()
            .map(|spanned| spanned.value.clone())
            .collect()
    }

    pub fn source_map(&self) -> Option<&SourceMap> {
        self.source_map.as_ref()
    }

    /// Render an error against the source when a source map is attached
    pub fn format_error(&self, span: Span, message: &str) -> String {
        match &self.source_map {
            Some(source_map) => source_map.format_error(&span, message),
            None => format!("error at {}: {}", span, message),
        }
    }

    pub fn diagnostic(&self) -> String {
        let current_info = match self.current() {
            Some(current) => format!("{} {} at {}", current.value.kind, current.value, current.span),
            None => "<exhausted>".to_string(),
        };

        format!(
            "TokenStream(pos: {}/{}, current: {})",
            self.position,
            self.significant_indices.len(),
            current_info
        )
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenStreamError {
    #[error("Expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: TokenKind,
        found: Token,
        span: Span,
    },

    #[error("Expected {expected}, but the token stream is exhausted")]
    UnexpectedEndOfStream { expected: TokenKind },
}

/// Builds token streams by hand, computing spans from the lexemes
#[derive(Debug)]
pub struct TokenStreamBuilder {
    tokens: Vec<SpannedToken>,
    current_position: Position,
}

impl TokenStreamBuilder {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            current_position: Position::start(),
        }
    }

    pub fn push(mut self, kind: TokenKind, lexeme: &str) -> Self {
        let start = self.current_position;
        let end = start.advance_str(lexeme);

        self.tokens
            .push(SpannedToken::new(Token::new(kind, lexeme), Span::new(start, end)));
        self.current_position = end;
        self
    }

    /// Build the stream, appending END-OF-INPUT if missing
    pub fn build(mut self) -> TokenStream {
        let terminated = self
            .tokens
            .last()
            .map(|token| token.value.is_end_of_input())
            .unwrap_or(false);
        if !terminated {
            self.tokens.push(SpannedToken::new(
                Token::end_of_input(),
                Span::empty_at(self.current_position),
            ));
        }
        TokenStream::new(self.tokens)
    }
}

impl Default for TokenStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

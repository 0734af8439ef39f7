//! Tokenize-then-parse front end
//!
//! [`CompilerFrontend`] owns the standard lexer configuration and exposes
//! the two phases separately as well as a combined [`CompilerFrontend::compile`].

pub mod automata;

pub use automata::{
    number_automaton, single_char_automaton, standard_lexer_config, whitespace_automaton,
};

use crate::config::runtime::{LexicalPreferences, ParserPreferences};
use crate::grammar::Expr;
use crate::lexical::{Lexer, LexerConfig, LexerError, LexicalMetrics};
use crate::log_success;
use crate::logging::{codes, Code};
use crate::syntax::{Parser, SyntaxError};
use crate::tokens::TokenStream;
use crate::utils::{SourceMap, Span};

/// Lexical or syntactic failure of a front-end call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrontendError {
    #[error("Lexical error: {0}")]
    Lexical(#[from] LexerError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

impl FrontendError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Lexical(e) => e.error_code(),
            Self::Syntax(e) => e.error_code(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexical(e) => e.span(),
            Self::Syntax(e) => e.span(),
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, Self::Lexical(_))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }

    /// Caret diagnostic against `source`, or the plain message when the
    /// error has no location
    pub fn render(&self, source: &str) -> String {
        match self.span() {
            Some(span) => SourceMap::new(source.to_string()).format_error(&span, &self.to_string()),
            None => format!("error: {}\n", self),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompilerFrontend {
    config: LexerConfig,
    debug: bool,
    lexical_preferences: LexicalPreferences,
    parser_preferences: ParserPreferences,
}

impl CompilerFrontend {
    /// Front end over the standard NUMBER/operator/paren/whitespace kinds
    pub fn new() -> Result<Self, FrontendError> {
        Ok(Self::with_config(standard_lexer_config()?))
    }

    pub fn with_config(config: LexerConfig) -> Self {
        Self {
            config,
            debug: false,
            lexical_preferences: LexicalPreferences::default(),
            parser_preferences: ParserPreferences::default(),
        }
    }

    /// Trace every token and production through `log_debug!`
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_preferences(
        mut self,
        lexical: LexicalPreferences,
        parser: ParserPreferences,
    ) -> Self {
        self.lexical_preferences = lexical;
        self.parser_preferences = parser;
        self
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn tokenize(&self, source: &str) -> Result<TokenStream, FrontendError> {
        self.tokenize_with_metrics(source).map(|(stream, _)| stream)
    }

    /// Tokenize and also return the lexer's counters for this run
    pub fn tokenize_with_metrics(
        &self,
        source: &str,
    ) -> Result<(TokenStream, LexicalMetrics), FrontendError> {
        let mut lexer = Lexer::with_preferences(&self.config, self.lexical_preferences.clone())
            .with_trace(self.debug || self.lexical_preferences.trace_tokens);
        let tokens = lexer.tokenize(source)?;
        let stream = TokenStream::with_source_map(tokens, SourceMap::new(source.to_string()));
        Ok((stream, lexer.metrics().clone()))
    }

    pub fn parse(&self, tokens: TokenStream) -> Result<Expr, FrontendError> {
        let mut parser =
            Parser::new(tokens).with_trace(self.debug || self.parser_preferences.trace_productions);
        let expr = parser.parse()?;

        log_success!(
            codes::success::AST_CONSTRUCTION_COMPLETE,
            "Syntax analysis completed successfully",
            "nodes" => expr.node_count(),
            "depth" => expr.depth()
        );
        Ok(expr)
    }

    /// Tokenize `source` and parse the result
    pub fn compile(&self, source: &str) -> Result<Expr, FrontendError> {
        let tokens = self.tokenize(source)?;
        self.parse(tokens)
    }
}

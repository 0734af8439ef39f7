//! Ordered token-kind registrations
//!
//! A [`LexerConfig`] is built once and then only read. Registration order
//! is significant: when two automata accept a match of the same length,
//! the kind registered first wins.

use crate::automaton::Automaton;
use crate::lexical::analyzer::LexerError;
use crate::tokens::TokenKind;

/// Immutable set of `(kind, automaton)` pairs in registration order
#[derive(Debug, Clone, Default)]
pub struct LexerConfig {
    entries: Vec<(TokenKind, Automaton)>,
}

impl LexerConfig {
    pub fn builder() -> LexerConfigBuilder {
        LexerConfigBuilder::default()
    }

    pub fn entries(&self) -> &[(TokenKind, Automaton)] {
        &self.entries
    }

    /// Registered kinds, in tie-break priority order
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.entries.iter().map(|(kind, _)| *kind).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn priority_of(&self, kind: TokenKind) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == kind)
    }
}

#[derive(Debug, Default)]
pub struct LexerConfigBuilder {
    entries: Vec<(TokenKind, Automaton)>,
}

impl LexerConfigBuilder {
    /// Register an automaton for `kind`. END-OF-INPUT is synthesized by
    /// the lexer and cannot be registered; each kind may appear once.
    pub fn register(mut self, kind: TokenKind, automaton: Automaton) -> Result<Self, LexerError> {
        if kind == TokenKind::EndOfInput {
            return Err(LexerError::InvalidRegistration {
                kind,
                reason: "END-OF-INPUT is emitted by the lexer".to_string(),
            });
        }
        if self.entries.iter().any(|(k, _)| *k == kind) {
            return Err(LexerError::InvalidRegistration {
                kind,
                reason: "kind is already registered".to_string(),
            });
        }
        if !automaton.has_start_state() {
            return Err(LexerError::InvalidRegistration {
                kind,
                reason: "automaton has no start state".to_string(),
            });
        }

        self.entries.push((kind, automaton));
        Ok(self)
    }

    pub fn build(self) -> LexerConfig {
        LexerConfig {
            entries: self.entries,
        }
    }
}

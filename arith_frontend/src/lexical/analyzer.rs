//! Automaton-driven longest-match lexer
//!
//! All registered automata are run in lock-step from the current position.
//! The longest accepted prefix becomes the next token; among automata that
//! accept the same length, the one registered first wins. A zero-length
//! acceptance never produces a token.

use crate::automaton::Automaton;
use crate::config::compile_time::lexical::{MAX_INPUT_LENGTH, MAX_TOKEN_COUNT};
use crate::config::runtime::LexicalPreferences;
use crate::lexical::registry::LexerConfig;
use crate::logging::codes::{self, Code};
use crate::tokens::{SpannedToken, Token, TokenKind};
use crate::utils::{Position, Span, Spanned};
use crate::{log_debug, log_success};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error(
        "Unrecognized character '{character}' at line {}, column {}",
        .position.line,
        .position.column
    )]
    UnrecognizedCharacter { character: char, position: Position },

    #[error("Input length {length} exceeds maximum {limit}")]
    InputTooLarge { length: usize, limit: usize },

    #[error("Token count {count} exceeds maximum {limit}")]
    TooManyTokens {
        count: usize,
        limit: usize,
        position: Position,
    },

    #[error("Cannot register {kind}: {reason}")]
    InvalidRegistration { kind: TokenKind, reason: String },
}

impl LexerError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnrecognizedCharacter { .. } => codes::lexical::UNRECOGNIZED_CHARACTER,
            Self::InputTooLarge { .. } => codes::lexical::INPUT_TOO_LARGE,
            Self::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            Self::InvalidRegistration { .. } => codes::system::CONFIGURATION_ERROR,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnrecognizedCharacter {
                character,
                position,
            } => Some(Span::single(*position, *character)),
            Self::TooManyTokens { position, .. } => Some(Span::empty_at(*position)),
            _ => None,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// Counters gathered during one tokenization run
#[derive(Debug, Clone, Default, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub significant_tokens: usize,
    pub whitespace_tokens: usize,
    pub chars_consumed: usize,
    pub longest_lexeme: usize,
    /// Only populated when detailed metrics are enabled
    pub tokens_by_kind: BTreeMap<TokenKind, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;
        if token.kind.is_significant() {
            self.significant_tokens += 1;
        } else if token.kind == TokenKind::Whitespace {
            self.whitespace_tokens += 1;
        }

        let length = token.lexeme.chars().count();
        self.chars_consumed += length;
        self.longest_lexeme = self.longest_lexeme.max(length);

        if preferences.collect_detailed_metrics {
            *self.tokens_by_kind.entry(token.kind).or_insert(0) += 1;
        }
    }

    pub fn count_of(&self, kind: TokenKind) -> usize {
        self.tokens_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Lexer over a [`LexerConfig`]
///
/// The configuration's automata are cloned into the lexer, which owns their
/// working state exclusively. The configuration itself is never mutated.
#[derive(Debug, Clone)]
pub struct Lexer {
    automata: Vec<(TokenKind, Automaton)>,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
    trace: bool,
}

impl Lexer {
    pub fn new(config: &LexerConfig) -> Self {
        Self::with_preferences(config, LexicalPreferences::default())
    }

    pub fn with_preferences(config: &LexerConfig, preferences: LexicalPreferences) -> Self {
        let trace = preferences.trace_tokens;
        Self {
            automata: config.entries().to_vec(),
            metrics: LexicalMetrics::default(),
            preferences,
            trace,
        }
    }

    /// Log every emitted token at debug level
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Split `source` into tokens, whitespace included, terminated by a
    /// single END-OF-INPUT token.
    pub fn tokenize(&mut self, source: &str) -> Result<Vec<SpannedToken>, LexerError> {
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting lexical analysis",
            "input_length" => source.len(),
            "registered_kinds" => self.automata.len()
        );

        if source.len() > MAX_INPUT_LENGTH {
            return Err(LexerError::InputTooLarge {
                length: source.len(),
                limit: MAX_INPUT_LENGTH,
            });
        }

        let chars: Vec<char> = source.chars().collect();
        let mut tokens = Vec::new();
        let mut index = 0;
        let mut position = Position::start();

        while index < chars.len() {
            if tokens.len() >= MAX_TOKEN_COUNT {
                return Err(LexerError::TooManyTokens {
                    count: tokens.len(),
                    limit: MAX_TOKEN_COUNT,
                    position,
                });
            }

            let (kind, length) = match self.longest_match(&chars[index..]) {
                Some(found) => found,
                None => {
                    return Err(LexerError::UnrecognizedCharacter {
                        character: chars[index],
                        position,
                    })
                }
            };

            let lexeme: String = chars[index..index + length].iter().collect();
            let end = position.advance_str(&lexeme);
            let token = Token::new(kind, lexeme);

            if self.trace {
                log_debug!("Token",
                    "kind" => kind,
                    "lexeme" => token.lexeme.escape_debug(),
                    "at" => position
                );
            }

            self.metrics.record_token(&token, &self.preferences);
            tokens.push(Spanned::new(token, Span::new(position, end)));

            index += length;
            position = end;
        }

        tokens.push(Spanned::new(Token::end_of_input(), Span::empty_at(position)));
        self.metrics.total_tokens += 1;

        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed successfully",
            "tokens" => self.metrics.total_tokens,
            "significant" => self.metrics.significant_tokens,
            "whitespace" => self.metrics.whitespace_tokens
        );

        Ok(tokens)
    }

    /// Longest accepted prefix of `rest` as `(kind, length in chars)`.
    /// `None` when no automaton accepts a non-empty prefix.
    fn longest_match(&mut self, rest: &[char]) -> Option<(TokenKind, usize)> {
        for (_, automaton) in self.automata.iter_mut() {
            automaton.reset();
        }

        let mut candidates: Vec<usize> = (0..self.automata.len())
            .filter(|&i| !self.automata[i].1.is_dead())
            .collect();
        let mut best: Option<(TokenKind, usize)> = None;

        for (consumed, &ch) in rest.iter().enumerate() {
            candidates.retain(|&i| self.automata[i].1.has_transitions(ch));
            if candidates.is_empty() {
                break;
            }

            for &i in &candidates {
                self.automata[i].1.apply(ch);
            }
            candidates.retain(|&i| !self.automata[i].1.is_dead());

            // Candidates stay in registration order, so the first
            // accepting one is the tie-break winner at this length.
            if let Some(&winner) = candidates.iter().find(|&&i| self.automata[i].1.accepts()) {
                best = Some((self.automata[winner].0, consumed + 1));
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn single(ch: char) -> Automaton {
        let mut automaton = Automaton::new();
        automaton
            .add_state(0, true, false)
            .add_state(1, false, true)
            .add_transition(0, ch, 1);
        automaton
    }

    fn digits() -> Automaton {
        let mut automaton = Automaton::new();
        automaton
            .add_state(0, true, false)
            .add_state(1, false, true)
            .add_transitions(0, '0'..='9', 1)
            .add_transitions(1, '0'..='9', 1);
        automaton
    }

    fn kinds(tokens: &[SpannedToken]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.value.kind).collect()
    }

    #[test]
    fn test_longest_match_wins() {
        let config = LexerConfig::builder()
            .register(TokenKind::Number, digits())
            .and_then(|b| b.register(TokenKind::Plus, single('+')))
            .unwrap()
            .build();
        let mut lexer = Lexer::new(&config);

        let tokens = lexer.tokenize("123+4").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::EndOfInput
            ]
        );
        assert_eq!(tokens[0].value.lexeme, "123");
        assert_eq!(tokens[0].span.len(), 3);
        assert_eq!(tokens[2].span.start.offset, 4);
    }

    #[test]
    fn test_first_registered_wins_ties() {
        let config = LexerConfig::builder()
            .register(TokenKind::Minus, single('x'))
            .and_then(|b| b.register(TokenKind::Plus, single('x')))
            .unwrap()
            .build();
        let tokens = Lexer::new(&config).tokenize("x").unwrap();
        assert_eq!(tokens[0].value.kind, TokenKind::Minus);

        let reversed = LexerConfig::builder()
            .register(TokenKind::Plus, single('x'))
            .and_then(|b| b.register(TokenKind::Minus, single('x')))
            .unwrap()
            .build();
        let tokens = Lexer::new(&reversed).tokenize("x").unwrap();
        assert_eq!(tokens[0].value.kind, TokenKind::Plus);
    }

    #[test]
    fn test_longer_match_beats_earlier_registration() {
        let config = LexerConfig::builder()
            .register(TokenKind::Plus, single('1'))
            .and_then(|b| b.register(TokenKind::Number, digits()))
            .unwrap()
            .build();

        let tokens = Lexer::new(&config).tokenize("12").unwrap();
        assert_eq!(tokens[0].value.kind, TokenKind::Number);
        assert_eq!(tokens[0].value.lexeme, "12");

        let tokens = Lexer::new(&config).tokenize("1").unwrap();
        assert_eq!(tokens[0].value.kind, TokenKind::Plus);
    }

    #[test]
    fn test_zero_length_accept_never_wins() {
        let mut accepts_empty = Automaton::new();
        accepts_empty
            .add_state(0, true, true)
            .add_transition(0, ' ', 0);

        let config = LexerConfig::builder()
            .register(TokenKind::Whitespace, accepts_empty)
            .unwrap()
            .build();

        let result = Lexer::new(&config).tokenize("a");
        assert_matches!(
            result,
            Err(LexerError::UnrecognizedCharacter { character: 'a', position }) if position.offset == 0
        );
    }

    #[test]
    fn test_unrecognized_character_reports_position() {
        let config = LexerConfig::builder()
            .register(TokenKind::Number, digits())
            .unwrap()
            .build();

        let error = Lexer::new(&config).tokenize("3@4").unwrap_err();
        assert_matches!(
            error,
            LexerError::UnrecognizedCharacter { character: '@', position }
                if position.offset == 1 && position.column == 2
        );
        assert_eq!(error.error_code(), codes::lexical::UNRECOGNIZED_CHARACTER);
        assert!(error.requires_halt());
        assert_eq!(error.span().map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_empty_input_yields_only_end_of_input() {
        let config = LexerConfig::builder()
            .register(TokenKind::Number, digits())
            .unwrap()
            .build();

        let tokens = Lexer::new(&config).tokenize("").unwrap();
        assert_eq!(kinds(&tokens), vec![TokenKind::EndOfInput]);
        assert!(tokens[0].span.is_empty());
    }

    #[test]
    fn test_lexemes_concatenate_to_input() {
        let config = LexerConfig::builder()
            .register(TokenKind::Number, digits())
            .and_then(|b| b.register(TokenKind::Plus, single('+')))
            .and_then(|b| b.register(TokenKind::Whitespace, single(' ')))
            .unwrap()
            .build();

        let source = "1 + 22+ 333";
        let tokens = Lexer::new(&config).tokenize(source).unwrap();
        let rebuilt: String = tokens.iter().map(|t| t.value.lexeme.as_str()).collect();
        assert_eq!(rebuilt, source);
        assert_eq!(tokens.last().map(|t| t.value.kind), Some(TokenKind::EndOfInput));
    }

    #[test]
    fn test_metrics_recorded() {
        let config = LexerConfig::builder()
            .register(TokenKind::Number, digits())
            .and_then(|b| b.register(TokenKind::Whitespace, single(' ')))
            .unwrap()
            .build();
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            trace_tokens: false,
        };

        let mut lexer = Lexer::with_preferences(&config, preferences);
        lexer.tokenize("12 345").unwrap();

        let metrics = lexer.metrics();
        assert_eq!(metrics.total_tokens, 4);
        assert_eq!(metrics.significant_tokens, 2);
        assert_eq!(metrics.whitespace_tokens, 1);
        assert_eq!(metrics.chars_consumed, 6);
        assert_eq!(metrics.longest_lexeme, 3);
        assert_eq!(metrics.count_of(TokenKind::Number), 2);
        assert_eq!(metrics.count_of(TokenKind::Plus), 0);
    }

    #[test]
    fn test_lexer_reusable_after_error() {
        let config = LexerConfig::builder()
            .register(TokenKind::Number, digits())
            .unwrap()
            .build();
        let mut lexer = Lexer::new(&config);

        assert!(lexer.tokenize("1?").is_err());
        let tokens = lexer.tokenize("42").unwrap();
        assert_eq!(tokens[0].value.lexeme, "42");
    }
}

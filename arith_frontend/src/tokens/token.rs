//! Token kinds and tokens for the arithmetic language

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Number,
    Plus,
    Minus,
    Times,
    Div,
    #[serde(rename = "LPAREN")]
    LParen,
    #[serde(rename = "RPAREN")]
    RParen,
    Whitespace,
    #[serde(rename = "END-OF-INPUT")]
    EndOfInput,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Div => "DIV",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::EndOfInput => "END-OF-INPUT",
        }
    }

    /// Whether the parser ever sees this kind
    pub fn is_significant(&self) -> bool {
        !matches!(self, TokenKind::Whitespace)
    }

    /// `AddOp -> PLUS | MINUS`
    pub fn is_add_op(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }

    /// `MulOp -> TIMES | DIV`
    pub fn is_mul_op(&self) -> bool {
        matches!(self, TokenKind::Times | TokenKind::Div)
    }

    /// Kinds that can begin a `Lit`
    pub fn starts_literal(&self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::LParen)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexed token: its kind and the exact text consumed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub fn end_of_input() -> Self {
        Self::new(TokenKind::EndOfInput, "")
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => f.write_str("end of input"),
            TokenKind::Whitespace => f.write_str("whitespace"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

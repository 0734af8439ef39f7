//! Automata for the standard arithmetic token kinds

use crate::automaton::Automaton;
use crate::lexical::{LexerConfig, LexerError};
use crate::tokens::TokenKind;

const WHITESPACE: [char; 4] = [' ', '\n', '\r', '\t'];

/// Decimal literal: `digits`, `digits.digits` or `.digits`
///
/// State 0 starts, state 1 follows the integer part, state 2 follows the
/// point and state 3 follows fraction digits. States 1 and 3 accept.
pub fn number_automaton() -> Automaton {
    let mut automaton = Automaton::new();
    automaton
        .add_state(0, true, false)
        .add_state(1, false, true)
        .add_state(2, false, false)
        .add_state(3, false, true)
        .add_transitions(0, '0'..='9', 1)
        .add_transitions(1, '0'..='9', 1)
        .add_transition(0, '.', 2)
        .add_transition(1, '.', 2)
        .add_transitions(2, '0'..='9', 3)
        .add_transitions(3, '0'..='9', 3);
    automaton
}

/// Exactly the one character `ch`
pub fn single_char_automaton(ch: char) -> Automaton {
    let mut automaton = Automaton::new();
    automaton
        .add_state(0, true, false)
        .add_state(1, false, true)
        .add_transition(0, ch, 1);
    automaton
}

/// One or more of space, newline, carriage return and tab.
/// The start state also accepts, which the lexer never lets win.
pub fn whitespace_automaton() -> Automaton {
    let mut automaton = Automaton::new();
    automaton
        .add_state(0, true, true)
        .add_state(1, false, true)
        .add_transitions(0, WHITESPACE, 1)
        .add_transitions(1, WHITESPACE, 1);
    automaton
}

/// NUMBER, PLUS, MINUS, TIMES, DIV, LPAREN, RPAREN, WHITESPACE in that
/// priority order
pub fn standard_lexer_config() -> Result<LexerConfig, LexerError> {
    Ok(LexerConfig::builder()
        .register(TokenKind::Number, number_automaton())?
        .register(TokenKind::Plus, single_char_automaton('+'))?
        .register(TokenKind::Minus, single_char_automaton('-'))?
        .register(TokenKind::Times, single_char_automaton('*'))?
        .register(TokenKind::Div, single_char_automaton('/'))?
        .register(TokenKind::LParen, single_char_automaton('('))?
        .register(TokenKind::RParen, single_char_automaton(')'))?
        .register(TokenKind::Whitespace, whitespace_automaton())?
        .build())
}

//! Tokens produced by the lexer and the filtered stream handed to the parser

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenKind};
pub use token_stream::{SpannedToken, TokenStream, TokenStreamBuilder, TokenStreamError};

pub use crate::utils::{Position, SourceMap, Span, Spanned};

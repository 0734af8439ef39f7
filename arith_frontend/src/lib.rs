// Internal modules
#[macro_use]
pub mod logging;
pub mod automaton;
pub mod config;
pub mod file_processor;
pub mod frontend;
pub mod grammar;
pub mod lexical;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use automaton::Automaton;
pub use frontend::{CompilerFrontend, FrontendError};
pub use grammar::Expr;
pub use lexical::{Lexer, LexerConfig, LexerError};
pub use pipeline::{PipelineError, PipelineResult};
pub use syntax::{Parser, SyntaxError};
pub use tokens::{Token, TokenKind, TokenStream};

pub use pipeline::output::PipelineOutput;

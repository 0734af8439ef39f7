//! Syntax analysis - TokenStream to expression tree
//!
//! The parser expects whitespace to be filtered already;
//! [`TokenStream`](crate::tokens::TokenStream) does that before any token reaches it.

mod error;
mod parser;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::Parser;

use crate::logging::codes;

/// Verify every syntax error code is registered
pub fn init_syntax_logging() -> Result<(), String> {
    let syntax_codes = [
        codes::syntax::TRAILING_INPUT,
        codes::syntax::EMPTY_TOKEN_STREAM,
        codes::syntax::UNEXPECTED_TOKEN,
        codes::syntax::UNEXPECTED_END_OF_INPUT,
        codes::syntax::INVALID_NUMBER_LITERAL,
        codes::syntax::MAX_RECURSION_DEPTH,
    ];

    for code in &syntax_codes {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!(
                "Syntax error code {} has no description",
                code.as_str()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_initialization() {
        assert!(init_syntax_logging().is_ok());
    }
}

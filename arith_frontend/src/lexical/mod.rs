//! Lexical analysis
//!
//! [`LexerConfig`] holds the ordered token-kind registrations and
//! [`Lexer`] runs them over source text.

pub mod analyzer;
pub mod registry;

pub use analyzer::{Lexer, LexerError, LexicalMetrics};
pub use registry::{LexerConfig, LexerConfigBuilder};

/// Verify every lexical error code is registered
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let lexical_codes = [
        crate::logging::codes::lexical::UNRECOGNIZED_CHARACTER,
        crate::logging::codes::lexical::INPUT_TOO_LARGE,
        crate::logging::codes::lexical::TOO_MANY_TOKENS,
    ];

    for code in &lexical_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}

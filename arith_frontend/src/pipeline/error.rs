use crate::file_processor::FileProcessorError;
use crate::frontend::FrontendError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::syntax::SyntaxError;
use crate::utils::Span;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl From<FrontendError> for PipelineError {
    fn from(error: FrontendError) -> Self {
        match error {
            FrontendError::Lexical(e) => Self::LexicalAnalysis(e),
            FrontendError::Syntax(e) => Self::SyntaxAnalysis(e),
        }
    }
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(e) => e.error_code(),
            Self::LexicalAnalysis(e) => e.error_code(),
            Self::SyntaxAnalysis(e) => e.error_code(),
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// Source location for lexical and syntax failures
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::LexicalAnalysis(e) => e.span(),
            Self::SyntaxAnalysis(e) => e.span(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Token;
    use assert_matches::assert_matches;

    #[test]
    fn test_frontend_error_conversion() {
        let syntax = SyntaxError::unexpected("RPAREN", &Token::end_of_input(), Span::dummy());
        let error = PipelineError::from(FrontendError::Syntax(syntax));

        assert_matches!(error, PipelineError::SyntaxAnalysis(_));
        assert_eq!(error.error_code(), codes::syntax::UNEXPECTED_END_OF_INPUT);
        assert!(error.span().is_some());
    }

    #[test]
    fn test_pipeline_error_code() {
        let error = PipelineError::pipeline_error("worker panicked");
        assert_eq!(error.error_code(), codes::system::INTERNAL_ERROR);
        assert_eq!(error.span(), None);
    }
}

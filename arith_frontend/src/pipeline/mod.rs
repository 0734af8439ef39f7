//! End-to-end processing: file -> lexical -> syntax -> evaluation

mod error;
pub mod output;
mod result;
mod validation;

pub use error::PipelineError;
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::{FileProcessingResult, FileProcessor};
use crate::frontend::{CompilerFrontend, FrontendError};
use crate::logging::{self, codes};
use std::path::Path;
use std::time::Instant;

/// Label used for sources that did not come from a file
pub const INLINE_SOURCE_LABEL: &str = "<expr>";

#[derive(Debug, Clone)]
pub struct Pipeline {
    frontend: CompilerFrontend,
    file_processor: FileProcessor,
}

impl Pipeline {
    /// Pipeline over the standard lexer with preferences from the environment
    pub fn new() -> Result<Self, PipelineError> {
        Self::from_config(&RuntimeConfig::default())
    }

    pub fn from_config(config: &RuntimeConfig) -> Result<Self, PipelineError> {
        let frontend = CompilerFrontend::new()?
            .with_preferences(config.lexical.clone(), config.parser.clone());

        Ok(Self {
            frontend,
            file_processor: FileProcessor::from_preferences(&config.file_processor),
        })
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.frontend = self.frontend.with_debug(debug);
        self
    }

    pub fn frontend(&self) -> &CompilerFrontend {
        &self.frontend
    }

    /// Read and validate a source file without compiling it
    pub fn read_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<FileProcessingResult, PipelineError> {
        Ok(self.file_processor.process_file(file_path)?)
    }

    pub fn process_file<P: AsRef<Path>>(&self, file_path: P) -> Result<PipelineResult, PipelineError> {
        let file_path = file_path.as_ref();

        logging::with_file_context(file_path.to_path_buf(), 0, || {
            let file_result = self.read_file(file_path)?;
            self.process_file_result(file_result)
        })
    }

    /// Compile and evaluate an already-read file
    pub fn process_file_result(
        &self,
        file_result: FileProcessingResult,
    ) -> Result<PipelineResult, PipelineError> {
        let label = file_result.metadata.path.display().to_string();
        let start_time = Instant::now()
            .checked_sub(file_result.processing_duration)
            .unwrap_or_else(Instant::now);

        let mut result = self.run(&file_result.source, &label, start_time)?;
        result.file_metadata = Some(file_result.metadata);
        Ok(result)
    }

    pub fn process_source(&self, source: &str, label: &str) -> Result<PipelineResult, PipelineError> {
        self.run(source, label, Instant::now())
    }

    fn run(
        &self,
        source: &str,
        label: &str,
        start_time: Instant,
    ) -> Result<PipelineResult, PipelineError> {
        crate::log_info!("Starting expression pipeline",
            "source" => label,
            "length" => source.len()
        );

        let (tokens, lexical_metrics, expression) = self
            .frontend
            .tokenize_with_metrics(source)
            .and_then(|(tokens, metrics)| {
                let expression = self.frontend.parse(tokens.clone())?;
                Ok((tokens, metrics, expression))
            })
            .map_err(|error| {
                log_frontend_error(&error, label);
                PipelineError::from(error)
            })?;

        let value = expression.evaluate();
        crate::log_success!(codes::success::EVALUATION_COMPLETE, "Expression evaluated",
            "value" => value
        );

        let result = PipelineResult {
            label: label.to_string(),
            expression,
            value,
            tokens,
            lexical_metrics,
            file_metadata: None,
            processing_duration: start_time.elapsed(),
        };

        result.log_success();
        Ok(result)
    }
}

fn log_frontend_error(error: &FrontendError, label: &str) {
    let message = if error.is_lexical() {
        "Lexical analysis failed"
    } else {
        "Syntax analysis failed"
    };

    match error.span() {
        Some(span) => crate::log_error!(error.error_code(), message,
            span = span,
            "source" => label,
            "error" => error
        ),
        None => crate::log_error!(error.error_code(), message,
            "source" => label,
            "error" => error
        ),
    }
}

/// Run `source` through the default pipeline
pub fn process_source(source: &str, label: &str) -> Result<PipelineResult, PipelineError> {
    Pipeline::new()?.process_source(source, label)
}

/// Read `file_path` and run it through the default pipeline
pub fn process_file<P: AsRef<Path>>(file_path: P) -> Result<PipelineResult, PipelineError> {
    Pipeline::new()?.process_file(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Expr;
    use crate::logging::capture::capture_events;
    use crate::syntax::SyntaxError;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_process_source() {
        let result = process_source("2 + 3 * 4", INLINE_SOURCE_LABEL).unwrap();

        assert_eq!(result.value, 14.0);
        assert_eq!(result.expression.to_string(), "Add(2, Mul(3, 4))");
        assert_eq!(result.token_count(), 6);
        assert_eq!(result.lexical_metrics.whitespace_tokens, 4);
        assert!(result.file_metadata.is_none());
    }

    #[test]
    fn test_process_file() {
        let mut file = tempfile::Builder::new().suffix(".arith").tempfile().unwrap();
        writeln!(file, "(1 + 2) * 3").unwrap();

        let result = process_file(file.path()).unwrap();
        assert_eq!(result.value, 9.0);
        assert_eq!(
            result.expression,
            Expr::mul(
                Expr::add(Expr::literal(1.0), Expr::literal(2.0)),
                Expr::literal(3.0)
            )
        );
        assert_eq!(result.file_metadata.map(|m| m.line_count), Some(1));
    }

    #[test]
    fn test_lexical_failure_propagates() {
        let error = process_source("3@4", INLINE_SOURCE_LABEL).unwrap_err();
        assert_matches!(error, PipelineError::LexicalAnalysis(_));
        assert_eq!(error.span().map(|s| s.start.offset), Some(1));
    }

    #[test]
    fn test_syntax_failure_propagates() {
        let error = process_source("(1+2", INLINE_SOURCE_LABEL).unwrap_err();
        assert_matches!(
            error,
            PipelineError::SyntaxAnalysis(SyntaxError::UnexpectedEndOfInput { .. })
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = process_file(dir.path().join("absent.arith")).unwrap_err();
        assert_matches!(error, PipelineError::FileProcessing(_));
    }

    #[test]
    fn test_output_report() {
        let result = process_source("1-2-3", INLINE_SOURCE_LABEL).unwrap();
        let output = PipelineOutput::from_result(&result);

        assert_eq!(output.expression, "Sub(1, Sub(2, 3))");
        assert_eq!(output.value, 2.0);
        assert_eq!(output.tokens.len(), 6);

        let json: serde_json::Value = serde_json::from_str(&output.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["source"], "<expr>");
        assert_eq!(json["value"], 2.0);
        assert!(json["generated_at"].is_string());
        assert_eq!(json["tokens"][5]["kind"], "END-OF-INPUT");
    }

    #[test]
    fn test_division_by_zero_reports_null_value() {
        let result = process_source("1/0", INLINE_SOURCE_LABEL).unwrap();
        assert!(result.value.is_infinite());

        let json: serde_json::Value =
            serde_json::from_str(&PipelineOutput::from_result(&result).to_json_pretty().unwrap())
                .unwrap();
        assert!(json["value"].is_null());
    }

    #[test]
    fn test_frontend_failures_logged_once() {
        let (outcome, events) = capture_events(|| process_source("3@4", INLINE_SOURCE_LABEL));
        assert!(outcome.is_err());

        let errors: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, Some(codes::lexical::UNRECOGNIZED_CHARACTER));
        assert_eq!(errors[0].span.map(|s| s.start.offset), Some(1));

        let (outcome, events) = capture_events(|| process_source("(1+2", INLINE_SOURCE_LABEL));
        assert!(outcome.is_err());

        let errors: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, Some(codes::syntax::UNEXPECTED_END_OF_INPUT));
    }
}

use crate::file_processor::FileMetadata;
use crate::grammar::Expr;
use crate::lexical::LexicalMetrics;
use crate::tokens::TokenStream;
use std::time::Duration;

/// Everything one pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// File path or a caller-supplied label such as `<expr>`
    pub label: String,
    pub expression: Expr,
    pub value: f64,
    pub tokens: TokenStream,
    pub lexical_metrics: LexicalMetrics,
    /// Present when the source came from a file
    pub file_metadata: Option<FileMetadata>,
    pub processing_duration: Duration,
}

impl PipelineResult {
    /// Significant tokens, END-OF-INPUT included
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn log_success(&self) {
        crate::log_success!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "Expression pipeline succeeded",
            "source" => self.label,
            "value" => self.value,
            "tokens" => self.token_count(),
            "nodes" => self.expression.node_count(),
            "duration_ms" => format!("{:.3}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}

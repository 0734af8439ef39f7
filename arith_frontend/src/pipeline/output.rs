use crate::grammar::Expr;
use crate::lexical::LexicalMetrics;
use crate::pipeline::PipelineResult;
use crate::tokens::Token;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Serializable report of a pipeline run. Non-finite values serialize as
/// `null`.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub source: String,
    /// Prefix rendering, e.g. `Sub(1, Sub(2, 3))`
    pub expression: String,
    pub tree: Expr,
    pub value: f64,
    pub tokens: Vec<Token>,
    pub lexical_metrics: LexicalMetrics,
    pub duration_ms: f64,
    pub generated_at: DateTime<Utc>,
    pub tool_version: &'static str,
}

impl PipelineOutput {
    pub fn from_result(result: &PipelineResult) -> Self {
        Self {
            source: result.label.clone(),
            expression: result.expression.to_string(),
            tree: result.expression.clone(),
            value: result.value,
            tokens: result.tokens.significant_tokens(),
            lexical_metrics: result.lexical_metrics.clone(),
            duration_ms: result.processing_duration.as_secs_f64() * 1000.0,
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION"),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

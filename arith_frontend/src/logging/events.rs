//! Log events emitted by the front end

use super::codes::{self, Code};
use crate::utils::Span;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Log severity levels, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged occurrence. Errors and milestones carry a registered
/// [`Code`]; free-form info and debug lines do not.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code: None,
            message: message.into(),
            span: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message).with_code(code)
    }

    /// Info-level milestone such as a completed phase
    pub fn success(code: Code, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message).with_code(code)
    }

    pub fn with_code(mut self, code: Code) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_context(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    /// Registry category of the code, `"General"` for uncoded events
    pub fn category(&self) -> &'static str {
        self.code
            .map(|code| codes::get_category(code.as_str()))
            .unwrap_or("General")
    }

    /// `[LEVEL] CODE message at line:col key=value ...`
    pub fn format(&self) -> String {
        let mut line = format!("[{}]", self.level);
        if let Some(code) = self.code {
            line.push(' ');
            line.push_str(code.as_str());
        }
        line.push(' ');
        line.push_str(&self.message);

        if let Some(span) = self.span {
            line.push_str(&format!(" at {}", span.start));
        }
        for (key, value) in &self.context {
            line.push_str(&format!(" {}={}", key, value));
        }

        if self.is_error() {
            if let Some(code) = self.code {
                line.push_str(&format!(" ({})", codes::get_action(code.as_str())));
            }
        }

        line
    }

    /// Single-line JSON object for structured output
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_uncoded_events_are_general() {
        let event = LogEvent::new(LogLevel::Debug, "Token");

        assert!(event.code.is_none());
        assert_eq!(event.category(), "General");
        assert_eq!(event.format(), "[DEBUG] Token");
    }

    #[test]
    fn test_error_format_has_position_context_and_action() {
        let span = Span::new(Position::new(1, 1, 2), Position::new(2, 1, 3));
        let event = LogEvent::error(codes::lexical::UNRECOGNIZED_CHARACTER, "Unrecognized character")
            .with_span(span)
            .with_context("character", '@');
        let line = event.format();

        assert!(line.starts_with("[ERROR] E020 Unrecognized character at 1:2 character=@"));
        assert!(line.ends_with(&format!(
            "({})",
            codes::get_action(codes::lexical::UNRECOGNIZED_CHARACTER.as_str())
        )));
        assert_eq!(event.category(), "Lexical");
    }

    #[test]
    fn test_success_is_info_level() {
        let event = LogEvent::success(codes::success::TOKENIZATION_COMPLETE, "Tokenized");
        assert_eq!(event.level, LogLevel::Info);
        assert!(!event.format().contains('('));
    }

    #[test]
    fn test_json_shape() {
        let event = LogEvent::error(codes::syntax::UNEXPECTED_TOKEN, "Unexpected ')'")
            .with_context("kind", "RPAREN");

        let json: serde_json::Value = serde_json::from_str(&event.format_json().unwrap()).unwrap();
        assert_eq!(json["level"], "Error");
        assert_eq!(json["code"], "E050");
        assert_eq!(json["context"]["kind"], "RPAREN");
        assert!(json["timestamp"].is_string());
        assert!(json.get("span").is_none());
    }
}

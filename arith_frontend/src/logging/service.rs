//! Logger backends and the level-filtering service in front of them

use super::events::{LogEvent, LogLevel};
use crate::config::runtime::LoggingPreferences;
use std::sync::Arc;

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Human-readable lines; errors go to stderr
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        emit(event.level, &event.format());
    }
}

/// One JSON object per line
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        let line = event.format_json().unwrap_or_else(|_| event.format());
        emit(event.level, &line);
    }
}

fn emit(level: LogLevel, line: &str) {
    match level {
        LogLevel::Error => eprintln!("{}", line),
        _ => println!("{}", line),
    }
}

/// Which backend a service writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Console,
    Structured,
    Disabled,
    Custom,
}

pub struct LoggingService {
    logger: Option<Arc<dyn Logger>>,
    backend: Backend,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self {
            logger: Some(logger),
            backend: Backend::Custom,
            min_level,
        }
    }

    /// Pick the backend the preferences ask for. `min_level` is passed
    /// separately so the caller can apply the security floor first.
    pub fn from_preferences(preferences: &LoggingPreferences, min_level: LogLevel) -> Self {
        let (logger, backend): (Option<Arc<dyn Logger>>, Backend) =
            match (preferences.enable_console_logging, preferences.use_structured_logging) {
                (false, _) => (None, Backend::Disabled),
                (true, true) => (Some(Arc::new(StructuredLogger)), Backend::Structured),
                (true, false) => (Some(Arc::new(ConsoleLogger)), Backend::Console),
            };

        Self {
            logger,
            backend,
            min_level,
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        self.logger.is_some() && level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if !self.should_log(event.level) {
            return;
        }
        if let Some(logger) = &self.logger {
            logger.log(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<LogLevel>>);

    impl Logger for Recorder {
        fn log(&self, event: &LogEvent) {
            if let Ok(mut levels) = self.0.lock() {
                levels.push(event.level);
            }
        }
    }

    fn preferences(console: bool, structured: bool) -> LoggingPreferences {
        LoggingPreferences {
            use_structured_logging: structured,
            enable_console_logging: console,
            min_log_level: LogLevel::Info,
            log_performance_events: false,
            include_file_context: false,
        }
    }

    #[test]
    fn test_backend_selection() {
        let console = LoggingService::from_preferences(&preferences(true, false), LogLevel::Info);
        assert_eq!(console.backend(), Backend::Console);

        let json = LoggingService::from_preferences(&preferences(true, true), LogLevel::Info);
        assert_eq!(json.backend(), Backend::Structured);

        let silent = LoggingService::from_preferences(&preferences(false, true), LogLevel::Debug);
        assert_eq!(silent.backend(), Backend::Disabled);
        assert!(!silent.should_log(LogLevel::Error));
    }

    #[test]
    fn test_level_filtering() {
        let recorder = Arc::new(Recorder::default());
        let service = LoggingService::new(recorder.clone(), LogLevel::Info);

        service.log_event(LogEvent::new(LogLevel::Debug, "dropped"));
        service.log_event(LogEvent::new(LogLevel::Info, "kept"));
        service.log_event(LogEvent::error(codes::system::INTERNAL_ERROR, "kept"));

        let levels = recorder.0.lock().unwrap().clone();
        assert_eq!(levels, vec![LogLevel::Info, LogLevel::Error]);
    }
}

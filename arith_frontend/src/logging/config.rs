//! Logging configuration: compile-time limits plus runtime preferences
//!
//! Limits come from the generated `compile_time::logging` module and cannot
//! be changed at runtime. Preferences are set once at startup.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences. May only be called once per process.
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized")?;

    Ok(())
}

/// Installed preferences, or the environment defaults
pub fn preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Least verbose level the user may configure
pub fn get_security_log_level() -> LogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => LogLevel::Error,
        1 => LogLevel::Warning,
        _ => LogLevel::Info,
    }
}

/// User preference widened to the security floor
pub fn get_min_log_level() -> LogLevel {
    effective_level(preferences().min_log_level)
}

pub fn effective_level(requested: LogLevel) -> LogLevel {
    requested.max(get_security_log_level())
}

pub fn log_performance_events() -> bool {
    preferences().log_performance_events
}

pub fn include_file_context() -> bool {
    preferences().include_file_context
}

pub fn max_events_per_file() -> usize {
    MAX_LOG_EVENTS_PER_FILE
}

/// Truncate a message to `MAX_LOG_MESSAGE_LENGTH` characters
pub fn clamp_message(message: &str) -> String {
    if message.chars().count() <= MAX_LOG_MESSAGE_LENGTH {
        message.to_string()
    } else {
        let mut clamped: String = message.chars().take(MAX_LOG_MESSAGE_LENGTH).collect();
        clamped.push_str("...");
        clamped
    }
}

pub fn validate_config() -> Result<(), String> {
    if MAX_LOG_EVENTS_PER_FILE == 0 {
        return Err("MAX_LOG_EVENTS_PER_FILE must be non-zero".to_string());
    }
    if MAX_LOG_MESSAGE_LENGTH < 16 {
        return Err(format!(
            "MAX_LOG_MESSAGE_LENGTH too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }
    Ok(())
}

/// Preferences used by the CLI when `--debug` is passed
pub fn get_development_preferences() -> LoggingPreferences {
    LoggingPreferences {
        use_structured_logging: false,
        enable_console_logging: true,
        min_log_level: LogLevel::Debug,
        log_performance_events: true,
        include_file_context: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_security_floor() {
        assert!(get_min_log_level() >= get_security_log_level());
        assert_eq!(effective_level(LogLevel::Error), get_security_log_level().max(LogLevel::Error));
        assert_eq!(effective_level(LogLevel::Debug), LogLevel::Debug);
    }

    #[test]
    fn test_clamp_message() {
        assert_eq!(clamp_message("short"), "short");

        let long = "x".repeat(MAX_LOG_MESSAGE_LENGTH + 10);
        let clamped = clamp_message(&long);
        assert!(clamped.ends_with("..."));
        assert_eq!(clamped.chars().count(), MAX_LOG_MESSAGE_LENGTH + 3);
    }
}

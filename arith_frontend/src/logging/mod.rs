//! Global logging for the arithmetic front end
//!
//! One process-wide [`LoggingService`], a per-thread file context, and the
//! functions behind `log_error!`, `log_success!` and friends. Every entry
//! point is a no-op until [`init_global_logging`] runs, so the library
//! stays silent when embedded.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::config::runtime::LoggingPreferences;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{Backend, ConsoleLogger, Logger, LoggingService, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileContext>> = const { RefCell::new(None) };
}

struct FileContext {
    path: PathBuf,
    file_id: usize,
    /// Non-error events dispatched so far for this file
    events: usize,
}

/// Initialize global logging from the installed (or environment) preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    for code in codes::all_error_codes() {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    let service = Arc::new(LoggingService::from_preferences(
        &config::preferences(),
        config::get_min_log_level(),
    ));

    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized")?;

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

pub fn init_global_logging_with_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    config::init_runtime_preferences(preferences)?;
    init_global_logging()
}

fn global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Run `f` with every event on this thread tagged with `file_path`
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = FILE_CONTEXT.with(|ctx| {
        ctx.borrow_mut().replace(FileContext {
            path: file_path,
            file_id,
            events: 0,
        })
    });
    let result = f();
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    result
}

/// Path of the file being processed on this thread, if any
pub fn current_file() -> Option<PathBuf> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().as_ref().map(|file| file.path.clone()))
}

/// Tag the event with the file context and count it against the per-file
/// cap. Returns `None` once a file has used up its budget; errors always pass.
fn apply_file_context(event: LogEvent) -> Option<LogEvent> {
    FILE_CONTEXT.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        let Some(file) = ctx.as_mut() else {
            return Some(event);
        };

        if !event.is_error() {
            if file.events >= config::max_events_per_file() {
                return None;
            }
            file.events += 1;
        }

        if config::include_file_context() {
            Some(
                event
                    .with_context("file", file.path.display())
                    .with_context("file_id", file.file_id),
            )
        } else {
            Some(event)
        }
    })
}

fn dispatch(event: LogEvent, context: Vec<(&str, &str)>) {
    let Some(logger) = global_logger() else {
        return;
    };
    if !logger.should_log(event.level) {
        return;
    }

    let event = context
        .into_iter()
        .fold(event, |event, (key, value)| event.with_context(key, value));

    if let Some(event) = apply_file_context(event) {
        logger.log_event(event);
    }
}

#[doc(hidden)]
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, config::clamp_message(message));
    if let Some(span) = span {
        event = event.with_span(span);
    }
    dispatch(event, context);
}

#[doc(hidden)]
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::success(code, config::clamp_message(message)), context);
}

#[doc(hidden)]
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::new(LogLevel::Info, config::clamp_message(message)), context);
}

#[doc(hidden)]
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::new(LogLevel::Debug, config::clamp_message(message)), context);
}

/// Records events per thread so tests running in parallel only see their own
#[cfg(test)]
pub(crate) mod capture {
    use super::*;

    thread_local! {
        static CAPTURED: RefCell<Option<Vec<LogEvent>>> = const { RefCell::new(None) };
    }

    struct ThreadLocalLogger;

    impl Logger for ThreadLocalLogger {
        fn log(&self, event: &LogEvent) {
            CAPTURED.with(|captured| {
                if let Some(events) = captured.borrow_mut().as_mut() {
                    events.push(event.clone());
                }
            });
        }
    }

    /// Run `f` and return every event it logged on this thread
    pub(crate) fn capture_events<R>(f: impl FnOnce() -> R) -> (R, Vec<LogEvent>) {
        GLOBAL_LOGGER.get_or_init(|| {
            Arc::new(LoggingService::new(Arc::new(ThreadLocalLogger), LogLevel::Info))
        });

        CAPTURED.with(|captured| *captured.borrow_mut() = Some(Vec::new()));
        let result = f();
        let events = CAPTURED.with(|captured| captured.borrow_mut().take().unwrap_or_default());
        (result, events)
    }
}

#[cfg(test)]
mod tests {
    use super::capture::capture_events;
    use super::*;

    #[test]
    fn test_file_context_is_scoped() {
        assert!(current_file().is_none());

        let inner = with_file_context(PathBuf::from("a.arith"), 2, || {
            let nested = with_file_context(PathBuf::from("b.arith"), 3, current_file);
            (nested, current_file())
        });

        assert_eq!(inner.0, Some(PathBuf::from("b.arith")));
        assert_eq!(inner.1, Some(PathBuf::from("a.arith")));
        assert!(current_file().is_none());
    }

    #[test]
    fn test_events_are_captured_per_thread() {
        let (_, events) = capture_events(|| {
            log_error_with_context(codes::system::INTERNAL_ERROR, "boom", None, vec![("k", "v")]);
            log_info_with_context("note", vec![]);
        });

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].code, Some(codes::system::INTERNAL_ERROR));
        assert_eq!(events[0].context.get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_per_file_cap_keeps_errors() {
        let limit = config::max_events_per_file();
        let (_, events) = capture_events(|| {
            with_file_context(PathBuf::from("noisy.arith"), 0, || {
                for _ in 0..limit + 5 {
                    log_info_with_context("tick", vec![]);
                }
                log_error_with_context(codes::system::INTERNAL_ERROR, "still reported", None, vec![]);
            })
        });

        assert_eq!(events.len(), limit + 1);
        assert!(events.last().is_some_and(LogEvent::is_error));
    }
}

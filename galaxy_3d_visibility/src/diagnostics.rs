/// Diagnostics — process-wide logger and verbosity filter.
///
/// Every component logs through the `engine_*!` macros, which land here.
/// The logger slot uses thread-safe static storage with RwLock so that
/// background jobs and the orchestrating thread can log concurrently.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogLevel, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Active verbosity filter, stored as `LogLevel::to_u8`
static LOG_LEVEL: AtomicU8 = AtomicU8::new(2);

fn logger_slot() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// Logging front door shared by every visibility component.
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_visibility::galaxy3d::{Diagnostics, log::{Logger, LogEntry, LogLevel}};
///
/// struct FileLogger;
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
///
/// Diagnostics::set_logger(FileLogger);
/// Diagnostics::set_log_level(LogLevel::All);
/// ```
pub struct Diagnostics;

impl Diagnostics {
    /// Replace the current logger with a custom implementation.
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_slot().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_slot().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Set the verbosity filter applied to every entry.
    pub fn set_log_level(level: LogLevel) {
        LOG_LEVEL.store(level.to_u8(), Ordering::Relaxed);
    }

    /// Current verbosity filter.
    pub fn log_level() -> LogLevel {
        LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! macro to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if !Self::log_level().allows(severity) {
            return;
        }
        if let Ok(lock) = logger_slot().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;

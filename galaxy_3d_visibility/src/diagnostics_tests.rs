//! Unit tests for diagnostics.rs
//!
//! The logger slot and the level filter are process-wide, so every test
//! here runs serially and restores the defaults before returning.

use super::*;
use std::sync::{Arc, Mutex};
use serial_test::serial;

/// Test logger that captures log entries for verification
struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn restore_defaults() {
    Diagnostics::reset_logger();
    Diagnostics::set_log_level(LogLevel::Warnings);
}

// ============================================================================
// LOGGER SLOT
// ============================================================================

#[test]
#[serial]
fn test_custom_logger_receives_entries() {
    let (logger, entries) = CaptureLogger::new();
    Diagnostics::set_logger(logger);
    Diagnostics::set_log_level(LogLevel::All);

    Diagnostics::log(LogSeverity::Info, "test::module", "hello".to_string());

    {
        let entries = entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source, "test::module");
        assert_eq!(entries[0].message, "hello");
        assert!(entries[0].file.is_none());
    }
    restore_defaults();
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let (logger, entries) = CaptureLogger::new();
    Diagnostics::set_logger(logger);
    Diagnostics::set_log_level(LogLevel::All);

    crate::engine_error!("test::module", "failure {}", 7);

    {
        let entries = entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, LogSeverity::Error);
        assert_eq!(entries[0].message, "failure 7");
        assert!(entries[0].file.is_some());
        assert!(entries[0].line.is_some());
    }
    restore_defaults();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let (logger, entries) = CaptureLogger::new();
    Diagnostics::set_logger(logger);
    Diagnostics::reset_logger();

    Diagnostics::log(LogSeverity::Error, "test::module", "to console".to_string());

    assert!(entries.lock().unwrap().is_empty());
    restore_defaults();
}

// ============================================================================
// LEVEL FILTER
// ============================================================================

#[test]
#[serial]
fn test_level_filter_drops_lower_severities() {
    let (logger, entries) = CaptureLogger::new();
    Diagnostics::set_logger(logger);
    Diagnostics::set_log_level(LogLevel::Warnings);

    crate::engine_debug!("test::module", "hidden");
    crate::engine_info!("test::module", "hidden");
    crate::engine_warn!("test::module", "shown");
    crate::engine_error!("test::module", "shown");

    assert_eq!(entries.lock().unwrap().len(), 2);
    restore_defaults();
}

#[test]
#[serial]
fn test_level_none_silences_everything() {
    let (logger, entries) = CaptureLogger::new();
    Diagnostics::set_logger(logger);
    Diagnostics::set_log_level(LogLevel::None);

    crate::engine_error!("test::module", "silenced");

    assert!(entries.lock().unwrap().is_empty());
    restore_defaults();
}

#[test]
#[serial]
fn test_log_level_round_trip() {
    Diagnostics::set_log_level(LogLevel::Errors);
    assert_eq!(Diagnostics::log_level(), LogLevel::Errors);
    restore_defaults();
    assert_eq!(Diagnostics::log_level(), LogLevel::Warnings);
}

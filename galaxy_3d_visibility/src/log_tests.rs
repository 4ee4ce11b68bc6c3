//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, LogLevel and DefaultLogger.

use crate::log::{Logger, LogEntry, LogLevel, LogSeverity, DefaultLogger};
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "galaxy3d::VisibilitySystem".to_string(),
        message: "Tracking 12 entities".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Warn), "Warn");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// LOG LEVEL FILTER TESTS
// ============================================================================

#[test]
fn test_log_level_none_blocks_everything() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert!(!LogLevel::None.allows(severity));
    }
}

#[test]
fn test_log_level_errors_only() {
    assert!(LogLevel::Errors.allows(LogSeverity::Error));
    assert!(!LogLevel::Errors.allows(LogSeverity::Warn));
    assert!(!LogLevel::Errors.allows(LogSeverity::Info));
}

#[test]
fn test_log_level_warnings() {
    assert!(LogLevel::Warnings.allows(LogSeverity::Error));
    assert!(LogLevel::Warnings.allows(LogSeverity::Warn));
    assert!(!LogLevel::Warnings.allows(LogSeverity::Info));
    assert!(!LogLevel::Warnings.allows(LogSeverity::Trace));
}

#[test]
fn test_log_level_all() {
    assert!(LogLevel::All.allows(LogSeverity::Trace));
    assert!(LogLevel::All.allows(LogSeverity::Error));
}

#[test]
fn test_log_level_default_is_warnings() {
    assert_eq!(LogLevel::default(), LogLevel::Warnings);
}

#[test]
fn test_log_level_u8_conversion() {
    for level in [LogLevel::None, LogLevel::Errors, LogLevel::Warnings, LogLevel::All] {
        assert_eq!(LogLevel::from_u8(level.to_u8()), level);
    }
    assert_eq!(LogLevel::from_u8(200), LogLevel::All);
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_creation_without_file_line() {
    let e = entry(LogSeverity::Info, None, None);
    assert_eq!(e.severity, LogSeverity::Info);
    assert_eq!(e.source, "galaxy3d::VisibilitySystem");
    assert!(e.file.is_none());
    assert!(e.line.is_none());
}

#[test]
fn test_log_entry_clone() {
    let e1 = entry(LogSeverity::Warn, Some("reaper.rs"), Some(10));
    let e2 = e1.clone();
    assert_eq!(e1.severity, e2.severity);
    assert_eq!(e1.message, e2.message);
    assert_eq!(e1.file, e2.file);
    assert_eq!(e1.line, e2.line);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        logger.log(&entry(severity, None, None));
        logger.log(&entry(severity, Some("system.rs"), Some(42)));
    }
}

#[test]
fn test_format_plain_without_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Info, None, None));
    assert!(line.contains("[INFO ]"));
    assert!(line.contains("[galaxy3d::VisibilitySystem]"));
    assert!(line.ends_with("Tracking 12 entities"));
}

#[test]
fn test_format_plain_with_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Error, Some("system.rs"), Some(42)));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("(system.rs:42)"));
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
}

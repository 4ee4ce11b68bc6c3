//! Integration tests for the diagnostics surface
//!
//! These tests install a capturing logger and check what the visibility
//! system reports through it, and how the configured log level filters it.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_visibility::galaxy3d::camera::Camera;
use galaxy_3d_visibility::galaxy3d::log::{LogEntry, LogLevel, LogSeverity, Logger};
use galaxy_3d_visibility::galaxy3d::math::Pose;
use galaxy_3d_visibility::galaxy3d::oracle::SphereOracle;
use galaxy_3d_visibility::galaxy3d::scene::{EntityDesc, SceneGraph};
use galaxy_3d_visibility::galaxy3d::{Diagnostics, TargetSource, VisibilityConfig, VisibilitySystem};
use glam::{Mat4, Vec3};
use serial_test::serial;
use std::sync::{Arc, Mutex};

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn restore_defaults() {
    Diagnostics::reset_logger();
    Diagnostics::set_log_level(LogLevel::Warnings);
}

fn camera() -> Camera {
    Camera::from_matrices(
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y),
        Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0),
    )
}

fn from_source<'a>(entries: &'a [LogEntry], source: &'a str) -> impl Iterator<Item = &'a LogEntry> {
    entries.iter().filter(move |e| e.source == source)
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);
    Diagnostics::set_log_level(LogLevel::All);

    Diagnostics::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Diagnostics::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    Diagnostics::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    {
        let captured: Vec<LogEntry> = from_source(&entries.lock().unwrap(), "test::module").cloned().collect();
        assert_eq!(captured.len(), 3);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].message, "Test info message");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert_eq!(captured[2].severity, LogSeverity::Error);
    }
    restore_defaults();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    Diagnostics::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    {
        let captured = entries.lock().unwrap();
        let entry = from_source(&captured, "test::error").next().unwrap();
        assert_eq!(entry.message, "Critical error occurred");
        assert_eq!(entry.file, Some("test_file.rs"));
        assert_eq!(entry.line, Some(42));
    }
    restore_defaults();
}

#[test]
#[serial]
fn test_integration_inert_system_reports_error() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    let scene = Arc::new(SceneGraph::new());
    let system = VisibilitySystem::new(VisibilityConfig::default(), scene, Box::new(SphereOracle::new()));
    assert!(!system.is_initialized());

    {
        let captured = entries.lock().unwrap();
        let errors: Vec<&LogEntry> = from_source(&captured, "galaxy3d::VisibilitySystem")
            .filter(|e| e.severity == LogSeverity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("no usable camera"));
        assert!(errors[0].file.is_some());
    }
    restore_defaults();
}

#[test]
#[serial]
fn test_integration_band_correction_is_warned() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    let config = VisibilityConfig {
        target: TargetSource::Manual,
        distance_bands: vec![100.0, 50.0],
        ..VisibilityConfig::with_camera(camera())
    };
    let system = VisibilitySystem::new(config, Arc::new(SceneGraph::new()), Box::new(SphereOracle::new()));

    assert!(system.is_initialized());
    assert!((system.config().distance_bands[1] - 100.01).abs() < 1e-3);
    {
        let captured = entries.lock().unwrap();
        assert_eq!(from_source(&captured, "galaxy3d::VisibilityConfig").count(), 1);
    }
    restore_defaults();
}

#[test]
#[serial]
fn test_integration_rejected_registration_is_warned() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    let scene = Arc::new(SceneGraph::new());
    let bare = scene
        .create_entity(EntityDesc { pose: Pose::IDENTITY, ..Default::default() })
        .unwrap();
    let config = VisibilityConfig {
        target: TargetSource::Manual,
        ..VisibilityConfig::with_camera(camera())
    };
    let mut system = VisibilitySystem::new(config, scene, Box::new(SphereOracle::new()));

    assert!(system.register(bare).is_err());
    {
        let captured = entries.lock().unwrap();
        let warning = from_source(&captured, "galaxy3d::VisibilitySystem")
            .find(|e| e.severity == LogSeverity::Warn)
            .unwrap();
        assert!(warning.message.contains("neither a drawable nor a LOD group"));
    }
    restore_defaults();
}

#[test]
#[serial]
fn test_integration_log_level_none_silences_system() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    let config = VisibilityConfig {
        log_level: LogLevel::None,
        ..VisibilityConfig::default()
    };
    let system = VisibilitySystem::new(config, Arc::new(SceneGraph::new()), Box::new(SphereOracle::new()));

    assert!(!system.is_initialized());
    assert_eq!(Diagnostics::log_level(), LogLevel::None);
    assert!(entries.lock().unwrap().is_empty());
    restore_defaults();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);
    Diagnostics::set_log_level(LogLevel::All);

    Diagnostics::log(LogSeverity::Info, "test", "Message 1".to_string());
    Diagnostics::reset_logger();
    Diagnostics::log(LogSeverity::Info, "test", "Message 2".to_string());

    assert_eq!(from_source(&entries.lock().unwrap(), "test").count(), 1);
    restore_defaults();
}

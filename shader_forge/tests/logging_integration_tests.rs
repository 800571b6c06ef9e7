//! Integration tests for the logging system
//!
//! The logger is process-wide, so every test in this file is #[serial].
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use shader_forge::forge::build::{BuilderConfig, ProgramBuilder};
use shader_forge::forge::log::{CaptureLogger, LogEntry, LogSeverity, Logger};
use shader_forge::forge::reference::ReferenceContext;
use shader_forge::forge::Forge;
use std::sync::{Arc, Mutex};
use serial_test::serial;

const VS: &str = "attribute vec2 a_position; void main() { gl_Position = vec4(a_position, 0.0, 1.0); }";
const FS: &str = "precision mediump float; void main() { gl_FragColor = vec4(1.0); }";

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Logger that keeps only the formatted lines
struct LineLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LineLogger {
    fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (Self { lines: lines.clone() }, lines)
    }
}

impl Logger for LineLogger {
    fn log(&self, entry: &LogEntry) {
        self.lines.lock().unwrap().push(entry.format_plain());
    }
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (logger, lines) = LineLogger::new();
    Forge::set_logger(logger);

    Forge::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Forge::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    let mine: Vec<String> = lines
        .lock()
        .unwrap()
        .iter()
        .filter(|l| l.contains("[test::module]"))
        .cloned()
        .collect();
    assert_eq!(mine.len(), 2);
    assert!(mine[0].contains("[INFO ] [test::module] Test info message"));
    assert!(mine[1].contains("[WARN ] [test::module] Test warning message"));

    Forge::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let capture = Arc::new(CaptureLogger::new());
    Forge::set_logger(capture.clone());

    Forge::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    let entries = capture.entries_from("test::error");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file, Some("test_file.rs"));
    assert_eq!(entries[0].line, Some(42));
    assert!(entries[0].format_plain().ends_with("Critical error occurred (test_file.rs:42)"));

    Forge::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let capture = Arc::new(CaptureLogger::new());
    Forge::set_logger(capture.clone());

    Forge::log(LogSeverity::Info, "test::reset", "Message 1".to_string());
    assert_eq!(capture.entries_from("test::reset").len(), 1);

    Forge::reset_logger();
    Forge::log(LogSeverity::Info, "test::reset", "Message 2".to_string());

    assert_eq!(capture.entries_from("test::reset").len(), 1);
}

#[test]
#[serial]
fn test_integration_builder_reports_failures() {
    let capture = Arc::new(CaptureLogger::new());
    Forge::set_logger(capture.clone());

    let mut ctx = ReferenceContext::new();
    let builder = ProgramBuilder::with_config(BuilderConfig::default().with_label("integration-log"));
    let _ = builder.link(&mut ctx, VS, "void main() { gl_FragColor = vec4(1.0) }");

    let errors = capture.entries_at(LogSeverity::Error);
    let error = errors
        .iter()
        .find(|e| e.message.contains("[integration-log]"))
        .expect("compile failure should be logged");
    assert_eq!(error.source, "shader_forge::Builder");
    assert!(error.message.contains("fragment shader compile failed"));
    assert!(error.message.contains("syntax error"));

    Forge::reset_logger();
}

#[test]
#[serial]
fn test_integration_reference_context_traces_calls() {
    let capture = Arc::new(CaptureLogger::new());
    Forge::set_logger(capture.clone());

    let mut ctx = ReferenceContext::with_call_journal();
    let _program = ProgramBuilder::new().link(&mut ctx, VS, FS).unwrap();

    let traces = capture.entries_from("shader_forge::reference");
    assert!(traces.len() >= ctx.calls().len());
    assert!(traces.iter().all(|e| e.severity == LogSeverity::Trace));

    Forge::reset_logger();
}

//! Logging for Shader Forge
//!
//! Every builder, library and backend step reports through a process-wide
//! [`Logger`] sink owned by [`Forge`](crate::forge::Forge). The default sink
//! prints colored lines; tests swap in a [`CaptureLogger`].

use colored::*;
use std::sync::Mutex;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Sink for log entries
///
/// # Example
///
/// ```no_run
/// use shader_forge::forge::log::{Logger, LogEntry};
///
/// struct StderrLogger;
///
/// impl Logger for StderrLogger {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("{}: {}", entry.source, entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Process one entry
    fn log(&self, entry: &LogEntry);
}

/// One log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Emitting component (e.g. "shader_forge::Builder", "shader_forge::glow")
    pub source: String,
    pub message: String,
    /// Source file, only set by `forge_error!` and friends
    pub file: Option<&'static str>,
    /// Source line, only set by `forge_error!` and friends
    pub line: Option<u32>,
}

impl LogEntry {
    /// Entry stamped with the current time and no source location
    pub fn new(severity: LogSeverity, source: &str, message: String) -> Self {
        Self {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        }
    }

    /// Attach a file:line location
    pub fn with_location(mut self, file: &'static str, line: u32) -> Self {
        self.file = Some(file);
        self.line = Some(line);
        self
    }

    /// Render as `[timestamp] [SEVERITY] [source] message (file:line)` without colors
    pub fn format_plain(&self) -> String {
        let mut out = format!(
            "[{}] [{}] [{}] {}",
            format_timestamp(self.timestamp),
            self.severity.label(),
            self.source,
            self.message
        );
        if let (Some(file), Some(line)) = (self.file, self.line) {
            out.push_str(&format!(" ({}:{})", file, line));
        }
        out
    }
}

/// Log severity levels, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogSeverity {
    /// Fixed-width label used in formatted output
    pub fn label(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

fn format_timestamp(timestamp: SystemTime) -> String {
    let datetime: DateTime<Local> = timestamp.into();
    datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Colored console logger
///
/// Entries below `min_severity` are dropped. WARN and ERROR go to stderr,
/// everything else to stdout.
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Located: `[timestamp] [ERROR] [source] message (file:line)`
#[derive(Debug, Clone, Copy)]
pub struct DefaultLogger {
    pub min_severity: LogSeverity,
}

impl DefaultLogger {
    pub fn new(min_severity: LogSeverity) -> Self {
        Self { min_severity }
    }
}

impl Default for DefaultLogger {
    fn default() -> Self {
        Self {
            min_severity: if cfg!(debug_assertions) { LogSeverity::Debug } else { LogSeverity::Info },
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.severity < self.min_severity {
            return;
        }

        let label = entry.severity.label();
        let severity_str = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };

        let mut line = format!(
            "[{}] [{}] [{}] {}",
            format_timestamp(entry.timestamp),
            severity_str,
            entry.source.bright_blue(),
            entry.message
        );
        if let (Some(file), Some(line_no)) = (entry.file, entry.line) {
            line.push_str(&format!(" ({}:{})", file, line_no));
        }

        if entry.severity >= LogSeverity::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Logger that keeps every entry in memory
///
/// Useful to assert on diagnostics in tests.
#[derive(Debug, Default)]
pub struct CaptureLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl CaptureLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all captured entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Captured entries at exactly `severity`
    pub fn entries_at(&self, severity: LogSeverity) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.severity == severity)
            .collect()
    }

    /// Captured entries emitted by `source`
    ///
    /// The logger is process-wide, so tests running in parallel may log into
    /// the same capture; filtering by source keeps assertions local.
    pub fn entries_from(&self, source: &str) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.source == source)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

impl<L: Logger + ?Sized> Logger for std::sync::Arc<L> {
    fn log(&self, entry: &LogEntry) {
        (**self).log(entry)
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, typically disabled)
///
/// # Example
///
/// ```no_run
/// shader_forge::forge_trace!("shader_forge::glow", "glCompileShader({:?})", 3);
/// ```
#[macro_export]
macro_rules! forge_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::forge::Forge::log(
            $crate::forge::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message (development information)
#[macro_export]
macro_rules! forge_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::forge::Forge::log(
            $crate::forge::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message (important events)
///
/// # Example
///
/// ```no_run
/// shader_forge::forge_info!("shader_forge::Builder", "Program '{}' linked", "triangle");
/// ```
#[macro_export]
macro_rules! forge_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::forge::Forge::log(
            $crate::forge::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message (potential issues)
#[macro_export]
macro_rules! forge_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::forge::Forge::log(
            $crate::forge::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! forge_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::forge::Forge::log_detailed(
            $crate::forge::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR message and evaluate to an `Error::BackendError` carrying it
///
/// # Example
///
/// ```no_run
/// # fn create() -> shader_forge::forge::Result<()> {
/// let code: i32 = -1;
/// let result: Result<(), i32> = Err(code);
/// result.map_err(|e| shader_forge::forge_err!("shader_forge::glow", "glCreateShader failed: {}", e))?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! forge_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::forge::Forge::log_detailed(
            $crate::forge::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::forge::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return early with `Err(Error::BackendError)`
#[macro_export]
macro_rules! forge_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::forge_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;

/// Process-wide logger sink
///
/// Rendering contexts are always passed explicitly to the builder; the only
/// global state in the crate is the logger, stored here behind a RwLock so
/// backends and the builder can report without threading a logger through
/// every call.

use std::sync::{OnceLock, RwLock};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

/// Logging entry point used by the `forge_*` macros
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use shader_forge::forge::Forge;
/// use shader_forge::forge::log::CaptureLogger;
///
/// let capture = Arc::new(CaptureLogger::new());
/// Forge::set_logger(capture.clone());
/// // ... build programs ...
/// for entry in capture.entries() {
///     println!("{}", entry.format_plain());
/// }
/// Forge::reset_logger();
/// ```
pub struct Forge;

impl Forge {
    /// Replace the current logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Restore the default colored console logger
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Log without source location
    ///
    /// Used by `forge_trace!`, `forge_debug!`, `forge_info!` and `forge_warn!`.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry::new(severity, source, message));
        }
    }

    /// Log with file:line information
    ///
    /// Used by `forge_error!`, `forge_err!` and `forge_bail!`.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry::new(severity, source, message).with_location(file, line));
        }
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;

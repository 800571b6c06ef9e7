//! Error types for Shader Forge
//!
//! This module defines the error types returned by the program builder,
//! the program library, and the rendering context backends.

use std::fmt;

use crate::context::ShaderStage;

/// Result type for Shader Forge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Diagnostic used when a backend reports a failure with an empty info log
pub(crate) const EMPTY_LOG_FALLBACK: &str = "backend reported failure without an info log";

/// A single shader stage failed to compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderCompileError {
    /// Stage whose source was rejected
    pub stage: ShaderStage,
    /// Compiler info log returned by the backend
    pub diagnostic: String,
}

/// Two compiled stages failed to link into a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramLinkError {
    /// Linker info log returned by the backend
    pub diagnostic: String,
}

impl fmt::Display for ShaderCompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shader compile failed: {}", self.stage, self.diagnostic)
    }
}

impl fmt::Display for ProgramLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program link failed: {}", self.diagnostic)
    }
}

impl std::error::Error for ShaderCompileError {}
impl std::error::Error for ProgramLinkError {}

/// Shader Forge errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A shader stage did not compile
    ShaderCompile(ShaderCompileError),

    /// The compiled stages did not link
    ProgramLink(ProgramLinkError),

    /// Backend-specific error (object creation failed, context lost, etc.)
    BackendError(String),

    /// Invalid resource (unknown or duplicate program name, etc.)
    InvalidResource(String),
}

impl Error {
    /// Stage of a compile failure, `None` for every other error
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            Error::ShaderCompile(err) => Some(err.stage),
            _ => None,
        }
    }

    /// Backend diagnostic text of a compile or link failure
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Error::ShaderCompile(err) => Some(&err.diagnostic),
            Error::ProgramLink(err) => Some(&err.diagnostic),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShaderCompile(err) => write!(f, "{}", err),
            Error::ProgramLink(err) => write!(f, "{}", err),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ShaderCompile(err) => Some(err),
            Error::ProgramLink(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderCompileError> for Error {
    fn from(err: ShaderCompileError) -> Self {
        Error::ShaderCompile(err)
    }
}

impl From<ProgramLinkError> for Error {
    fn from(err: ProgramLinkError) -> Self {
        Error::ProgramLink(err)
    }
}

/// Replace an empty or whitespace-only info log by a fixed fallback message
pub(crate) fn non_empty_log(log: String) -> String {
    if log.trim().is_empty() {
        EMPTY_LOG_FALLBACK.to_string()
    } else {
        log
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

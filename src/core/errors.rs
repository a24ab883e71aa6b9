/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Service errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ExecError {
    #[error("Cannot start {program}: {reason}")]
    #[diagnostic(
        code(exec::spawn_failed),
        help("Check that the executable exists and is executable by the service user.")
    )]
    SpawnFailed { program: String, reason: String },

    #[error("No async runtime available to track the child process")]
    #[diagnostic(
        code(exec::no_runtime),
        help("Launch must be called from within a tokio runtime.")
    )]
    NoRuntime,

    #[error("Invalid request: {0}")]
    #[diagnostic(
        code(exec::invalid_request),
        help("Requests are single-line JSON objects with `execute` and `arguments` keys.")
    )]
    InvalidRequest(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(exec::config), help("Check the EXEC_* environment variables."))]
    Config(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code(exec::io))]
    Io(String),
}

impl ExecError {
    pub fn spawn_failed(program: impl Into<String>, err: &std::io::Error) -> Self {
        ExecError::SpawnFailed {
            program: program.into(),
            reason: err.to_string(),
        }
    }

    /// Error class name used in wire error responses
    pub fn class(&self) -> &'static str {
        match self {
            ExecError::InvalidRequest(_) => "InvalidParameter",
            _ => "GenericError",
        }
    }
}

impl From<std::io::Error> for ExecError {
    fn from(err: std::io::Error) -> Self {
        ExecError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExecError {
    fn from(err: serde_json::Error) -> Self {
        ExecError::InvalidRequest(err.to_string())
    }
}

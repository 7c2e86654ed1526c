//! Error types for taskboard
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown task, malformed import)
//! - 4: Operation failed (storage, serialization, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tb CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskboard operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed import: {0}")]
    MalformedImport(String),

    // Operation failures (exit code 4)
    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::TaskNotFound(_)
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::MalformedImport(_) => exit_codes::USER_ERROR,

            Error::Persistence(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// `user_error` or `operation_failed`, matching the exit code
    pub fn kind(&self) -> &'static str {
        match self.exit_code() {
            exit_codes::USER_ERROR => "user_error",
            _ => "operation_failed",
        }
    }

    /// What the user can try next
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::TaskNotFound(_) => Some("tb list".to_string()),
            Error::InvalidConfig(_) => Some(format!("fix {} then retry", crate::config::CONFIG_FILE)),
            Error::MalformedImport(_) => {
                Some("check that the file holds a JSON array of tasks".to_string())
            }
            Error::LockFailed(path) => Some(format!(
                "retry, or remove {} if no other tb process is running",
                path.display()
            )),
            _ => None,
        }
    }

    /// Structured details for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::TaskNotFound(id) => Some(serde_json::json!({ "id": id })),
            Error::InvalidArgument(message)
            | Error::InvalidConfig(message)
            | Error::MalformedImport(message)
            | Error::Persistence(message) => Some(serde_json::json!({ "message": message })),
            Error::LockFailed(path) => Some(serde_json::json!({
                "path": path.to_string_lossy(),
            })),
            _ => None,
        }
    }
}

/// Result type alias for taskboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// The `error` object of a failed command's JSON envelope
#[derive(Debug, serde::Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: i32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        ErrorBody {
            message: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
            details: err.details(),
        }
    }
}

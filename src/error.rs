//! Error types for daybook
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (invalid task fields, bad arguments, bad config)
//! - 3: Referenced task does not exist
//! - 4: Task store unreachable (I/O failure, lock timeout, corrupt collection)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the daybook CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const NOT_FOUND: i32 = 3;
    pub const STORE_UNAVAILABLE: i32 = 4;
}

/// Main error type for daybook operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Missing records (exit code 3)
    #[error("Task not found: {0}")]
    NotFound(String),

    // Store failures (exit code 4)
    #[error("Task store unavailable: {0}")]
    StoreUnavailable(String),

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
            Error::InvalidInput(_) | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            Error::NotFound(_) => exit_codes::NOT_FOUND,

            Error::StoreUnavailable(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_) => exit_codes::STORE_UNAVAILABLE,
        }
    }

    /// Stable machine-readable category
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::InvalidConfig(_) => "invalid_config",
            Error::NotFound(_) => "not_found",
            _ => "store_unavailable",
        }
    }

    /// Wrap a lower-level failure raised while talking to the collection.
    ///
    /// User-facing variants pass through untouched.
    pub fn into_store_error(self) -> Self {
        match self {
            Error::InvalidInput(_)
            | Error::InvalidConfig(_)
            | Error::NotFound(_)
            | Error::StoreUnavailable(_) => self,
            other => Error::StoreUnavailable(other.to_string()),
        }
    }
}

/// Result type alias for daybook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub kind: &'static str,
    pub code: i32,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            kind: err.kind(),
            code: err.exit_code(),
        }
    }
}

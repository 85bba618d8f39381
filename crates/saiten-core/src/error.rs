//! Error types and exit codes for saiten
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage or input error (bad flags, malformed schema, out-of-range score)
//! - 3: Data error (corrupt ledger, gradebook shape mismatch, missing files)

mod macros;

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// A single entry in an error chain.
#[derive(Debug, Clone)]
pub struct ErrorChainEntry {
    /// The error message
    pub message: String,
    /// Error type identifier
    pub error_type: String,
}

/// Exit codes for the saiten binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage or input error (2)
    Usage = 2,
    /// Data error - corrupt ledger, gradebook mismatch, missing files (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during grading operations
#[derive(Error, Debug)]
pub enum SaitenError {
    // Usage / input errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("malformed allocation schema at {path}: {reason}")]
    Schema { path: String, reason: String },

    #[error("score {value} for {key} is out of range (allowed: {allowed})")]
    OutOfRange {
        key: String,
        value: i64,
        allowed: String,
    },

    #[error("invalid input for {key}: {reason}")]
    InvalidInput { key: String, reason: String },

    // Data errors (exit code 3)
    #[error("corrupt grade ledger {path:?}: {reason}")]
    CorruptLedger { path: PathBuf, reason: String },

    #[error("gradebook {path:?} has no header row with a {header:?} column")]
    HeaderNotFound { path: PathBuf, header: String },

    #[error("student {student_id:?} not found in gradebook {path:?}")]
    StudentNotFound { path: PathBuf, student_id: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperation {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),

    /// Chained error carrying the errors that led to it
    #[error("{message}")]
    Chained {
        /// Error message
        message: String,
        /// Error type identifier of the root cause
        error_type: String,
        /// Chain of errors leading to this one (oldest first)
        chain: Arc<Vec<ErrorChainEntry>>,
    },
}

impl SaitenError {
    /// Create a schema error for the node at `path`
    pub fn schema(path: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        SaitenError::Schema {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an invalid input error for the criterion `key`
    pub fn invalid_input(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SaitenError::InvalidInput {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        SaitenError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        SaitenError::FailedOperation {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SaitenError::UsageError(_)
            | SaitenError::Schema { .. }
            | SaitenError::OutOfRange { .. }
            | SaitenError::InvalidInput { .. } => ExitCode::Usage,

            SaitenError::CorruptLedger { .. }
            | SaitenError::HeaderNotFound { .. }
            | SaitenError::StudentNotFound { .. }
            | SaitenError::NotFound { .. } => ExitCode::Data,

            SaitenError::Io(_)
            | SaitenError::Json(_)
            | SaitenError::Toml(_)
            | SaitenError::Csv(_)
            | SaitenError::FailedOperation { .. }
            | SaitenError::Other(_) => ExitCode::Failure,

            SaitenError::Chained { error_type, .. } => match error_type.as_str() {
                "usage_error" | "schema_error" | "out_of_range" | "invalid_input" => {
                    ExitCode::Usage
                }
                "corrupt_ledger" | "header_not_found" | "student_not_found" | "not_found" => {
                    ExitCode::Data
                }
                _ => ExitCode::Failure,
            },
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &str {
        match self {
            SaitenError::UsageError(_) => "usage_error",
            SaitenError::Schema { .. } => "schema_error",
            SaitenError::OutOfRange { .. } => "out_of_range",
            SaitenError::InvalidInput { .. } => "invalid_input",
            SaitenError::CorruptLedger { .. } => "corrupt_ledger",
            SaitenError::HeaderNotFound { .. } => "header_not_found",
            SaitenError::StudentNotFound { .. } => "student_not_found",
            SaitenError::NotFound { .. } => "not_found",
            SaitenError::Io(_) => "io_error",
            SaitenError::Json(_) => "json_error",
            SaitenError::Toml(_) => "toml_error",
            SaitenError::Csv(_) => "csv_error",
            SaitenError::FailedOperation { .. } => "failed_operation",
            SaitenError::Other(_) => "other",
            SaitenError::Chained { error_type, .. } => error_type,
        }
    }

    /// Wrap this error with a higher-level message.
    ///
    /// The error type (and therefore the exit code) of the root cause is kept.
    pub fn chain(self, message: impl Into<String>) -> Self {
        let error_type = self.error_type().to_string();

        let mut chain = match &self {
            SaitenError::Chained { chain, .. } => (**chain).clone(),
            _ => Vec::new(),
        };

        chain.push(ErrorChainEntry {
            message: self.to_string(),
            error_type: error_type.clone(),
        });

        SaitenError::Chained {
            message: message.into(),
            error_type,
            chain: Arc::new(chain),
        }
    }

    /// Get the error chain if this is a chained error
    pub fn error_chain(&self) -> Option<&[ErrorChainEntry]> {
        match self {
            SaitenError::Chained { chain, .. } => Some(chain.as_ref()),
            _ => None,
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        if let Some(chain) = self.error_chain() {
            error_obj["chain"] = chain
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "type": entry.error_type,
                        "message": entry.message,
                    })
                })
                .collect();
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for saiten operations
pub type Result<T> = std::result::Result<T, SaitenError>;

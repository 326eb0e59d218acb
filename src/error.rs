//! Error types for ferro-pgx
//!
//! The analysis core (parsing, profile building, drug evaluation) is total and
//! never returns these errors: missing or malformed genotype data travels
//! in-band as `Unknown`/`Indeterminate` values. `PgxError` covers the code
//! around the core: file IO, configuration, upload validation and JSON output.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Input validation errors (E1xxx)
    /// File name does not carry a VCF extension
    InvalidFileType = 1001,
    /// File exceeds the configured size limit
    FileTooLarge = 1002,
    /// File or input text is empty
    EmptyInput = 1003,
    /// No drugs were requested
    NoDrugsRequested = 1004,

    // Configuration errors (E8xxx)
    /// Invalid configuration value
    InvalidConfig = 8001,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON serialization error
    JsonError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidFileType => "invalid file type",
            ErrorCode::FileTooLarge => "file too large",
            ErrorCode::EmptyInput => "empty input",
            ErrorCode::NoDrugsRequested => "no drugs requested",
            ErrorCode::InvalidConfig => "invalid configuration",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON serialization error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-pgx operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PgxError {
    /// Uploaded file is not a VCF
    #[error("Invalid file type: {name} (expected a .vcf file)")]
    InvalidFileType { name: String },

    /// Uploaded file exceeds the size limit
    #[error("File is too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    /// Input file or text is empty
    #[error("Input is empty")]
    EmptyInput,

    /// Drug list is empty after normalization
    #[error("No drugs requested")]
    NoDrugsRequested,

    /// Configuration file error
    #[error("Config error: {msg}")]
    Config { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON serialization error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl PgxError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            PgxError::InvalidFileType { .. } => ErrorCode::InvalidFileType,
            PgxError::FileTooLarge { .. } => ErrorCode::FileTooLarge,
            PgxError::EmptyInput => ErrorCode::EmptyInput,
            PgxError::NoDrugsRequested => ErrorCode::NoDrugsRequested,
            PgxError::Config { .. } => ErrorCode::InvalidConfig,
            PgxError::Io { .. } => ErrorCode::IoError,
            PgxError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Format the error prefixed with its code, e.g. `[E1001] Invalid file type: ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for PgxError {
    fn from(err: std::io::Error) -> Self {
        PgxError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PgxError {
    fn from(err: serde_json::Error) -> Self {
        PgxError::Json {
            msg: err.to_string(),
        }
    }
}

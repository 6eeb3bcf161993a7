//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - the lookup resolved to at least one record
//! - `1`: General error - unspecified failure
//! - `2`: Blocking error - the corpus is inconsistent and lookups cannot be trusted
//! - `3-125`: Specific recoverable errors
//! - `126-255`: Reserved by shell

use crate::error::ApiRefError;

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// Critical error that should halt automation (code 2)
    BlockingError = 2,

    /// Query did not resolve to any public symbol (code 3)
    NotFound = 3,

    /// API JSON document or type information could not be parsed (code 4)
    ParseError = 4,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,

    /// Index could not be read (code 7)
    IndexCorrupted = 7,

    /// Query, framework or version rejected before lookup (code 8)
    InvalidInput = 8,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    /// Convert an `ApiRefError` to the appropriate exit code.
    ///
    /// Maps specific error types to semantic exit codes that scripts
    /// can use to determine appropriate recovery actions.
    pub fn from_error(error: &ApiRefError) -> Self {
        match error {
            ApiRefError::NotFound { .. } => ExitCode::NotFound,

            // Index points at a symbol its document lacks
            ApiRefError::IntegrityFault { .. } => ExitCode::BlockingError,
            ApiRefError::IndexLoad { .. } => ExitCode::IndexCorrupted,

            ApiRefError::DocumentLoad { .. }
            | ApiRefError::MalformedTypeInfo { .. }
            | ApiRefError::KindMismatch { .. } => ExitCode::ParseError,
            ApiRefError::IndexWrite { .. } => ExitCode::IoError,
            ApiRefError::Config { .. } => ExitCode::ConfigError,
            ApiRefError::InvalidInput { .. } => ExitCode::InvalidInput,

            ApiRefError::Serialize(_) => ExitCode::GeneralError,
        }
    }

    /// Check if this exit code indicates a blocking error.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, ExitCode::BlockingError)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }

    /// Get a human-readable description of the exit code.
    pub fn description(&self) -> &str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::BlockingError => "Blocking error - automation should halt",
            ExitCode::NotFound => "Not found",
            ExitCode::ParseError => "Parse error",
            ExitCode::IoError => "I/O error",
            ExitCode::ConfigError => "Configuration error",
            ExitCode::IndexCorrupted => "Index corrupted",
            ExitCode::InvalidInput => "Invalid input",
        }
    }
}

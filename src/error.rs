//! Error types for API reference resolution
//!
//! This module provides structured error types using thiserror. The variants
//! fall into three groups: not-found conditions that are forwarded to the
//! caller, integrity faults that indicate a broken corpus, and malformed
//! structural input coming from the type-info producer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for resolution operations
#[derive(Error, Debug)]
pub enum ApiRefError {
    /// Query, module or field could not be resolved through any fallback
    #[error("{message}")]
    NotFound { message: String },

    /// The index references a symbol that its document does not contain
    #[error("Failed to find indexed symbol '{symbol}' in API JSON file '{document}'")]
    IntegrityFault { symbol: String, document: String },

    /// A document referenced by the index could not be read or parsed
    #[error("Failed to read API JSON file at {path}: {reason}")]
    DocumentLoad { path: PathBuf, reason: String },

    #[error("Failed to read API reference index at {path}: {reason}")]
    IndexLoad { path: PathBuf, reason: String },

    #[error("Failed to write API reference index at {path}: {reason}")]
    IndexWrite { path: PathBuf, reason: String },

    /// Type-info tree without a usable module or with an unresolvable node
    #[error("Malformed type information: {reason}")]
    MalformedTypeInfo { reason: String },

    /// Relevant type-info node does not fit the kind of the resolved symbol
    #[error("Expected API reference to be {expected}, but got {actual}")]
    KindMismatch { expected: String, actual: String },

    #[error("{reason}")]
    InvalidInput { reason: String },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("Failed to serialize API record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ApiRefError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedTypeInfo {
            reason: reason.into(),
        }
    }

    pub fn kind_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::KindMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Only not-found conditions may be swallowed by a fallback step
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Errors that are meaningful to the client (as opposed to internal defects)
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidInput { .. })
    }

    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::IntegrityFault { .. } => "INDEX_INTEGRITY_FAULT",
            Self::DocumentLoad { .. } => "DOCUMENT_LOAD_ERROR",
            Self::IndexLoad { .. } => "INDEX_LOAD_ERROR",
            Self::IndexWrite { .. } => "INDEX_WRITE_ERROR",
            Self::MalformedTypeInfo { .. } => "MALFORMED_TYPE_INFO",
            Self::KindMismatch { .. } => "KIND_MISMATCH",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::Config { .. } => "CONFIG_ERROR",
            Self::Serialize(_) => "SERIALIZATION_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::NotFound { .. } => vec![
                "Check the spelling of the symbol, e.g. 'sap.m.Button' or 'sap/m/Button#text'",
                "Make sure the symbol is public API in the selected framework version",
            ],
            Self::IntegrityFault { .. } | Self::IndexLoad { .. } => vec![
                "The API reference index does not match its documents",
                "Run 'apiref index <corpus-dir> --force' to rebuild the index",
            ],
            Self::DocumentLoad { .. } => vec![
                "Check that the corpus directory is complete and readable",
                "Re-provision the corpus for this framework version",
            ],
            Self::IndexWrite { .. } => {
                vec!["Check disk space and permissions in the corpus directory"]
            }
            Self::MalformedTypeInfo { .. } | Self::KindMismatch { .. } => vec![
                "The type information does not describe a resolvable API position",
            ],
            Self::InvalidInput { .. } => vec![
                "Framework must be 'OpenUI5' or 'SAPUI5'",
                "Versions may only contain letters, digits, dots and dashes",
            ],
            Self::Config { .. } => {
                vec!["Run 'apiref init --force' to regenerate the settings file"]
            }
            Self::Serialize(_) => vec!["This is a bug, please report it together with the query"],
        }
    }
}

/// Result type alias for resolution operations
pub type ApiRefResult<T> = Result<T, ApiRefError>;

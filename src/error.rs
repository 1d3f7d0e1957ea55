//! Error types for compatibility checking

use thiserror::Error;

use crate::result::{CheckResult, ChronologyResult};

/// Result type for compatibility operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while preparing or running a compatibility check
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A required schema or schema history was not supplied
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Compatibility check failed: {0}")]
    Incompatible(#[from] SchemaCompatibilityError),

    /// Raised by a pairwise checker that could not compare two schemas
    #[error("Schema comparison failed: {0}")]
    Comparison(String),

    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error("Avro error: {0}")]
    Avro(#[from] apache_avro::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Semver error: {0}")]
    Semver(#[from] semver::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

impl SchemaError {
    pub(crate) fn missing_candidate() -> Self {
        SchemaError::InvalidArgument("Schema to be checked cannot be null.".to_string())
    }

    pub(crate) fn missing_existing() -> Self {
        SchemaError::InvalidArgument("Schema to compare against cannot be null.".to_string())
    }

    pub(crate) fn missing_history() -> Self {
        SchemaError::InvalidArgument("Schemas to compare against cannot be null.".to_string())
    }
}

/// Raised by `fail_if_incompatible`, carrying the complete failing result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaCompatibilityError {
    #[error("{}", .0.describe())]
    Pair(Box<CheckResult>),

    #[error("{}", .0.describe())]
    Chronology(Box<ChronologyResult>),
}

impl SchemaCompatibilityError {
    /// The pairwise result, when raised by a single check
    pub fn check_result(&self) -> Option<&CheckResult> {
        match self {
            SchemaCompatibilityError::Pair(result) => Some(result),
            SchemaCompatibilityError::Chronology(_) => None,
        }
    }

    /// The chronology result, when raised by a chronology check
    pub fn chronology_result(&self) -> Option<&ChronologyResult> {
        match self {
            SchemaCompatibilityError::Pair(_) => None,
            SchemaCompatibilityError::Chronology(result) => Some(result),
        }
    }
}

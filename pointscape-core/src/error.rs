//! Error types for pointscape

use thiserror::Error;

use crate::point::PointId;

/// Main error type for pointscape operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Data source failure: {0}")]
    Source(#[from] SourceError),

    #[error("Invalid session state: {0}")]
    InvalidState(String),
}

/// Why an incoming record was rejected.
///
/// Rejected records are dropped from the active set; ingestion carries on
/// with the remaining records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing field `{field}`")]
    Missing { field: &'static str },

    #[error("invalid `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("duplicate id {0}")]
    DuplicateId(PointId),
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field } => *field,
            ValidationError::InvalidValue { field, .. } => *field,
            ValidationError::DuplicateId(_) => "id",
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure of the external data source to deliver the initial point set
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode records: {0}")]
    Decode(String),
}

/// Result type alias for pointscape operations
pub type Result<T> = std::result::Result<T, Error>;

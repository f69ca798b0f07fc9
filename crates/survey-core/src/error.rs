//! Error types for survey-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("{field} is empty")]
    EmptyField { field: &'static str },

    #[error("failed to parse {field}: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Who caused a failure, used by transports to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The submitted data was rejected
    Client,
    /// The service could not produce a response for valid data
    Internal,
}

impl SubmissionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::EmptyField { .. } | Self::NotANumber { .. } => FailureKind::Client,
            Self::Serialization(_) => FailureKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, SubmissionError>;

//! Error types for survey-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use survey_core::{FailureKind, SubmissionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("Invalid form body: {message}")]
    InvalidForm { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Submission(e) => match e.kind() {
                FailureKind::Client => StatusCode::BAD_REQUEST,
                FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InvalidForm { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Submission(e) if e.kind() == FailureKind::Client => {
                tracing::warn!("Rejected submission: {}", e);
                e.to_string()
            }
            Self::Submission(e) => {
                tracing::error!("Error encoding JSON response: {}", e);
                "Failed to encode JSON response".to_string()
            }
            Self::InvalidForm { message, .. } => {
                tracing::warn!("Failed to decode form body: {}", message);
                message.clone()
            }
        };

        (status, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Bad request error (invalid input).
    BadRequest(String),
    /// Request body over the configured size limit.
    PayloadTooLarge(String),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    /// Body extraction failures answer with the same JSON error shape as
    /// every other rejection.
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}

/// Why a scoring round did not yield a usable label.
///
/// Every variant collapses into the same degraded outcome at the normalizer
/// boundary; the variant only shapes the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionFailure {
    /// The scoring endpoint could not be reached.
    Network(String),
    /// The endpoint answered with a non-2xx status.
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body text, empty when none was sent.
        body: String,
    },
    /// The body was not `{"prediction": "<label>"}`.
    MalformedResponse(String),
}

impl fmt::Display for PredictionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionFailure::Network(msg) => {
                write!(f, "Scoring service unreachable: {}", msg)
            }
            PredictionFailure::HttpStatus { status, body } if body.trim().is_empty() => {
                write!(f, "Scoring service returned status {}", status)
            }
            PredictionFailure::HttpStatus { status, body } => {
                write!(f, "Scoring service returned status {}: {}", status, body)
            }
            PredictionFailure::MalformedResponse(msg) => {
                write!(f, "Malformed scoring response: {}", msg)
            }
        }
    }
}

impl std::error::Error for PredictionFailure {}

impl From<reqwest::Error> for PredictionFailure {
    fn from(err: reqwest::Error) -> Self {
        PredictionFailure::Network(err.to_string())
    }
}

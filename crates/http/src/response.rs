//! Outcome → HTTP response conversion.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use verdict_core::{BuildError, Error, InternalServerError, Metadata, Outcome, VoidOutcome};

use crate::status::status_for;

/// JSON body sent for every failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub metadata: Option<Metadata>,
    /// When the failure was converted into a response.
    pub timestamp: DateTime<Utc>,
}

impl ErrorBody {
    pub fn new(error: &Error, timestamp: DateTime<Utc>) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.message().to_string(),
            details: error.details().map(str::to_string),
            metadata: error.metadata().cloned(),
            timestamp,
        }
    }
}

/// `200 OK` with the value as JSON, or the error response for a failure.
pub fn to_response<T: Serialize>(outcome: Outcome<T>) -> Response {
    to_response_with_status(outcome, StatusCode::OK)
}

/// Like [`to_response`] with a custom success status (e.g. `201 Created`).
pub fn to_response_with_status<T: Serialize>(
    outcome: Outcome<T>,
    success: StatusCode,
) -> Response {
    match outcome {
        Outcome::Success(value) => (success, Json(value)).into_response(),
        Outcome::Failure(error) => error_response(&error),
    }
}

/// `200 OK` with an empty body, or the error response for a failure.
pub fn to_empty_response(outcome: VoidOutcome) -> Response {
    match outcome {
        Outcome::Success(()) => StatusCode::OK.into_response(),
        Outcome::Failure(error) => error_response(&error),
    }
}

fn error_response(error: &Error) -> Response {
    let status = status_for(error.kind());
    let code = error.code();
    let kind = error.kind();
    if status.is_server_error() {
        tracing::warn!(%code, status = status.as_u16(), %kind, "request failed");
    } else {
        tracing::debug!(%code, status = status.as_u16(), %kind, "request rejected");
    }
    (status, Json(ErrorBody::new(error, Utc::now()))).into_response()
}

/// Handler return type: `ApiOutcome(outcome)` converts via [`to_response`].
#[derive(Debug)]
pub struct ApiOutcome<T>(pub Outcome<T>);

impl<T> From<Outcome<T>> for ApiOutcome<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self(outcome)
    }
}

impl<T: Serialize> IntoResponse for ApiOutcome<T> {
    fn into_response(self) -> Response {
        to_response(self.0)
    }
}

/// A bare error as a response, for handlers returning `Result<_, ErrorResponse>`.
#[derive(Debug)]
pub struct ErrorResponse(pub Error);

impl From<Error> for ErrorResponse {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

/// A rejected error construction inside a handler is a server-side bug.
impl From<BuildError> for ErrorResponse {
    fn from(error: BuildError) -> Self {
        Self(InternalServerError::from_exception(error))
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        error_response(&self.0)
    }
}

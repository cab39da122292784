use axum::http::StatusCode;
use verdict_core::ErrorKind;

/// HTTP status for a failure of the given kind.
///
/// Application-defined (`Custom`) errors are treated as client errors.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Custom => StatusCode::BAD_REQUEST,
    }
}

//! `verdict-http` — collapses outcomes into axum responses.
//!
//! Success becomes a `200 OK` JSON body carrying the value. Failure becomes a
//! JSON error body (`code`, `message`, `details`, `metadata`, `timestamp`)
//! with a status derived from the error's kind:
//!
//! | kind | status |
//! |---|---|
//! | `BadRequest` | 400 |
//! | `Unauthorized` | 401 |
//! | `Forbidden` | 403 |
//! | `NotFound` | 404 |
//! | `Conflict` | 409 |
//! | `Validation` | 422 |
//! | `TooManyRequests` | 429 |
//! | `InternalServer` | 500 |
//! | `Custom` | 400 |

pub mod response;
pub mod status;

pub use response::{
    ApiOutcome, ErrorBody, ErrorResponse, to_empty_response, to_response, to_response_with_status,
};
pub use status::status_for;

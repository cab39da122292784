//! `verdict-core` — success-or-error outcomes and a structured error taxonomy.
//!
//! This crate contains **pure** building blocks (no transport or validation
//! library concerns). Boundary adapters live in `verdict-http` and
//! `verdict-validation`.

pub mod builder;
pub mod codes;
pub mod error;
pub mod future;
pub mod kinds;
pub mod outcome;
pub mod predefined;

pub use builder::ErrorBuilder;
pub use error::{BuildError, Cause, Error, ErrorKind, Metadata};
pub use future::OutcomeFutureExt;
pub use kinds::{
    BadRequestError, ConflictError, ForbiddenError, InternalServerError, NotFoundError,
    TooManyRequestsError, UnauthorizedError, ValidationError,
};
pub use outcome::{Outcome, VoidOutcome};

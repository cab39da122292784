//! `verdict-validation` — turns rule-based validation results into outcomes.
//!
//! The bridge consumes anything implementing [`ValidationReport`]: a validity
//! flag plus an ordered list of `(property path, message)` pairs. Reports from
//! the `validator` crate are supported out of the box; other validators can be
//! adapted through [`ValidationOutcome`].

pub mod bridge;
pub mod report;

pub use bridge::{ValidateExt, to_outcome};
pub use report::{FieldFailure, ValidationOutcome, ValidationReport};

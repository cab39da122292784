//! Conversion of validation reports into outcomes.

use validator::Validate;
use verdict_core::{Outcome, ValidationError};

use crate::report::ValidationReport;

/// `Success(value)` when the report is valid; otherwise a validation failure
/// with the standard message, per-field messages grouped in `details` (JSON)
/// and under the `errors` metadata key.
pub fn to_outcome<T, R>(report: &R, value: T) -> Outcome<T>
where
    R: ValidationReport + ?Sized,
{
    if report.is_valid() {
        return Outcome::success(value);
    }

    let failures = report.failures();
    tracing::debug!(failures = failures.len(), "validation failed");
    Outcome::failure(ValidationError::from_failures(
        failures.into_iter().map(|f| (f.property_path, f.message)),
    ))
}

/// Validate with `validator` and convert in one step.
pub trait ValidateExt: Validate + Sized {
    fn validated(self) -> Outcome<Self> {
        let report = self.validate();
        to_outcome(&report, self)
    }
}

impl<T: Validate> ValidateExt for T {}

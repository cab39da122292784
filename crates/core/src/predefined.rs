//! Ready-made errors for the most common failures.

use crate::error::Error;
use crate::kinds::{
    BadRequestError, ForbiddenError, InternalServerError, NotFoundError, TooManyRequestsError,
    UnauthorizedError, ValidationError,
};

pub fn invalid_input() -> Error {
    BadRequestError::with_defaults(None, None, None)
}

pub fn authentication_required() -> Error {
    UnauthorizedError::with_defaults(None, None, None)
}

pub fn access_denied() -> Error {
    ForbiddenError::with_defaults(None, None, None)
}

pub fn resource_not_found(resource_name: &str) -> Error {
    NotFoundError::with_message(format!("{resource_name} was not found"))
}

pub fn validation_failed() -> Error {
    ValidationError::with_defaults(None, None, None)
}

pub fn unexpected() -> Error {
    InternalServerError::with_defaults(None, None, None)
}

pub fn not_implemented(feature: &str) -> Error {
    InternalServerError::with_message(format!("{feature} is not implemented"))
}

pub fn rate_limited() -> Error {
    TooManyRequestsError::with_defaults(None, None, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;
    use crate::error::ErrorKind;

    #[test]
    fn predefined_errors_carry_expected_kinds() {
        assert_eq!(invalid_input().kind(), ErrorKind::BadRequest);
        assert_eq!(authentication_required().kind(), ErrorKind::Unauthorized);
        assert_eq!(access_denied().kind(), ErrorKind::Forbidden);
        assert_eq!(validation_failed().kind(), ErrorKind::Validation);
        assert_eq!(unexpected().kind(), ErrorKind::InternalServer);
        assert_eq!(rate_limited().code(), codes::TOO_MANY_REQUESTS);
    }

    #[test]
    fn resource_not_found_names_the_resource() {
        let err = resource_not_found("Invoice");
        assert_eq!(err.code(), codes::NOT_FOUND);
        assert_eq!(err.message(), "Invoice was not found");
    }
}

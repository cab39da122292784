//! Factories for each built-in [`ErrorKind`].
//!
//! Each kind gets a zero-sized namespace type (`NotFoundError`, `ConflictError`, ...)
//! whose associated functions produce a plain [`Error`] tagged with that kind.
//! All factories are total: formatting a message never fails.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::codes;
use crate::error::{CapturedCause, Error, ErrorKind, Metadata, display_value, keys};

/// Defines a namespace type plus the factories every kind shares.
macro_rules! error_kind_namespace {
    ($(#[$doc:meta])* $t:ident, $kind:expr) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        pub struct $t;

        impl $t {
            pub const KIND: ErrorKind = $kind;

            /// Error with this kind's standard code. A missing message falls back
            /// to the kind's standard message.
            pub fn with_defaults(
                message: Option<&str>,
                details: Option<&str>,
                metadata: Option<Metadata>,
            ) -> Error {
                Error::standard(
                    Self::KIND,
                    Self::KIND.default_code(),
                    message.map(str::to_string),
                    details.map(str::to_string),
                    metadata,
                )
            }

            /// Error with this kind's standard code and the given message.
            pub fn with_message(message: impl Into<String>) -> Error {
                Error::standard(
                    Self::KIND,
                    Self::KIND.default_code(),
                    Some(message.into()),
                    None,
                    None,
                )
            }

            /// Wrap an underlying failure. Its type name and message are copied
            /// into metadata for diagnostics.
            ///
            /// The type name is the static type of `err`: `anyhow::Error` and
            /// `Box<dyn Error>` are recorded as such, not as the wrapped error.
            pub fn with_exception<E>(
                err: E,
                message: Option<&str>,
                details: Option<&str>,
            ) -> Error
            where
                E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
            {
                with_cause(
                    Self::KIND,
                    Self::KIND.default_code(),
                    CapturedCause::capture(err),
                    message.map(str::to_string),
                    details.map(str::to_string),
                )
            }
        }
    };
}

error_kind_namespace!(
    /// Factories for [`ErrorKind::BadRequest`].
    BadRequestError,
    ErrorKind::BadRequest
);
error_kind_namespace!(
    /// Factories for [`ErrorKind::Unauthorized`].
    UnauthorizedError,
    ErrorKind::Unauthorized
);
error_kind_namespace!(
    /// Factories for [`ErrorKind::Forbidden`].
    ForbiddenError,
    ErrorKind::Forbidden
);
error_kind_namespace!(
    /// Factories for [`ErrorKind::NotFound`].
    NotFoundError,
    ErrorKind::NotFound
);
error_kind_namespace!(
    /// Factories for [`ErrorKind::Conflict`].
    ConflictError,
    ErrorKind::Conflict
);
error_kind_namespace!(
    /// Factories for [`ErrorKind::Validation`].
    ValidationError,
    ErrorKind::Validation
);
error_kind_namespace!(
    /// Factories for [`ErrorKind::InternalServer`].
    InternalServerError,
    ErrorKind::InternalServer
);
error_kind_namespace!(
    /// Factories for [`ErrorKind::TooManyRequests`].
    TooManyRequestsError,
    ErrorKind::TooManyRequests
);

fn metadata<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Metadata {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn semantic(kind: ErrorKind, code: &str, message: String, metadata: Metadata) -> Error {
    Error::standard(kind, code, Some(message), None, Some(metadata))
}

fn with_cause(
    kind: ErrorKind,
    code: &str,
    captured: CapturedCause,
    message: Option<String>,
    details: Option<String>,
) -> Error {
    let mut meta = Metadata::new();
    captured.mirror_into(&mut meta);
    Error::standard(kind, code, message, details, Some(meta)).with_cause(captured.cause)
}

impl BadRequestError {
    pub fn invalid_parameter(name: &str, reason: &str) -> Error {
        semantic(
            Self::KIND,
            codes::INVALID_PARAMETER,
            format!("Parameter '{name}' is invalid: {reason}"),
            metadata([
                (keys::PARAMETER_NAME, Value::from(name)),
                (keys::REASON, Value::from(reason)),
            ]),
        )
    }

    pub fn missing_parameter(name: &str) -> Error {
        semantic(
            Self::KIND,
            codes::MISSING_PARAMETER,
            format!("Required parameter '{name}' is missing"),
            metadata([(keys::PARAMETER_NAME, Value::from(name))]),
        )
    }

    pub fn invalid_format(name: &str, expected_format: &str) -> Error {
        semantic(
            Self::KIND,
            codes::INVALID_FORMAT,
            format!("Parameter '{name}' has an invalid format; expected {expected_format}"),
            metadata([
                (keys::PARAMETER_NAME, Value::from(name)),
                (keys::EXPECTED_FORMAT, Value::from(expected_format)),
            ]),
        )
    }
}

impl UnauthorizedError {
    pub fn invalid_credentials() -> Error {
        Error::standard(
            Self::KIND,
            codes::INVALID_CREDENTIALS,
            Some("The supplied credentials are invalid".to_string()),
            None,
            None,
        )
    }

    pub fn missing_token() -> Error {
        Error::standard(
            Self::KIND,
            codes::MISSING_TOKEN,
            Some("An authentication token is required".to_string()),
            None,
            None,
        )
    }

    /// `expired_at` is recorded verbatim (callers usually pass an RFC 3339 string).
    pub fn token_expired(expired_at: Option<&str>) -> Error {
        let meta = expired_at.map(|at| metadata([(keys::EXPIRED_AT, Value::from(at))]));
        Error::standard(
            Self::KIND,
            codes::TOKEN_EXPIRED,
            Some("The authentication token has expired".to_string()),
            None,
            meta,
        )
    }
}

impl ForbiddenError {
    pub fn for_missing_role(role: &str, user_role: Option<&str>) -> Error {
        let mut meta = metadata([(keys::REQUIRED_ROLE, Value::from(role))]);
        let message = match user_role {
            Some(current) => {
                meta.insert(keys::USER_ROLE.to_string(), Value::from(current));
                format!("This action requires the '{role}' role; current role is '{current}'")
            }
            None => format!("This action requires the '{role}' role"),
        };
        semantic(Self::KIND, codes::MISSING_ROLE, message, meta)
    }

    pub fn for_missing_permission(permission: &str) -> Error {
        semantic(
            Self::KIND,
            codes::MISSING_PERMISSION,
            format!("This action requires the '{permission}' permission"),
            metadata([(keys::REQUIRED_PERMISSION, Value::from(permission))]),
        )
    }

    pub fn for_resource(resource_name: &str, action: &str) -> Error {
        semantic(
            Self::KIND,
            codes::RESOURCE_ACCESS_DENIED,
            format!("Not allowed to {action} {resource_name}"),
            metadata([
                (keys::RESOURCE_NAME, Value::from(resource_name)),
                (keys::ACTION, Value::from(action)),
            ]),
        )
    }
}

impl NotFoundError {
    /// Lookup of a single resource by its identifier failed.
    ///
    /// The identifier keeps its JSON type in metadata (`999` stays a number).
    pub fn by_identifier(resource_name: &str, identifier: impl Into<Value>) -> Error {
        let identifier = identifier.into();
        semantic(
            Self::KIND,
            codes::RESOURCE_NOT_FOUND,
            format!(
                "{resource_name} with identifier '{}' was not found",
                display_value(&identifier)
            ),
            metadata([
                (keys::RESOURCE_NAME, Value::from(resource_name)),
                (keys::IDENTIFIER, identifier),
            ]),
        )
    }

    pub fn by_criteria(resource_name: &str, criteria: Metadata) -> Error {
        let criteria = Value::Object(criteria.into_iter().collect());
        semantic(
            Self::KIND,
            codes::RESOURCE_NOT_FOUND_BY_CRITERIA,
            format!("No {resource_name} matches the given criteria"),
            metadata([
                (keys::RESOURCE_NAME, Value::from(resource_name)),
                (keys::CRITERIA, criteria),
            ]),
        )
    }
}

impl ConflictError {
    pub fn for_duplicate_resource(
        resource_name: &str,
        conflicting_value: impl Into<Value>,
    ) -> Error {
        let conflicting_value = conflicting_value.into();
        semantic(
            Self::KIND,
            codes::DUPLICATE_RESOURCE,
            format!(
                "{resource_name} '{}' already exists",
                display_value(&conflicting_value)
            ),
            metadata([
                (keys::RESOURCE_NAME, Value::from(resource_name)),
                (keys::CONFLICTING_VALUE, conflicting_value),
            ]),
        )
    }

    /// Optimistic concurrency check failed.
    pub fn for_version_mismatch(resource_name: &str, expected: u64, actual: u64) -> Error {
        semantic(
            Self::KIND,
            codes::CONCURRENCY_CONFLICT,
            format!(
                "{resource_name} was modified concurrently \
                 (expected version {expected}, actual {actual})"
            ),
            metadata([
                (keys::RESOURCE_NAME, Value::from(resource_name)),
                (keys::EXPECTED_VERSION, Value::from(expected)),
                (keys::ACTUAL_VERSION, Value::from(actual)),
            ]),
        )
    }

    pub fn for_state_transition(
        resource_name: &str,
        current_state: &str,
        attempted_action: &str,
    ) -> Error {
        semantic(
            Self::KIND,
            codes::INVALID_STATE_TRANSITION,
            format!("Cannot {attempted_action} {resource_name} while it is {current_state}"),
            metadata([
                (keys::RESOURCE_NAME, Value::from(resource_name)),
                (keys::CURRENT_STATE, Value::from(current_state)),
                (keys::ATTEMPTED_ACTION, Value::from(attempted_action)),
            ]),
        )
    }
}

impl ValidationError {
    /// Group `(field, message)` pairs by field and build a validation error.
    ///
    /// Messages keep their relative order within a field.
    pub fn from_failures<F, M>(failures: impl IntoIterator<Item = (F, M)>) -> Error
    where
        F: Into<String>,
        M: Into<String>,
    {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (field, message) in failures {
            grouped.entry(field.into()).or_default().push(message.into());
        }
        Self::for_fields(grouped)
    }

    /// `details` carries the grouped messages serialized as JSON, and the
    /// same mapping is stored under the `errors` metadata key.
    pub fn for_fields(grouped: BTreeMap<String, Vec<String>>) -> Error {
        let errors = grouped_to_value(grouped);
        let details = errors.to_string();
        Error::standard(
            Self::KIND,
            codes::VALIDATION_FAILED,
            None,
            Some(details),
            Some(metadata([(keys::ERRORS, errors)])),
        )
    }

    pub fn for_field(field: &str, message: &str) -> Error {
        let mut grouped = BTreeMap::new();
        grouped.insert(field.to_string(), vec![message.to_string()]);
        semantic(
            Self::KIND,
            codes::FIELD_VALIDATION_FAILED,
            format!("Validation failed for '{field}': {message}"),
            metadata([
                (keys::FIELD, Value::from(field)),
                (keys::ERRORS, grouped_to_value(grouped)),
            ]),
        )
    }

    /// Read back the per-field messages stored under `errors`, if any.
    pub fn field_errors(error: &Error) -> Option<BTreeMap<String, Vec<String>>> {
        let Value::Object(map) = error.metadata_value(keys::ERRORS)? else {
            return None;
        };
        let grouped = map
            .iter()
            .map(|(field, messages)| {
                let messages = messages
                    .as_array()
                    .map(|items| items.iter().map(display_value).collect())
                    .unwrap_or_default();
                (field.clone(), messages)
            })
            .collect();
        Some(grouped)
    }
}

fn grouped_to_value(grouped: BTreeMap<String, Vec<String>>) -> Value {
    Value::Object(
        grouped
            .into_iter()
            .map(|(field, messages)| (field, Value::from(messages)))
            .collect(),
    )
}

impl InternalServerError {
    /// Convert an unexpected failure into an internal error.
    ///
    /// The public message stays generic; the underlying message goes to
    /// `details` and metadata. The recorded `exceptionType` is the static type
    /// of `err`, so errors passed through `anyhow` show up as `anyhow::Error`.
    pub fn from_exception<E>(err: E) -> Error
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        let captured = CapturedCause::capture(err);
        let details = captured.message.clone();
        with_cause(
            Self::KIND,
            codes::UNHANDLED_EXCEPTION,
            captured,
            None,
            Some(details),
        )
    }

    pub fn for_dependency(dependency: &str, reason: Option<&str>) -> Error {
        let mut meta = metadata([(keys::DEPENDENCY, Value::from(dependency))]);
        let message = match reason {
            Some(reason) => {
                meta.insert(keys::REASON.to_string(), Value::from(reason));
                format!("Dependency '{dependency}' failed: {reason}")
            }
            None => format!("Dependency '{dependency}' failed"),
        };
        semantic(Self::KIND, codes::DEPENDENCY_FAILURE, message, meta)
    }
}

impl TooManyRequestsError {
    pub fn with_retry_after(seconds: u64) -> Error {
        semantic(
            Self::KIND,
            codes::RATE_LIMIT_EXCEEDED,
            format!("Rate limit exceeded; retry after {seconds} seconds"),
            metadata([(keys::RETRY_AFTER_SECONDS, Value::from(seconds))]),
        )
    }

    pub fn for_quota(limit: u64, window_seconds: u64) -> Error {
        semantic(
            Self::KIND,
            codes::QUOTA_EXCEEDED,
            format!("Quota of {limit} requests per {window_seconds} seconds exceeded"),
            metadata([
                (keys::LIMIT, Value::from(limit)),
                (keys::WINDOW_SECONDS, Value::from(window_seconds)),
            ]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_defaults_uses_standard_code_and_message() {
        let err = NotFoundError::with_defaults(None, None, None);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.code(), codes::NOT_FOUND);
        assert_eq!(err.message(), ErrorKind::NotFound.default_message());
    }

    #[test]
    fn with_defaults_keeps_supplied_fields() {
        let mut meta = Metadata::new();
        meta.insert("attempt".into(), json!(3));
        let err = TooManyRequestsError::with_defaults(Some("slow down"), Some("burst"), Some(meta));
        assert_eq!(err.code(), codes::TOO_MANY_REQUESTS);
        assert_eq!(err.message(), "slow down");
        assert_eq!(err.details(), Some("burst"));
        assert_eq!(err.metadata_value("attempt"), Some(&json!(3)));
    }

    #[test]
    fn blank_message_falls_back_to_default() {
        let err = ConflictError::with_defaults(Some("  "), None, None);
        assert_eq!(err.message(), ErrorKind::Conflict.default_message());
    }

    #[test]
    fn by_identifier_keeps_numeric_identifier() {
        let err = NotFoundError::by_identifier("User", 999);
        assert_eq!(err.code(), codes::RESOURCE_NOT_FOUND);
        assert_eq!(err.message(), "User with identifier '999' was not found");
        assert_eq!(err.metadata_value(keys::IDENTIFIER), Some(&json!(999)));
        assert_eq!(err.metadata_value(keys::RESOURCE_NAME), Some(&json!("User")));
    }

    #[test]
    fn by_identifier_formats_string_identifier_without_quotes() {
        let err = NotFoundError::by_identifier("Order", "A-17");
        assert_eq!(err.message(), "Order with identifier 'A-17' was not found");
    }

    #[test]
    fn duplicate_resource_populates_metadata() {
        let err = ConflictError::for_duplicate_resource("Email", "a@b.c");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.code(), codes::DUPLICATE_RESOURCE);
        assert_eq!(err.metadata_value(keys::RESOURCE_NAME), Some(&json!("Email")));
        assert_eq!(err.metadata_value(keys::CONFLICTING_VALUE), Some(&json!("a@b.c")));
    }

    #[test]
    fn missing_role_mentions_current_role_when_known() {
        let err = ForbiddenError::for_missing_role("admin", Some("viewer"));
        assert!(err.message().contains("'admin'"));
        assert!(err.message().contains("'viewer'"));
        assert_eq!(err.metadata_value(keys::USER_ROLE), Some(&json!("viewer")));

        let err = ForbiddenError::for_missing_role("admin", None);
        assert!(err.metadata_value(keys::USER_ROLE).is_none());
    }

    #[test]
    fn with_exception_mirrors_cause() {
        let err = BadRequestError::with_exception(
            std::io::Error::other("bad bytes"),
            Some("could not read body"),
            None,
        );
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.message(), "could not read body");
        assert_eq!(err.metadata_value(keys::EXCEPTION_MESSAGE), Some(&json!("bad bytes")));
        assert!(err.metadata_value(keys::EXCEPTION_TYPE).is_some());
        assert_eq!(err.cause().unwrap().to_string(), "bad bytes");
    }

    #[test]
    fn from_exception_accepts_anyhow_errors() {
        let err = InternalServerError::from_exception(anyhow::anyhow!("db exploded"));
        assert_eq!(err.kind(), ErrorKind::InternalServer);
        assert_eq!(err.code(), codes::UNHANDLED_EXCEPTION);
        assert_eq!(err.details(), Some("db exploded"));
        assert_eq!(err.message(), ErrorKind::InternalServer.default_message());
    }

    #[test]
    fn validation_groups_messages_by_field() {
        let err = ValidationError::from_failures([
            ("Name", "required"),
            ("Name", "too short"),
            ("Email", "invalid"),
        ]);
        assert_eq!(err.code(), codes::VALIDATION_FAILED);
        assert_eq!(err.message(), "Validation failed");
        assert_eq!(
            err.metadata_value(keys::ERRORS),
            Some(&json!({ "Name": ["required", "too short"], "Email": ["invalid"] }))
        );

        let details: Value = serde_json::from_str(err.details().unwrap()).unwrap();
        assert_eq!(details, json!({ "Name": ["required", "too short"], "Email": ["invalid"] }));

        let grouped = ValidationError::field_errors(&err).unwrap();
        assert_eq!(grouped["Name"], vec!["required", "too short"]);
    }

    #[test]
    fn version_mismatch_records_both_versions() {
        let err = ConflictError::for_version_mismatch("Invoice", 3, 5);
        assert_eq!(err.metadata_value(keys::EXPECTED_VERSION), Some(&json!(3)));
        assert_eq!(err.metadata_value(keys::ACTUAL_VERSION), Some(&json!(5)));
    }

    #[test]
    fn semantic_factories_set_code_kind_and_metadata_keys() {
        let mut criteria = Metadata::new();
        criteria.insert("email".into(), json!("a@b.c"));

        let cases: Vec<(Error, ErrorKind, &str, Vec<&str>)> = vec![
            (
                BadRequestError::invalid_format("date", "YYYY-MM-DD"),
                ErrorKind::BadRequest,
                codes::INVALID_FORMAT,
                vec![keys::PARAMETER_NAME, keys::EXPECTED_FORMAT],
            ),
            (
                UnauthorizedError::token_expired(Some("2024-01-01T00:00:00Z")),
                ErrorKind::Unauthorized,
                codes::TOKEN_EXPIRED,
                vec![keys::EXPIRED_AT],
            ),
            (
                ForbiddenError::for_missing_permission("invoices:write"),
                ErrorKind::Forbidden,
                codes::MISSING_PERMISSION,
                vec![keys::REQUIRED_PERMISSION],
            ),
            (
                ForbiddenError::for_resource("Invoice", "delete"),
                ErrorKind::Forbidden,
                codes::RESOURCE_ACCESS_DENIED,
                vec![keys::RESOURCE_NAME, keys::ACTION],
            ),
            (
                NotFoundError::by_criteria("User", criteria),
                ErrorKind::NotFound,
                codes::RESOURCE_NOT_FOUND_BY_CRITERIA,
                vec![keys::RESOURCE_NAME, keys::CRITERIA],
            ),
            (
                ConflictError::for_state_transition("Order", "shipped", "cancel"),
                ErrorKind::Conflict,
                codes::INVALID_STATE_TRANSITION,
                vec![keys::RESOURCE_NAME, keys::CURRENT_STATE, keys::ATTEMPTED_ACTION],
            ),
            (
                ValidationError::for_field("email", "invalid"),
                ErrorKind::Validation,
                codes::FIELD_VALIDATION_FAILED,
                vec![keys::FIELD, keys::ERRORS],
            ),
            (
                InternalServerError::for_dependency("billing", Some("timeout")),
                ErrorKind::InternalServer,
                codes::DEPENDENCY_FAILURE,
                vec![keys::DEPENDENCY, keys::REASON],
            ),
            (
                TooManyRequestsError::for_quota(100, 60),
                ErrorKind::TooManyRequests,
                codes::QUOTA_EXCEEDED,
                vec![keys::LIMIT, keys::WINDOW_SECONDS],
            ),
        ];

        for (err, kind, code, expected_keys) in cases {
            assert_eq!(err.kind(), kind, "{code}");
            assert_eq!(err.code(), code);
            assert!(!err.message().trim().is_empty(), "{code}");
            let actual: Vec<&str> = err.metadata().unwrap().keys().map(String::as_str).collect();
            let mut expected = expected_keys;
            expected.sort_unstable();
            assert_eq!(actual, expected, "{code}");
        }
    }

    #[test]
    fn optional_factory_arguments_are_omitted_from_metadata() {
        assert!(UnauthorizedError::token_expired(None).metadata().is_none());

        let err = InternalServerError::for_dependency("billing", None);
        assert_eq!(err.message(), "Dependency 'billing' failed");
        assert!(err.metadata_value(keys::REASON).is_none());
    }

    #[test]
    fn field_error_is_readable_as_grouped_errors() {
        let err = ValidationError::for_field("email", "invalid");
        assert_eq!(err.message(), "Validation failed for 'email': invalid");
        let grouped = ValidationError::field_errors(&err).unwrap();
        assert_eq!(grouped["email"], vec!["invalid"]);
    }

    #[test]
    fn by_criteria_nests_criteria_object() {
        let mut criteria = Metadata::new();
        criteria.insert("status".into(), json!("open"));
        let err = NotFoundError::by_criteria("Ticket", criteria);
        assert_eq!(err.metadata_value(keys::CRITERIA), Some(&json!({ "status": "open" })));
    }

    #[test]
    fn retry_after_is_numeric() {
        let err = TooManyRequestsError::with_retry_after(30);
        assert_eq!(err.metadata_value(keys::RETRY_AFTER_SECONDS), Some(&json!(30)));
    }
}

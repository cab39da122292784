//! Error model carried by every failed outcome.

use std::any::type_name;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::ErrorBuilder;

/// Free-form diagnostic data attached to an [`Error`].
pub type Metadata = BTreeMap<String, Value>;

/// Underlying failure wrapped by an [`Error`].
///
/// Shared rather than boxed so that `Error` stays cheap to clone.
pub type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Well-known metadata keys written by the built-in factories.
pub mod keys {
    pub const EXCEPTION_TYPE: &str = "exceptionType";
    pub const EXCEPTION_MESSAGE: &str = "exceptionMessage";
    pub const RESOURCE_NAME: &str = "resourceName";
    pub const IDENTIFIER: &str = "identifier";
    pub const CRITERIA: &str = "criteria";
    pub const CONFLICTING_VALUE: &str = "conflictingValue";
    pub const EXPECTED_VERSION: &str = "expectedVersion";
    pub const ACTUAL_VERSION: &str = "actualVersion";
    pub const CURRENT_STATE: &str = "currentState";
    pub const ATTEMPTED_ACTION: &str = "attemptedAction";
    pub const PARAMETER_NAME: &str = "parameterName";
    pub const REASON: &str = "reason";
    pub const EXPECTED_FORMAT: &str = "expectedFormat";
    pub const REQUIRED_ROLE: &str = "requiredRole";
    pub const USER_ROLE: &str = "userRole";
    pub const REQUIRED_PERMISSION: &str = "requiredPermission";
    pub const ACTION: &str = "action";
    pub const EXPIRED_AT: &str = "expiredAt";
    pub const ERRORS: &str = "errors";
    pub const FIELD: &str = "field";
    pub const DEPENDENCY: &str = "dependency";
    pub const RETRY_AFTER_SECONDS: &str = "retryAfterSeconds";
    pub const LIMIT: &str = "limit";
    pub const WINDOW_SECONDS: &str = "windowSeconds";
}

/// What kind of failure an [`Error`] describes.
///
/// The kind is a dispatch tag only: every kind carries the same fields.
/// Boundaries (HTTP, UI) match on it instead of parsing codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Validation,
    InternalServer,
    TooManyRequests,
    /// An application-defined error with no dedicated kind.
    Custom,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 9] = [
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::Validation,
        ErrorKind::InternalServer,
        ErrorKind::TooManyRequests,
        ErrorKind::Custom,
    ];

    /// Standard code used by `with_defaults` for this kind.
    pub fn default_code(self) -> &'static str {
        use crate::codes;
        match self {
            ErrorKind::BadRequest => codes::BAD_REQUEST,
            ErrorKind::Unauthorized => codes::UNAUTHORIZED,
            ErrorKind::Forbidden => codes::FORBIDDEN,
            ErrorKind::NotFound => codes::NOT_FOUND,
            ErrorKind::Conflict => codes::CONFLICT,
            ErrorKind::Validation => codes::VALIDATION_FAILED,
            ErrorKind::InternalServer => codes::INTERNAL_SERVER_ERROR,
            ErrorKind::TooManyRequests => codes::TOO_MANY_REQUESTS,
            ErrorKind::Custom => codes::UNKNOWN,
        }
    }

    /// Standard human-readable message for this kind.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "The request is invalid",
            ErrorKind::Unauthorized => "Authentication is required",
            ErrorKind::Forbidden => "Access to this resource is forbidden",
            ErrorKind::NotFound => "The requested resource was not found",
            ErrorKind::Conflict => "The request conflicts with the current state of the resource",
            ErrorKind::Validation => "Validation failed",
            ErrorKind::InternalServer => "An unexpected error occurred",
            ErrorKind::TooManyRequests => "Too many requests",
            ErrorKind::Custom => "An error occurred",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Validation => "validation",
            ErrorKind::InternalServer => "internal_server",
            ErrorKind::TooManyRequests => "too_many_requests",
            ErrorKind::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Rejected attempt to construct an [`Error`].
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid error state: code must not be empty")]
    MissingCode,

    #[error("invalid error state: message must not be empty")]
    MissingMessage,
}

/// Structured, immutable description of a failure.
///
/// Equality is structural over `(code, message)`: two errors built separately
/// with the same pair compare equal regardless of kind, details or metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Error {
    #[serde(skip)]
    kind: ErrorKind,
    code: String,
    message: String,
    details: Option<String>,
    metadata: Option<Metadata>,
    #[serde(skip)]
    cause: Option<Cause>,
}

impl Error {
    /// Create an application-defined error ([`ErrorKind::Custom`]).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Result<Self, BuildError> {
        Self::of_kind(ErrorKind::Custom, code, message)
    }

    /// Create an error of the given kind with an explicit code.
    pub fn of_kind(
        kind: ErrorKind,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, BuildError> {
        let code = code.into();
        let message = message.into();
        ensure_present(&code, &message)?;
        Ok(Self::from_parts(kind, code, message, None, None, None))
    }

    /// Start a builder for a fully customised error.
    pub fn builder() -> ErrorBuilder {
        ErrorBuilder::new()
    }

    /// Builder pre-filled with this error's fields.
    pub fn to_builder(&self) -> ErrorBuilder {
        ErrorBuilder::from_error(self)
    }

    pub(crate) fn from_parts(
        kind: ErrorKind,
        code: String,
        message: String,
        details: Option<String>,
        metadata: Option<Metadata>,
        cause: Option<Cause>,
    ) -> Self {
        Self {
            kind,
            code,
            message,
            details,
            metadata,
            cause,
        }
    }

    /// Error with the kind's standard code; an absent or blank message falls
    /// back to the kind's standard message.
    pub(crate) fn standard(
        kind: ErrorKind,
        code: &str,
        message: Option<String>,
        details: Option<String>,
        metadata: Option<Metadata>,
    ) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| kind.default_message().to_string());
        Self::from_parts(kind, code.to_string(), message, details, metadata, None)
    }

    pub(crate) fn shared_cause(&self) -> Option<Cause> {
        self.cause.clone()
    }

    pub(crate) fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Look up a single metadata entry.
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.message == other.message
    }
}

impl Eq for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}

pub(crate) fn ensure_present(code: &str, message: &str) -> Result<(), BuildError> {
    if code.trim().is_empty() {
        return Err(BuildError::MissingCode);
    }
    if message.trim().is_empty() {
        return Err(BuildError::MissingMessage);
    }
    Ok(())
}

/// A captured underlying failure plus the diagnostics mirrored into metadata.
pub(crate) struct CapturedCause {
    pub cause: Cause,
    pub type_name: &'static str,
    pub message: String,
}

impl CapturedCause {
    /// The recorded type name is the static type of `err`. Wrappers are not
    /// looked through: an `anyhow::Error` records `anyhow::Error` and a boxed
    /// error records the `Box<dyn Error>` type.
    pub fn capture<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        let type_name = type_name::<E>();
        let boxed: Box<dyn std::error::Error + Send + Sync + 'static> = err.into();
        let message = boxed.to_string();
        Self {
            cause: Arc::from(boxed),
            type_name,
            message,
        }
    }

    /// Write `exceptionType` / `exceptionMessage` into `metadata`.
    pub fn mirror_into(&self, metadata: &mut Metadata) {
        metadata.insert(keys::EXCEPTION_TYPE.to_string(), Value::from(self.type_name));
        metadata.insert(
            keys::EXCEPTION_MESSAGE.to_string(),
            Value::from(self.message.clone()),
        );
    }
}

/// Render a metadata value for use inside a message (strings without quotes).
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! Fluent construction of [`Error`] values.

use serde_json::Value;

use crate::error::{BuildError, CapturedCause, Cause, Error, ErrorKind, Metadata, ensure_present};

/// Step-by-step [`Error`] construction.
///
/// A builder is consumed by `build`; it is not meant to be shared between
/// threads or reused. `build` is the only place that validates: code and
/// message must both be non-blank at that point.
///
/// ```ignore
/// let err = ErrorBuilder::new()
///     .with_kind(ErrorKind::Conflict)
///     .with_code("SEAT_TAKEN")
///     .with_message("Seat 14C is already booked")
///     .add_metadata("seat", "14C")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorBuilder {
    kind: Option<ErrorKind>,
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    metadata: Option<Metadata>,
    cause: Option<Cause>,
}

impl ErrorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_error(error: &Error) -> Self {
        Self {
            kind: Some(error.kind()),
            code: Some(error.code().to_string()),
            message: Some(error.message().to_string()),
            details: error.details().map(str::to_string),
            metadata: error.metadata().cloned(),
            cause: error.shared_cause(),
        }
    }

    /// Kind used by [`build`](Self::build); defaults to [`ErrorKind::Custom`].
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Replace all metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Insert or overwrite a single metadata entry.
    pub fn add_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value.into());
        self
    }

    /// Merge entries into the metadata; later keys overwrite earlier ones.
    pub fn add_metadata_range<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let metadata = self.metadata.get_or_insert_with(Metadata::new);
        for (key, value) in entries {
            metadata.insert(key.into(), value.into());
        }
        self
    }

    /// Set the underlying cause and mirror its type and message into metadata.
    ///
    /// The mirrored type is the static type of `err`, so an `anyhow::Error`
    /// is recorded as `anyhow::Error` rather than the error it wraps.
    pub fn with_exception<E>(mut self, err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        let captured = CapturedCause::capture(err);
        captured.mirror_into(self.metadata.get_or_insert_with(Metadata::new));
        self.cause = Some(captured.cause);
        self
    }

    pub fn clear_metadata(mut self) -> Self {
        self.metadata = None;
        self
    }

    /// Validate and produce an [`Error`].
    pub fn build(self) -> Result<Error, BuildError> {
        let kind = self.kind.unwrap_or(ErrorKind::Custom);
        self.build_with(|code, message, details, metadata, cause| {
            Error::from_parts(kind, code, message, details, metadata, cause)
        })
    }

    /// Validate, then hand the parts to `factory`.
    ///
    /// Lets callers produce their own error type from the same fields; the
    /// factory's signature is checked at compile time.
    pub fn build_with<T, F>(self, factory: F) -> Result<T, BuildError>
    where
        F: FnOnce(String, String, Option<String>, Option<Metadata>, Option<Cause>) -> T,
    {
        let code = self.code.unwrap_or_default();
        let message = self.message.unwrap_or_default();
        ensure_present(&code, &message)?;
        Ok(factory(code, message, self.details, self.metadata, self.cause))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_requires_code() {
        let err = ErrorBuilder::new().with_message("m").build().unwrap_err();
        assert_eq!(err, BuildError::MissingCode);
    }

    #[test]
    fn build_requires_message() {
        let err = ErrorBuilder::new().with_code("E").build().unwrap_err();
        assert_eq!(err, BuildError::MissingMessage);

        let err = ErrorBuilder::new()
            .with_code("E")
            .with_message("")
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::MissingMessage);
    }

    #[test]
    fn build_defaults_to_custom_kind() {
        let err = ErrorBuilder::new()
            .with_code("E")
            .with_message("m")
            .build()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::Custom);
    }

    #[test]
    fn metadata_operations_compose() {
        let mut initial = Metadata::new();
        initial.insert("a".into(), json!(1));

        let err = ErrorBuilder::new()
            .with_kind(ErrorKind::Conflict)
            .with_code("SEAT_TAKEN")
            .with_message("Seat 14C is already booked")
            .with_details("flight LH123")
            .with_metadata(initial)
            .add_metadata("a", 2)
            .add_metadata_range([("b", json!("x")), ("c", json!(true))])
            .build()
            .unwrap();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.details(), Some("flight LH123"));
        let metadata = err.metadata().unwrap();
        assert_eq!(metadata["a"], json!(2));
        assert_eq!(metadata["b"], json!("x"));
        assert_eq!(metadata["c"], json!(true));
    }

    #[test]
    fn clear_metadata_drops_everything() {
        let err = ErrorBuilder::new()
            .with_code("E")
            .with_message("m")
            .add_metadata("k", "v")
            .clear_metadata()
            .build()
            .unwrap();
        assert!(err.metadata().is_none());
    }

    #[test]
    fn with_exception_sets_cause_and_metadata() {
        let err = ErrorBuilder::new()
            .with_code("E")
            .with_message("m")
            .with_exception(std::io::Error::other("pipe closed"))
            .build()
            .unwrap();
        assert_eq!(err.cause().unwrap().to_string(), "pipe closed");
        assert_eq!(err.metadata_value("exceptionMessage"), Some(&json!("pipe closed")));
    }

    #[test]
    fn build_with_feeds_parts_to_factory() {
        #[derive(Debug, PartialEq)]
        struct Tagged {
            code: String,
            message: String,
            has_details: bool,
        }

        let tagged = ErrorBuilder::new()
            .with_code("E")
            .with_message("m")
            .with_details("d")
            .build_with(|code, message, details, _, _| Tagged {
                code,
                message,
                has_details: details.is_some(),
            })
            .unwrap();
        assert_eq!(
            tagged,
            Tagged {
                code: "E".into(),
                message: "m".into(),
                has_details: true
            }
        );
    }

    #[test]
    fn build_with_validates_before_calling_factory() {
        let mut called = false;
        let res = ErrorBuilder::new().build_with(|_, _, _, _, _| called = true);
        assert!(res.is_err());
        assert!(!called);
    }

    #[test]
    fn to_builder_round_trips_an_error() {
        let original = crate::NotFoundError::by_identifier("User", 7);
        let copy = original
            .to_builder()
            .with_details("looked up by admin")
            .build()
            .unwrap();
        assert_eq!(copy, original);
        assert_eq!(copy.kind(), ErrorKind::NotFound);
        assert_eq!(copy.details(), Some("looked up by admin"));
        assert_eq!(copy.metadata(), original.metadata());
    }
}

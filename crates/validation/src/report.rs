//! Validation reports consumed by the bridge.

use validator::{ValidationErrors, ValidationErrorsKind};

/// One failed rule for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub property_path: String,
    pub message: String,
}

impl FieldFailure {
    pub fn new(property_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property_path: property_path.into(),
            message: message.into(),
        }
    }
}

/// What a validator reports about one instance.
pub trait ValidationReport {
    fn is_valid(&self) -> bool;

    /// Failed rules in report order.
    fn failures(&self) -> Vec<FieldFailure>;
}

/// Plain report for validators other than `validator`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    failures: Vec<FieldFailure>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn from_failures(failures: impl IntoIterator<Item = FieldFailure>) -> Self {
        Self {
            failures: failures.into_iter().collect(),
        }
    }

    pub fn push(&mut self, property_path: impl Into<String>, message: impl Into<String>) {
        self.failures.push(FieldFailure::new(property_path, message));
    }
}

impl ValidationReport for ValidationOutcome {
    fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    fn failures(&self) -> Vec<FieldFailure> {
        self.failures.clone()
    }
}

/// Nested struct and list errors flatten to `parent.child` and `items[2].name`
/// paths. Sibling fields are ordered by name (the underlying map is unordered),
/// list items by numeric index, and rules within a field keep their
/// declaration order.
impl ValidationReport for ValidationErrors {
    fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    fn failures(&self) -> Vec<FieldFailure> {
        let mut failures = Vec::new();
        flatten(self, "", &mut failures);
        failures
    }
}

impl ValidationReport for Result<(), ValidationErrors> {
    fn is_valid(&self) -> bool {
        match self {
            Ok(()) => true,
            Err(errors) => errors.is_valid(),
        }
    }

    fn failures(&self) -> Vec<FieldFailure> {
        match self {
            Ok(()) => Vec::new(),
            Err(errors) => errors.failures(),
        }
    }
}

fn flatten(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldFailure>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(rules) => {
                for rule in rules {
                    let message = rule
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| rule.code.to_string());
                    out.push(FieldFailure::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten(inner, &path, out),
            // BTreeMap keyed by index
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::{Validate, ValidationError};

    #[derive(Debug, Validate)]
    struct Line {
        #[validate(length(min = 1, message = "required"))]
        sku: String,
    }

    #[derive(Debug, Validate)]
    struct Order {
        #[validate(length(min = 1, message = "required"))]
        reference: String,
        #[validate(nested)]
        lines: Vec<Line>,
    }

    fn rule(code: &'static str, message: Option<&'static str>) -> ValidationError {
        let mut error = ValidationError::new(code);
        error.message = message.map(Cow::Borrowed);
        error
    }

    #[test]
    fn plain_outcome_reports_pushed_failures() {
        let mut outcome = ValidationOutcome::valid();
        assert!(outcome.is_valid());
        outcome.push("Name", "required");
        assert!(!outcome.is_valid());
        assert_eq!(outcome.failures(), vec![FieldFailure::new("Name", "required")]);
    }

    #[test]
    fn validator_errors_fall_back_to_rule_code() {
        let mut errors = ValidationErrors::new();
        errors.add("email", rule("email", None));
        errors.add("name", rule("length", Some("too short")));

        assert!(!errors.is_valid());
        assert_eq!(
            errors.failures(),
            vec![
                FieldFailure::new("email", "email"),
                FieldFailure::new("name", "too short"),
            ]
        );
    }

    #[test]
    fn validator_keeps_rule_order_within_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", rule("required", Some("required")));
        errors.add("name", rule("length", Some("too short")));
        let messages: Vec<_> = errors.failures().into_iter().map(|f| f.message).collect();
        assert_eq!(messages, vec!["required", "too short"]);
    }

    #[test]
    fn ok_result_is_valid() {
        let report: Result<(), ValidationErrors> = Ok(());
        assert!(report.is_valid());
        assert!(report.failures().is_empty());
    }

    #[test]
    fn list_items_are_ordered_by_numeric_index() {
        let order = Order {
            reference: String::new(),
            lines: (0..12).map(|_| Line { sku: String::new() }).collect(),
        };
        let paths: Vec<String> = order
            .validate()
            .failures()
            .into_iter()
            .map(|f| f.property_path)
            .collect();

        let mut expected: Vec<String> = (0..12).map(|i| format!("lines[{i}].sku")).collect();
        expected.push("reference".to_string());
        assert_eq!(paths, expected);
    }
}

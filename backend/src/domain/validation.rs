//! Declarative request validation.
//!
//! Each request type exposes a static table of per-field constraints (see
//! [`ValidateRequest`]); [`validate_request`] walks the table and collects
//! every violation into a structured list of field errors. Type coercion
//! (integers, booleans) already happened at deserialisation, so the tables
//! only carry the constraints the type system cannot express.

use serde::Serialize;
use serde_json::json;

use crate::domain::Error;

/// Violations recorded against a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field as it appears on the wire.
    pub field: String,
    /// Human-readable constraint violations.
    pub errors: Vec<String>,
}

/// A field value as seen by the constraint checker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// The field was not supplied.
    Absent,
    /// A textual field.
    Text(&'a str),
    /// A boolean field.
    Flag(bool),
}

/// One row of a validation table: a field and its constraints.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Wire name of the field.
    pub field: &'static str,
    /// Constraints evaluated against the field's value.
    pub constraints: &'static [Constraint],
}

/// A single declarative constraint on a field value.
///
/// Constraints ignore absent and non-textual values; optional fields are
/// only checked when supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Minimum length in characters, inclusive.
    MinLength(usize),
    /// Maximum length in characters, inclusive.
    MaxLength(usize),
}

impl Constraint {
    fn check(self, field: &'static str, value: FieldValue<'_>) -> Option<String> {
        let FieldValue::Text(text) = value else {
            return None;
        };
        let length = text.chars().count();
        match self {
            Self::MinLength(min) if length < min => {
                Some(format!("{field} must be at least {min} characters long"))
            }
            Self::MaxLength(max) if length > max => {
                Some(format!("{field} must be at most {max} characters long"))
            }
            _ => None,
        }
    }
}

/// Request types that carry a validation table.
pub trait ValidateRequest {
    /// The constraint table for this request type.
    fn rules() -> &'static [FieldRule];

    /// Look up the current value of a field by its wire name.
    fn field(&self, name: &'static str) -> FieldValue<'_>;
}

/// Validate a request against its constraint table.
///
/// All fields are checked and all violations reported together, so a
/// client can fix its input in one round trip.
///
/// # Errors
///
/// Returns an [`Error`] with code `invalid_request`, message
/// `"Validation failed"`, and a `details.errors` array of
/// [`FieldError`]s when any constraint is violated.
pub fn validate_request<T: ValidateRequest>(request: &T) -> Result<(), Error> {
    let mut failures = Vec::new();
    for rule in T::rules() {
        let value = request.field(rule.field);
        let errors: Vec<String> = rule
            .constraints
            .iter()
            .filter_map(|constraint| constraint.check(rule.field, value))
            .collect();
        if !errors.is_empty() {
            failures.push(FieldError {
                field: rule.field.to_owned(),
                errors,
            });
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::invalid_request("Validation failed")
            .with_details(json!({ "errors": failures })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    struct Probe {
        name: Option<String>,
        flag: Option<bool>,
    }

    const PROBE_RULES: &[FieldRule] = &[
        FieldRule {
            field: "name",
            constraints: &[Constraint::MinLength(1), Constraint::MaxLength(5)],
        },
        FieldRule {
            field: "flag",
            constraints: &[],
        },
    ];

    impl ValidateRequest for Probe {
        fn rules() -> &'static [FieldRule] {
            PROBE_RULES
        }

        fn field(&self, name: &'static str) -> FieldValue<'_> {
            match name {
                "name" => self
                    .name
                    .as_deref()
                    .map_or(FieldValue::Absent, FieldValue::Text),
                "flag" => self.flag.map_or(FieldValue::Absent, FieldValue::Flag),
                _ => FieldValue::Absent,
            }
        }
    }

    #[rstest]
    #[case(Some("ok".to_owned()), true)]
    #[case(Some("12345".to_owned()), true)]
    #[case(Some(String::new()), false)]
    #[case(Some("123456".to_owned()), false)]
    #[case(None, true)]
    fn length_constraints_apply_only_to_supplied_text(
        #[case] name: Option<String>,
        #[case] valid: bool,
    ) {
        let probe = Probe { name, flag: None };
        assert_eq!(validate_request(&probe).is_ok(), valid);
    }

    #[test]
    fn violations_surface_as_structured_field_errors() {
        let probe = Probe {
            name: Some(String::new()),
            flag: Some(true),
        };
        let error = validate_request(&probe).expect_err("empty name rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Validation failed");

        let details = error.details().expect("details present");
        let errors = details
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .expect("errors array");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].get("field").and_then(serde_json::Value::as_str),
            Some("name")
        );
    }

    #[test]
    fn boolean_fields_are_unconstrained() {
        let probe = Probe {
            name: Some("ok".to_owned()),
            flag: Some(false),
        };
        assert!(validate_request(&probe).is_ok());
    }
}

//! Form Model and Validation
//!
//! The per-request form state: one text field checked against an explicit
//! list of validator predicates, evaluated in order with the first failure
//! short-circuiting. The model lives for a single request/response cycle.

use thiserror::Error;

/// Errors from field validation.
///
/// Validation failures are recovered locally: they render as inline form
/// feedback next to the field, never as an HTTP error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("this field is required")]
    Required,
}

/// A validator predicate for a single field value.
pub type Validator = fn(&str) -> Result<(), ValidationError>;

/// Rejects empty and whitespace-only values.
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required)
    } else {
        Ok(())
    }
}

/// Run validators in order; the first failure wins.
fn validate_value(value: &str, validators: &[Validator]) -> Result<(), ValidationError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

/// Render state for a single text field.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    /// Message to display beside the field when validation failed.
    pub error: Option<String>,
}

/// The name form: one required text field.
///
/// Constructed fresh per request and discarded at response time.
#[derive(Debug, Clone)]
pub struct NameForm {
    pub name: TextField,
}

/// Validators for the name field, in evaluation order.
const NAME_VALIDATORS: &[Validator] = &[required];

impl NameForm {
    /// An unbound form, as rendered on the initial GET.
    pub fn empty() -> Self {
        Self {
            name: TextField {
                label: "What is your name",
                ..TextField::default()
            },
        }
    }

    /// A form bound to the submitted field value.
    pub fn bind(value: String) -> Self {
        let mut form = Self::empty();
        form.name.value = value;
        form
    }

    /// Validate the bound value, recording the first failure on the field.
    pub fn validate(&mut self) -> bool {
        match validate_value(&self.name.value, NAME_VALIDATORS) {
            Ok(()) => {
                self.name.error = None;
                true
            }
            Err(err) => {
                self.name.error = Some(err.to_string());
                false
            }
        }
    }

    /// Capture the field value and clear it, so the redisplayed input is
    /// empty regardless of the greeting.
    pub fn take_value(&mut self) -> String {
        std::mem::take(&mut self.name.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_accepts_nonempty() {
        assert_eq!(required("Ada"), Ok(()));
    }

    #[test]
    fn test_required_rejects_empty() {
        assert_eq!(required(""), Err(ValidationError::Required));
    }

    #[test]
    fn test_required_rejects_whitespace_only() {
        assert_eq!(required("   \t"), Err(ValidationError::Required));
    }

    #[test]
    fn test_first_failure_short_circuits() {
        fn never_reached(_: &str) -> Result<(), ValidationError> {
            panic!("validator after a failure must not run");
        }

        let validators: &[Validator] = &[required, never_reached];
        assert_eq!(validate_value("", validators), Err(ValidationError::Required));
    }

    #[test]
    fn test_empty_form_has_no_error() {
        let form = NameForm::empty();
        assert_eq!(form.name.value, "");
        assert!(form.name.error.is_none());
        assert_eq!(form.name.label, "What is your name");
    }

    #[test]
    fn test_validate_records_inline_error() {
        let mut form = NameForm::bind(String::new());
        assert!(!form.validate());
        assert_eq!(form.name.error.as_deref(), Some("this field is required"));
    }

    #[test]
    fn test_take_value_clears_field() {
        let mut form = NameForm::bind("Ada".to_string());
        assert!(form.validate());
        assert_eq!(form.take_value(), "Ada");
        assert_eq!(form.name.value, "");
    }
}

//! Shared error types for saccoview
//!
//! Validation problems are field-scoped values that never cross the
//! collaborator boundary; they are resolved by the user editing the
//! form. Nothing here is fatal - every failure is scoped to one form
//! or one list instance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-scoped validation error
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Dotted path of the offending field (e.g., "member.national_id",
    /// "next_of_kin.2.percentage_share")
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A non-empty collection of field errors produced by a validation pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Record an error
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Record an error built from parts
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Find the error for a specific field, if any
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_display() {
        let error = FieldError::new("member.city", "Required");
        assert_eq!(error.to_string(), "member.city: Required");
    }

    #[test]
    fn test_errors_box_as_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(FieldError::new("member.city", "Required"));
        assert_eq!(error.to_string(), "member.city: Required");

        let mut errors = ValidationErrors::new();
        errors.add("next_of_kin", "At least one beneficiary is required");
        let error: Box<dyn std::error::Error> = Box::new(errors);
        assert_eq!(
            error.to_string(),
            "next_of_kin: At least one beneficiary is required"
        );
    }

    #[test]
    fn test_validation_errors_collect() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("member.city", "Required");
        errors.add("next_of_kin.0.full_name", "Required");

        assert_eq!(errors.len(), 2);
        assert!(errors.for_field("member.city").is_some());
        assert!(errors.for_field("member.district").is_none());
        assert_eq!(
            errors.to_string(),
            "member.city: Required; next_of_kin.0.full_name: Required"
        );
    }
}

//! Input validation for analysis requests.
//!
//! Checks structural integrity of the submitted steps before scheduling.
//! Detects:
//! - Steps without a name
//! - Duplicate step names
//!
//! Dependency edges are deliberately not validated here: unknown targets,
//! self-references, and cycles are tolerated and repaired by the scheduler.

use crate::models::StepSpec;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A step has an empty name.
    MissingName,
    /// Two steps share the same name.
    DuplicateName,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the steps of one analysis request.
///
/// Checks:
/// 1. Every step has a non-empty name
/// 2. No two steps share a name
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_steps(steps: &[StepSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (position, step) in steps.iter().enumerate() {
        if step.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingName,
                format!("step at position {position} has no name"),
            ));
            continue;
        }
        if !seen.insert(step.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("duplicate step name: {}", step.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_steps() {
        let steps = vec![
            StepSpec::new("A").with_cycle_time(1.0),
            StepSpec::new("B").with_dependency("A"),
        ];
        assert!(validate_steps(&steps).is_ok());
    }

    #[test]
    fn test_missing_name() {
        let steps = vec![StepSpec::new("")];
        let errors = validate_steps(&steps).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingName));
    }

    #[test]
    fn test_duplicate_name() {
        let steps = vec![
            StepSpec::new("A").with_cycle_time(1.0),
            StepSpec::new("A").with_cycle_time(2.0),
        ];
        let errors = validate_steps(&steps).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateName));
    }

    #[test]
    fn test_duplicate_fails_regardless_of_other_fields() {
        let steps = vec![
            StepSpec::new("A").with_cycle_time(1.0).value_added(),
            StepSpec::new("A").with_cost(500.0).with_dependency("B"),
            StepSpec::new("B"),
        ];
        assert!(validate_steps(&steps).is_err());
    }

    #[test]
    fn test_multiple_errors_collected() {
        let steps = vec![StepSpec::new(""), StepSpec::new("A"), StepSpec::new("A")];
        let errors = validate_steps(&steps).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_steps(&[]).is_ok());
    }

    #[test]
    fn test_unknown_dependency_is_not_an_error() {
        let steps = vec![StepSpec::new("A").with_dependency("GHOST")];
        assert!(validate_steps(&steps).is_ok());
    }
}

//! Error taxonomy for the analysis pipeline.
//!
//! Only two conditions surface to the caller: invalid step names
//! (`Validation`) and, under the strict cycle policy, a cyclic dependency
//! graph (`Graph`). Model persistence failures and lenient-mode graph
//! inconsistencies are recovered internally and only logged. Training
//! failures (`Model`) can occur only during initialization.

use thiserror::Error;

use crate::predict::TrainError;
use crate::scheduler::CycleError;
use crate::validation::ValidationError;

/// Failure of one analysis request.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Missing or duplicate step names. The request is rejected before any
    /// scheduling work begins.
    #[error("invalid steps: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Cyclic dependency graph, rejected under `CyclePolicy::Strict`.
    /// The default lenient policy recovers instead of raising this.
    #[error(transparent)]
    Graph(#[from] CycleError),

    /// Model training failed during initialization.
    #[error(transparent)]
    Model(#[from] TrainError),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StepSpec;
    use crate::validation::validate_steps;

    #[test]
    fn test_validation_error_message_lists_all_issues() {
        let steps = vec![StepSpec::new(""), StepSpec::new("A"), StepSpec::new("A")];
        let errors = validate_steps(&steps).unwrap_err();
        let message = AnalyzeError::Validation(errors).to_string();
        assert!(message.contains("has no name"));
        assert!(message.contains("duplicate step name: A"));
    }
}

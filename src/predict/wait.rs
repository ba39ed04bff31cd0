//! Wait-time regression model.
//!
//! Scores the expected waiting time of a step from its cycle time, cost,
//! and VA/NVA classification. When no persisted model exists, the model
//! self-trains on a small synthetic grid with a fixed target function, so
//! predictions on grid-like inputs closely match that function.

use serde::{Deserialize, Serialize};

use super::linear::{LinearModel, TrainError};
use crate::models::{round2, StepSpec};

/// Cycle-time values of the synthetic training grid (hours).
const CYCLE_GRID: [f64; 5] = [1.0, 2.0, 3.0, 5.0, 8.0];
/// Cost values of the synthetic training grid.
const COST_GRID: [f64; 4] = [200.0, 600.0, 1000.0, 1800.0];

/// The synthetic wait target: a fixed linear function of the step features.
pub(crate) fn synthetic_wait(cycle_time: f64, cost: f64, value_added: bool) -> f64 {
    0.2 * cycle_time + 0.002 * cost + if value_added { 0.5 } else { 2.0 }
}

/// VA/NVA classification encoded as a 0/1 feature.
pub(crate) fn va_feature(value_added: bool) -> f64 {
    if value_added {
        1.0
    } else {
        0.0
    }
}

/// Wait-time regressor.
///
/// Features: cycle time, cost, value-added as 0/1. The synthetic target is
/// exactly linear in these features, so the fitted model reproduces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitModel {
    model: LinearModel,
}

impl WaitModel {
    /// Trains on the synthetic grid.
    pub fn train() -> Result<Self, TrainError> {
        let mut rows = Vec::new();
        let mut targets = Vec::new();
        for cycle in CYCLE_GRID {
            for cost in COST_GRID {
                for value_added in [false, true] {
                    rows.push(vec![cycle, cost, va_feature(value_added)]);
                    targets.push(synthetic_wait(cycle, cost, value_added));
                }
            }
        }
        let model = LinearModel::fit(&rows, &targets)?;
        Ok(Self { model })
    }

    /// Predicts the wait time for one step, in hours.
    ///
    /// Never negative; rounded to 2 decimals.
    pub fn predict_wait_time(&self, cycle_time: f64, cost: f64, value_added: bool) -> f64 {
        let predicted = self
            .model
            .predict(&[cycle_time, cost, va_feature(value_added)]);
        round2(predicted.max(0.0))
    }

    /// Predicts the wait time for a step descriptor.
    pub fn predict_step(&self, step: &StepSpec) -> f64 {
        self.predict_wait_time(step.cycle_time, step.cost, step.value_added)
    }
}

//! Step criticality classifier.
//!
//! Flags bottleneck candidates: steps whose cycle time or wait/cycle ratio
//! marks them as critical. Trained on a synthetic grid (a superset of the
//! wait model's grid) labeled by a deterministic rule, using the same
//! synthetic wait formula for the wait feature.

use serde::{Deserialize, Serialize};

use super::tree::DecisionTree;
use super::wait::{synthetic_wait, va_feature};
use crate::models::ScheduledStep;

/// Cycle-time values of the classifier training grid (hours).
const CYCLE_GRID: [f64; 7] = [1.0, 2.0, 3.0, 5.0, 8.0, 10.0, 15.0];
/// Cost values of the classifier training grid.
const COST_GRID: [f64; 5] = [200.0, 600.0, 1000.0, 1800.0, 3000.0];

/// The labeling rule: critical when the cycle is long, or when a
/// non-value-added step waits more than half its own cycle.
fn is_critical(cycle_time: f64, wait_time: f64, value_added: bool) -> bool {
    cycle_time > 5.0 || (wait_time / cycle_time.max(0.1) > 0.5 && !value_added)
}

/// Criticality classifier.
///
/// Features: cycle time, cost, value-added as 0/1, wait time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalityModel {
    tree: DecisionTree,
}

impl CriticalityModel {
    /// Trains on the synthetic grid.
    pub fn train() -> Self {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for cycle in CYCLE_GRID {
            for cost in COST_GRID {
                for value_added in [false, true] {
                    let wait = synthetic_wait(cycle, cost, value_added);
                    rows.push(vec![cycle, cost, va_feature(value_added), wait]);
                    labels.push(u8::from(is_critical(cycle, wait, value_added)));
                }
            }
        }
        Self {
            tree: DecisionTree::fit(&rows, &labels),
        }
    }

    /// Predicts one 0/1 criticality label per step, order-preserving.
    ///
    /// An empty input returns an empty output.
    pub fn predict_critical_flags(&self, steps: &[ScheduledStep]) -> Vec<u8> {
        steps
            .iter()
            .map(|s| {
                self.tree.predict(&[
                    s.cycle_time,
                    s.cost,
                    va_feature(s.value_added),
                    s.wait_time,
                ])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled(cycle: f64, cost: f64, value_added: bool, wait: f64) -> ScheduledStep {
        ScheduledStep {
            name: "s".into(),
            cycle_time: cycle,
            cost,
            value_added,
            depends_on: vec![],
            start_time: wait,
            end_time: wait + cycle,
            wait_time: wait,
            predicted_wait: None,
            predicted_flag: false,
        }
    }

    #[test]
    fn test_reproduces_labeling_rule_on_grid() {
        let model = CriticalityModel::train();
        for cycle in CYCLE_GRID {
            for cost in COST_GRID {
                for value_added in [false, true] {
                    let wait = synthetic_wait(cycle, cost, value_added);
                    let expected = u8::from(is_critical(cycle, wait, value_added));
                    let flags =
                        model.predict_critical_flags(&[scheduled(cycle, cost, value_added, wait)]);
                    assert_eq!(
                        flags[0], expected,
                        "cycle={cycle} cost={cost} va={value_added}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_long_cycle_is_critical() {
        let model = CriticalityModel::train();
        let flags = model.predict_critical_flags(&[scheduled(8.0, 600.0, true, 0.0)]);
        assert_eq!(flags, vec![1]);
    }

    #[test]
    fn test_short_value_added_step_not_critical() {
        let model = CriticalityModel::train();
        let flags = model.predict_critical_flags(&[scheduled(1.0, 200.0, true, 1.1)]);
        assert_eq!(flags, vec![0]);
    }

    #[test]
    fn test_empty_batch_returns_empty() {
        let model = CriticalityModel::train();
        assert!(model.predict_critical_flags(&[]).is_empty());
    }

    #[test]
    fn test_batch_is_order_preserving() {
        let model = CriticalityModel::train();
        let steps = vec![
            scheduled(15.0, 1000.0, false, 6.0),
            scheduled(1.0, 200.0, true, 1.1),
            scheduled(10.0, 3000.0, true, 8.5),
        ];
        let flags = model.predict_critical_flags(&steps);
        assert_eq!(flags, vec![1, 0, 1]);
    }
}

//! Process step models.
//!
//! A step is a single activity on the value stream map: a processing
//! duration, a cost, a lean VA/NVA classification, and the names of the
//! steps it must wait for.
//!
//! # Reference
//! Rother & Shook (1999), "Learning to See", Part II: The Current-State Map

use serde::{Deserialize, Serialize};

/// A process step as supplied by the caller.
///
/// Only `name` is mandatory; every other field has a defaulting rule so that
/// partially specified steps deserialize cleanly. Numeric fields are clamped
/// to zero during normalization rather than rejected.
///
/// # Time Representation
/// All durations are in hours (or any consistent time unit) relative to the
/// process origin at t=0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    /// Step name, unique within one analysis request.
    pub name: String,
    /// Processing duration (hours).
    #[serde(default)]
    pub cycle_time: f64,
    /// Step cost (currency units).
    #[serde(default)]
    pub cost: f64,
    /// Whether the step adds customer value (lean VA/NVA classification).
    #[serde(default)]
    pub value_added: bool,
    /// Names of steps this step must wait for. Edges pointing to unknown
    /// names or to the step itself are dropped by the scheduler.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl StepSpec {
    /// Creates a new step with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cycle_time: 0.0,
            cost: 0.0,
            value_added: false,
            depends_on: Vec::new(),
        }
    }

    /// Sets the cycle time (hours).
    pub fn with_cycle_time(mut self, cycle_time: f64) -> Self {
        self.cycle_time = cycle_time;
        self
    }

    /// Sets the cost.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Marks the step as value-added.
    pub fn value_added(mut self) -> Self {
        self.value_added = true;
        self
    }

    /// Adds a dependency on another step.
    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.depends_on.push(name.into());
        self
    }

    /// Returns a copy with negative (or NaN) numeric fields clamped to zero.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.clone(),
            cycle_time: self.cycle_time.max(0.0),
            cost: self.cost.max(0.0),
            value_added: self.value_added,
            depends_on: self.depends_on.clone(),
        }
    }
}

/// A step placed on the timeline by the scheduler.
///
/// Carries the input fields plus the derived schedule fields. `wait_time`
/// equals `start_time` by definition: it is the idle time accumulated before
/// the step can run, counted from the process origin at t=0. The downstream
/// `total_wait_time` KPI depends on this exact definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledStep {
    /// Step name.
    pub name: String,
    /// Processing duration (hours).
    pub cycle_time: f64,
    /// Step cost (currency units).
    pub cost: f64,
    /// Lean VA/NVA classification.
    pub value_added: bool,
    /// Declared dependency edges (as supplied, before filtering).
    pub depends_on: Vec<String>,
    /// Earliest time the step can begin: max end time of its scheduled
    /// dependencies, or 0 if it has none.
    pub start_time: f64,
    /// `start_time + cycle_time`.
    pub end_time: f64,
    /// Idle time before the step can run (equals `start_time`).
    pub wait_time: f64,
    /// Wait time predicted by the regression model, when scoring is enabled.
    pub predicted_wait: Option<f64>,
    /// True when the predicted wait exceeds the scheduled start by more than
    /// a negligible epsilon.
    pub predicted_flag: bool,
}

/// One row of the analysis timeline, in schedule order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Step name.
    pub name: String,
    /// Scheduled start (hours).
    pub start: f64,
    /// Scheduled end (hours).
    pub end: f64,
    /// Wait before start (hours).
    pub wait: f64,
    /// Processing duration (hours).
    pub cycle: f64,
    /// Lean VA/NVA classification.
    pub value_added: bool,
    /// Model-predicted wait, when scoring is enabled.
    pub predicted_wait: Option<f64>,
    /// Whether the predicted wait exceeded the scheduled start.
    pub predicted_flag: bool,
}

impl From<&ScheduledStep> for TimelineEntry {
    fn from(step: &ScheduledStep) -> Self {
        Self {
            name: step.name.clone(),
            start: step.start_time,
            end: step.end_time,
            wait: step.wait_time,
            cycle: step.cycle_time,
            value_added: step.value_added,
            predicted_wait: step.predicted_wait,
            predicted_flag: step.predicted_flag,
        }
    }
}

/// Rounds to 2 decimal places, the precision used for all schedule times.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_builder() {
        let step = StepSpec::new("welding")
            .with_cycle_time(2.5)
            .with_cost(600.0)
            .value_added()
            .with_dependency("cutting");

        assert_eq!(step.name, "welding");
        assert_eq!(step.cycle_time, 2.5);
        assert_eq!(step.cost, 600.0);
        assert!(step.value_added);
        assert_eq!(step.depends_on, vec!["cutting".to_string()]);
    }

    #[test]
    fn test_step_defaults() {
        let step: StepSpec = serde_json::from_str(r#"{"name": "A"}"#).unwrap();
        assert_eq!(step.cycle_time, 0.0);
        assert_eq!(step.cost, 0.0);
        assert!(!step.value_added);
        assert!(step.depends_on.is_empty());
    }

    #[test]
    fn test_normalized_clamps_negatives() {
        let step = StepSpec::new("A").with_cycle_time(-3.0).with_cost(-50.0);
        let normalized = step.normalized();
        assert_eq!(normalized.cycle_time, 0.0);
        assert_eq!(normalized.cost, 0.0);
    }

    #[test]
    fn test_normalized_keeps_valid_values() {
        let step = StepSpec::new("A").with_cycle_time(1.5).with_cost(200.0);
        let normalized = step.normalized();
        assert_eq!(normalized.cycle_time, 1.5);
        assert_eq!(normalized.cost, 200.0);
    }

    #[test]
    fn test_timeline_entry_projection() {
        let step = ScheduledStep {
            name: "A".into(),
            cycle_time: 2.0,
            cost: 100.0,
            value_added: true,
            depends_on: vec![],
            start_time: 1.0,
            end_time: 3.0,
            wait_time: 1.0,
            predicted_wait: Some(1.5),
            predicted_flag: true,
        };
        let entry = TimelineEntry::from(&step);
        assert_eq!(entry.start, 1.0);
        assert_eq!(entry.end, 3.0);
        assert_eq!(entry.wait, 1.0);
        assert_eq!(entry.cycle, 2.0);
        assert_eq!(entry.predicted_wait, Some(1.5));
        assert!(entry.predicted_flag);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(2.3333), 2.33);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(0.0), 0.0);
    }
}

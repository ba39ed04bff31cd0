//! Lean flow metrics (KPIs).
//!
//! Computes value-stream performance indicators from a scheduled
//! dependency flow.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Lead Time | Maximum end time across all steps |
//! | Total Cycle Time | Sum of processing durations |
//! | Total VA Time | Sum of cycle times over value-added steps |
//! | VA Ratio | Total VA time / lead time × 100 (0 when lead time is 0) |
//! | Total Wait Time | Sum of per-step wait times |
//!
//! # Reference
//! Rother & Shook (1999), "Learning to See", Part III: Lean Metrics

use crate::models::{round2, ScheduledStep};

/// Value-stream performance indicators.
///
/// All time values are in hours (or the consistent unit used in the input).
#[derive(Debug, Clone)]
pub struct FlowKpi {
    /// Lead time: maximum end time across all steps.
    pub lead_time: f64,
    /// Sum of cycle times across all steps.
    pub total_cycle_time: f64,
    /// Sum of cycle times over value-added steps.
    pub total_va_time: f64,
    /// Value-added ratio as a percentage of lead time, rounded to 1 decimal.
    pub va_ratio: f64,
    /// Sum of wait times across all steps.
    pub total_wait_time: f64,
    /// Number of scheduled steps.
    pub nb_steps: usize,
}

impl FlowKpi {
    /// Computes KPIs from a scheduled flow.
    ///
    /// `lead_time` comes from the scheduler rather than being recomputed,
    /// so the summary always agrees with the timeline.
    pub fn calculate(steps: &[ScheduledStep], lead_time: f64) -> Self {
        let total_cycle_time: f64 = steps.iter().map(|s| s.cycle_time).sum();
        let total_va_time: f64 = steps
            .iter()
            .filter(|s| s.value_added)
            .map(|s| s.cycle_time)
            .sum();
        let total_wait_time: f64 = steps.iter().map(|s| s.wait_time).sum();

        let va_ratio = if lead_time > 0.0 {
            round1(total_va_time / lead_time * 100.0)
        } else {
            0.0
        };

        Self {
            lead_time,
            total_cycle_time: round2(total_cycle_time),
            total_va_time: round2(total_va_time),
            va_ratio,
            total_wait_time: round2(total_wait_time),
            nb_steps: steps.len(),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled(name: &str, cycle: f64, start: f64, value_added: bool) -> ScheduledStep {
        ScheduledStep {
            name: name.into(),
            cycle_time: cycle,
            cost: 0.0,
            value_added,
            depends_on: vec![],
            start_time: start,
            end_time: start + cycle,
            wait_time: start,
            predicted_wait: None,
            predicted_flag: false,
        }
    }

    #[test]
    fn test_kpi_basic() {
        let steps = vec![
            scheduled("A", 1.0, 0.0, true),
            scheduled("B", 2.0, 1.0, false),
            scheduled("C", 3.0, 3.0, true),
        ];
        let kpi = FlowKpi::calculate(&steps, 6.0);
        assert_eq!(kpi.total_cycle_time, 6.0);
        assert_eq!(kpi.total_va_time, 4.0);
        // 4 / 6 * 100 = 66.666... → 66.7
        assert_eq!(kpi.va_ratio, 66.7);
        assert_eq!(kpi.total_wait_time, 4.0);
        assert_eq!(kpi.nb_steps, 3);
    }

    #[test]
    fn test_kpi_zero_lead_time() {
        // All cycle times zero: the VA ratio guard avoids dividing by zero.
        let steps = vec![scheduled("A", 0.0, 0.0, true)];
        let kpi = FlowKpi::calculate(&steps, 0.0);
        assert_eq!(kpi.va_ratio, 0.0);
        assert_eq!(kpi.lead_time, 0.0);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = FlowKpi::calculate(&[], 0.0);
        assert_eq!(kpi.total_cycle_time, 0.0);
        assert_eq!(kpi.total_va_time, 0.0);
        assert_eq!(kpi.va_ratio, 0.0);
        assert_eq!(kpi.nb_steps, 0);
    }

    #[test]
    fn test_kpi_all_value_added_full_chain() {
        let steps = vec![
            scheduled("A", 2.0, 0.0, true),
            scheduled("B", 4.0, 2.0, true),
        ];
        let kpi = FlowKpi::calculate(&steps, 6.0);
        assert_eq!(kpi.va_ratio, 100.0);
    }

    #[test]
    fn test_kpi_no_value_added() {
        let steps = vec![scheduled("A", 2.0, 0.0, false)];
        let kpi = FlowKpi::calculate(&steps, 2.0);
        assert_eq!(kpi.va_ratio, 0.0);
        assert_eq!(kpi.total_va_time, 0.0);
    }
}

//! Analysis result models.
//!
//! An analysis is the complete, immutable output of one pipeline run:
//! the scheduled steps, the timeline projection, the aggregate KPIs, and
//! the textual report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ScheduledStep, StepSpec, TimelineEntry};

fn default_process_name() -> String {
    "Unnamed process".to_string()
}

/// Boundary input: a named process and its raw steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Process label.
    #[serde(default = "default_process_name")]
    pub process_name: String,
    /// Raw step descriptors.
    #[serde(default)]
    pub steps: Vec<StepSpec>,
}

/// Aggregate KPIs of one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Process label (denormalized for standalone rendering).
    pub process: String,
    /// Overall process duration: maximum end time across all steps (hours).
    pub lead_time: f64,
    /// Value-added ratio as a percentage of lead time. 0 when lead time is 0.
    pub va_ratio: f64,
    /// Sum of cycle times across all steps (hours).
    pub total_cycle_time: f64,
    /// Sum of wait times across all steps (hours).
    pub total_wait_time: f64,
    /// Number of scheduled steps.
    pub nb_steps: usize,
}

/// Complete analysis result. Immutable once produced.
///
/// The structured `alerts` field is intentionally left empty: alerts are
/// surfaced only inside the textual report, so a consuming UI renders them
/// exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// Process label.
    pub process: String,
    /// Aggregate KPIs.
    pub summary: AnalysisSummary,
    /// Steps in schedule order, projected for timeline rendering.
    pub timeline: Vec<TimelineEntry>,
    /// Always empty; see the type-level note.
    pub alerts: Vec<String>,
    /// Textual report with the alerts embedded inline.
    pub ai_report: String,
    /// When the analysis completed (UTC).
    pub analysis_timestamp: DateTime<Utc>,
    /// Full step records in schedule order.
    pub steps: Vec<ScheduledStep>,
}

/// Result of the single-step wait prediction interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitPrediction {
    /// Step name.
    pub step: String,
    /// Predicted wait time (hours).
    pub predicted_wait_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: AnalysisRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.process_name, "Unnamed process");
        assert!(request.steps.is_empty());
    }

    #[test]
    fn test_request_parses_steps() {
        let json = r#"{
            "process_name": "assembly",
            "steps": [
                {"name": "A", "cycle_time": 1.0},
                {"name": "B", "cycle_time": 2.0, "depends_on": ["A"]}
            ]
        }"#;
        let request: AnalysisRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.process_name, "assembly");
        assert_eq!(request.steps.len(), 2);
        assert_eq!(request.steps[1].depends_on, vec!["A".to_string()]);
    }

    #[test]
    fn test_timestamp_is_iso8601_utc() {
        let analysis = Analysis {
            process: "p".into(),
            summary: AnalysisSummary {
                process: "p".into(),
                lead_time: 0.0,
                va_ratio: 0.0,
                total_cycle_time: 0.0,
                total_wait_time: 0.0,
                nb_steps: 0,
            },
            timeline: vec![],
            alerts: vec![],
            ai_report: String::new(),
            analysis_timestamp: Utc::now(),
            steps: vec![],
        };
        let json = serde_json::to_value(&analysis).unwrap();
        let ts = json["analysis_timestamp"].as_str().unwrap();
        assert!(ts.contains('T'));
        assert!(ts.ends_with('Z') || ts.contains("+00:00"));
    }
}

//! Request-to-report orchestration.
//!
//! `ProcessAnalyzer` runs the full pipeline: validate input steps, delegate
//! scheduling to [`FlowScheduler`], consult the predictive models for
//! anomaly alerts, aggregate KPIs, and assemble the final [`Analysis`].
//! The pipeline is purely synchronous and stateless per request; persistence
//! is the caller's concern (see [`crate::archive`]).

use chrono::Utc;
use tracing::debug;

use crate::error::AnalyzeError;
use crate::models::{
    Analysis, AnalysisRequest, AnalysisSummary, StepSpec, TimelineEntry, WaitPrediction,
};
use crate::predict::PredictiveModels;
use crate::scheduler::{FlowKpi, FlowScheduler};
use crate::validation::validate_steps;

/// Predicted wait must exceed the scheduled start by more than this before
/// an alert is raised.
const PREDICTED_WAIT_EPSILON: f64 = 0.001;

/// The analysis pipeline orchestrator.
///
/// Predictive scoring is opt-in: without models the analyzer produces the
/// deterministic schedule and KPIs only. Models are injected explicitly,
/// never shared through module state.
///
/// # Example
///
/// ```
/// use vsm_flow::analyzer::ProcessAnalyzer;
/// use vsm_flow::models::StepSpec;
///
/// let steps = vec![
///     StepSpec::new("cutting").with_cycle_time(1.0).value_added(),
///     StepSpec::new("welding").with_cycle_time(2.0).with_dependency("cutting"),
/// ];
/// let analysis = ProcessAnalyzer::new().analyze("frame line", &steps).unwrap();
/// assert_eq!(analysis.summary.lead_time, 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProcessAnalyzer {
    scheduler: FlowScheduler,
    models: Option<PredictiveModels>,
}

impl ProcessAnalyzer {
    /// Creates an analyzer without predictive models.
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects the predictive models, enabling wait and criticality alerts.
    pub fn with_models(mut self, models: PredictiveModels) -> Self {
        self.models = Some(models);
        self
    }

    /// Replaces the scheduler (e.g. to select the strict cycle policy).
    pub fn with_scheduler(mut self, scheduler: FlowScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Runs the full pipeline for one request.
    ///
    /// Fails on missing or duplicate step names before any scheduling work
    /// begins; all other malformed inputs are normalized and tolerated.
    pub fn analyze(&self, process_name: &str, steps: &[StepSpec]) -> Result<Analysis, AnalyzeError> {
        validate_steps(steps).map_err(AnalyzeError::Validation)?;
        let normalized: Vec<StepSpec> = steps.iter().map(StepSpec::normalized).collect();

        let flow = self.scheduler.schedule(&normalized)?;
        let mut scheduled = flow.steps;
        let lead_time = flow.lead_time;

        let mut alerts = Vec::new();
        if let Some(models) = &self.models {
            for step in &mut scheduled {
                let predicted = models.wait_model().predict_wait_time(
                    step.cycle_time,
                    step.cost,
                    step.value_added,
                );
                step.predicted_wait = Some(predicted);
                if predicted > step.start_time + PREDICTED_WAIT_EPSILON {
                    step.predicted_flag = true;
                    alerts.push(format!(
                        "predicted wait for step '{}' exceeds scheduled start \
                         ({predicted}h > {}h)",
                        step.name, step.start_time
                    ));
                }
            }

            let flags = models.predict_critical_flags(&scheduled);
            for (step, flag) in scheduled.iter().zip(flags) {
                if flag == 1 {
                    alerts.push(format!(
                        "predicted critical: step '{}' (predicted_wait={}h, cycle={}h)",
                        step.name,
                        step.predicted_wait.unwrap_or(0.0),
                        step.cycle_time
                    ));
                }
            }
        }

        let kpi = FlowKpi::calculate(&scheduled, lead_time);
        debug!(
            process = process_name,
            lead_time = kpi.lead_time,
            va_ratio = kpi.va_ratio,
            alerts = alerts.len(),
            "analysis complete"
        );

        let timeline: Vec<TimelineEntry> = scheduled.iter().map(TimelineEntry::from).collect();
        Ok(Analysis {
            process: process_name.to_string(),
            summary: AnalysisSummary {
                process: process_name.to_string(),
                lead_time: kpi.lead_time,
                va_ratio: kpi.va_ratio,
                total_cycle_time: kpi.total_cycle_time,
                total_wait_time: kpi.total_wait_time,
                nb_steps: kpi.nb_steps,
            },
            timeline,
            // Alerts are surfaced only inside the report so the consuming UI
            // renders them once.
            alerts: Vec::new(),
            ai_report: build_report(process_name, &kpi, &alerts),
            analysis_timestamp: Utc::now(),
            steps: scheduled,
        })
    }

    /// Runs the pipeline for a boundary request.
    pub fn analyze_request(&self, request: &AnalysisRequest) -> Result<Analysis, AnalyzeError> {
        self.analyze(&request.process_name, &request.steps)
    }

    /// Scores a single step's predicted wait time.
    ///
    /// Returns `None` when predictive models are disabled.
    pub fn predict_wait(&self, step: &StepSpec) -> Option<WaitPrediction> {
        self.models.as_ref().map(|models| WaitPrediction {
            step: step.name.clone(),
            predicted_wait_time: models.predict_wait_time(step),
        })
    }
}

fn build_report(process_name: &str, kpi: &FlowKpi, alerts: &[String]) -> String {
    let mut lines = vec![
        format!("VSM report - {process_name}"),
        format!("Planned lead time: {} h", kpi.lead_time),
        format!("VA ratio: {} %", kpi.va_ratio),
        String::new(),
        "Detected alerts:".to_string(),
    ];
    if alerts.is_empty() {
        lines.push("- no anomalies detected by the local models".to_string());
    } else {
        for alert in alerts {
            lines.push(format!("- {alert}"));
        }
    }
    lines.extend([
        String::new(),
        "Recommendations:".to_string(),
        "1) Review the steps flagged by the wait and criticality models.".to_string(),
        "2) Rebalance load between upstream operations.".to_string(),
        "3) Reduce the identified buffer stocks.".to_string(),
    ]);
    lines.join("\n")
}

//! Value stream mapping (VSM) analysis toolkit.
//!
//! Computes a dependency-aware schedule for mapped process steps, derives
//! lean KPIs (lead time, value-added ratio, accumulated wait), and flags
//! steps whose model-predicted waiting time or criticality deviates from
//! the deterministic schedule.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `StepSpec`, `ScheduledStep`, `Analysis`,
//!   `AnalysisSummary`, `TimelineEntry`
//! - **`scheduler`**: Dependency-flow scheduling (Kahn ordering) and KPIs
//! - **`predict`**: Wait-time regressor and criticality classifier
//! - **`analyzer`**: Request-to-report orchestration
//! - **`validation`**: Input integrity checks (missing/duplicate step names)
//! - **`archive`**: Result persistence sinks
//!
//! # Architecture
//!
//! Data flows strictly downward: `ProcessAnalyzer` validates input steps,
//! delegates timeline construction to `FlowScheduler`, consults the
//! predictive models for anomaly alerts, and assembles the final report.
//! No component calls back upward, and a completed `Analysis` is immutable.
//!
//! # References
//!
//! - Rother & Shook (1999), "Learning to See: Value Stream Mapping"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

pub mod analyzer;
pub mod archive;
pub mod error;
pub mod models;
pub mod predict;
pub mod scheduler;
pub mod validation;

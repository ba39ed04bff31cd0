//! Dependency-flow scheduling and lean KPIs.
//!
//! # Algorithm
//!
//! `FlowScheduler` topologically orders steps with Kahn's algorithm and
//! derives a deterministic start/end timeline. Malformed graphs (dangling
//! edges, self-references, cycles) degrade gracefully under the default
//! lenient policy.
//!
//! # KPI
//!
//! `FlowKpi` computes the lean metrics: lead time, total cycle time,
//! value-added ratio, and accumulated wait.
//!
//! # References
//!
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
//! - Rother & Shook (1999), "Learning to See: Value Stream Mapping"

mod flow;
mod kpi;

pub use flow::{CycleError, CyclePolicy, Flow, FlowScheduler};
pub use kpi::FlowKpi;

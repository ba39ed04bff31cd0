//! VSM domain models.
//!
//! Core data types for representing a mapped process and its analysis.
//! A `StepSpec` is the caller-supplied description of one activity; the
//! scheduler turns it into a `ScheduledStep` with derived timeline fields,
//! and the analyzer aggregates everything into an immutable `Analysis`.

mod analysis;
mod step;

pub use analysis::{Analysis, AnalysisRequest, AnalysisSummary, WaitPrediction};
pub use step::{ScheduledStep, StepSpec, TimelineEntry};

pub(crate) use step::round2;

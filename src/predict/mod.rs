//! Predictive models for wait-time and criticality scoring.
//!
//! Two independently trained statistical models augment the deterministic
//! schedule: a wait-time regressor and a criticality classifier. Each
//! trains on a small synthetic grid when no persisted model exists and is
//! reused via instance-level scoring. `PredictiveModels::load_or_train`
//! is the explicit two-phase lifecycle: construct once at initialization,
//! then score freely — the scoring interface assumes ready models and has
//! no side effects.

mod critical;
mod linear;
mod store;
mod tree;
mod wait;

pub use critical::CriticalityModel;
pub use linear::{LinearModel, TrainError};
pub use store::{CRITICAL_MODEL_FILE, ModelStore, PredictiveModels, WAIT_MODEL_FILE};
pub use tree::DecisionTree;
pub use wait::WaitModel;

//! Model persistence and the trained-model bundle.
//!
//! Models persist as JSON under a store directory, keyed by fixed file
//! names. Loading is best-effort: a missing or corrupt file is logged and
//! recovered by retraining, never surfaced to the caller. Training failure
//! itself (a degenerate synthetic grid) is the only loud failure, and can
//! only happen during initialization.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::critical::CriticalityModel;
use super::linear::TrainError;
use super::wait::WaitModel;
use crate::models::{ScheduledStep, StepSpec};

/// File name of the persisted wait-time regressor.
pub const WAIT_MODEL_FILE: &str = "wait_model.json";
/// File name of the persisted criticality classifier.
pub const CRITICAL_MODEL_FILE: &str = "critical_model.json";

/// Durable JSON storage for trained models.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of a model file inside the store.
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Loads a persisted model, or `None` when the file is missing or
    /// corrupt. Corruption is logged, not surfaced.
    pub fn load<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.path(file);
        if !path.exists() {
            return None;
        }
        match read_model(&path) {
            Ok(model) => {
                debug!(file, "loaded persisted model");
                Some(model)
            }
            Err(error) => {
                warn!(file, %error, "failed to load persisted model; retraining");
                None
            }
        }
    }

    /// Persists a model as pretty-printed JSON.
    pub fn save<T: Serialize>(&self, file: &str, model: &T) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(model).map_err(io::Error::from)?;
        fs::write(self.path(file), json)
    }
}

fn read_model<T: DeserializeOwned>(path: &Path) -> io::Result<T> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(io::Error::from)
}

/// The two trained predictive models, constructed once and injected into
/// the analyzer. Scoring is pure and safe to share across requests.
#[derive(Debug, Clone)]
pub struct PredictiveModels {
    wait: WaitModel,
    critical: CriticalityModel,
}

impl PredictiveModels {
    /// Trains both models in memory, without persistence.
    pub fn train() -> Result<Self, TrainError> {
        Ok(Self {
            wait: WaitModel::train()?,
            critical: CriticalityModel::train(),
        })
    }

    /// Loads both models from the store, retraining (and persisting) any
    /// that is missing or corrupt.
    ///
    /// Call once during system initialization; fails only if training
    /// itself is impossible. Persistence failures are logged and tolerated.
    pub fn load_or_train(store: &ModelStore) -> Result<Self, TrainError> {
        let wait = match store.load::<WaitModel>(WAIT_MODEL_FILE) {
            Some(model) => model,
            None => {
                debug!("training wait-time model on synthetic grid");
                let model = WaitModel::train()?;
                if let Err(error) = store.save(WAIT_MODEL_FILE, &model) {
                    warn!(%error, "could not persist wait-time model");
                }
                model
            }
        };

        let critical = match store.load::<CriticalityModel>(CRITICAL_MODEL_FILE) {
            Some(model) => model,
            None => {
                debug!("training criticality model on synthetic grid");
                let model = CriticalityModel::train();
                if let Err(error) = store.save(CRITICAL_MODEL_FILE, &model) {
                    warn!(%error, "could not persist criticality model");
                }
                model
            }
        };

        Ok(Self { wait, critical })
    }

    /// Predicts the wait time for one step descriptor, in hours.
    pub fn predict_wait_time(&self, step: &StepSpec) -> f64 {
        self.wait.predict_step(step)
    }

    /// The wait-time regressor.
    pub fn wait_model(&self) -> &WaitModel {
        &self.wait
    }

    /// Predicts one 0/1 criticality label per step, order-preserving.
    pub fn predict_critical_flags(&self, steps: &[ScheduledStep]) -> Vec<u8> {
        self.critical.predict_critical_flags(steps)
    }
}

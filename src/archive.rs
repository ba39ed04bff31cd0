//! Result persistence sinks.
//!
//! The core never persists anything itself: a completed [`Analysis`] is
//! handed to an [`AnalysisSink`] by the caller. `JsonArchive` is the
//! built-in durable file sink; historical stores (databases, queues)
//! implement the same trait.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::models::Analysis;

/// A destination for completed analyses.
pub trait AnalysisSink {
    /// Persists one completed analysis.
    fn save(&self, analysis: &Analysis) -> io::Result<()>;
}

/// Archives analyses as pretty-printed JSON files named
/// `vsm_<timestamp>.json` in an output directory.
#[derive(Debug, Clone)]
pub struct JsonArchive {
    dir: PathBuf,
}

impl JsonArchive {
    /// Creates an archive rooted at the given directory.
    ///
    /// The directory is created lazily on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the given analysis would be archived at.
    pub fn path_for(&self, analysis: &Analysis) -> PathBuf {
        let stamp = analysis.analysis_timestamp.format("%Y%m%d_%H%M%S");
        self.dir.join(format!("vsm_{stamp}.json"))
    }
}

impl AnalysisSink for JsonArchive {
    fn save(&self, analysis: &Analysis) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(analysis).map_err(io::Error::from)?;
        fs::write(self.path_for(analysis), json)
    }
}

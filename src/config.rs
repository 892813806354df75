//! Batch configuration
//!
//! Defaults match the conventional corpus layout: `emails/spam` and
//! `emails/good`, results written next to the working directory. Values can
//! be loaded from a JSON file and then overridden from the command line.

use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Configuration for one batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory holding the category subdirectories
    pub input_root: PathBuf,

    /// Category subdirectory names, matched ignoring case
    pub categories: Vec<String>,

    /// Message file extension, matched ignoring case
    pub extension: String,

    /// Where the per-file results document is written
    pub results_path: PathBuf,

    /// Where the summary document is written
    pub summary_path: PathBuf,

    /// Worker threads (0 = available parallelism)
    pub workers: usize,

    /// Bounded job queue slots per worker
    pub queue_depth: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("emails"),
            categories: vec!["spam".to_string(), "good".to_string()],
            extension: "eml".to_string(),
            results_path: PathBuf::from("url_extraction_results.json"),
            summary_path: PathBuf::from("url_extraction_summary.json"),
            workers: 0,
            queue_depth: 4,
        }
    }
}

impl BatchConfig {
    /// Load configuration from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ExtractError::Config {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| ExtractError::Config {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.categories.is_empty() {
            return Err(ExtractError::Config {
                path: path.to_path_buf(),
                details: "at least one category is required".into(),
            });
        }
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(ExtractError::Config {
                path: path.to_path_buf(),
                details: "extension must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Resolved worker count, never zero
    #[must_use]
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
    }

    /// Capacity of the bounded job queue
    #[must_use]
    pub fn queue_capacity(&self) -> usize {
        self.worker_count() * self.queue_depth.max(1)
    }
}

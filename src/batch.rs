//! Batch coordinator: discover, dispatch to workers, aggregate, persist

use crate::config::BatchConfig;
use crate::discover::discover_category;
use crate::error::{ExtractError, Result};
use crate::pipeline::process_file;
use crate::types::{BatchSummary, FileResult};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, info, info_span};

/// Runs one batch over the configured corpus
#[derive(Debug, Clone)]
pub struct BatchCoordinator {
    config: BatchConfig,
}

impl BatchCoordinator {
    #[must_use]
    pub const fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Message files of every category, in category order
    #[must_use]
    pub fn discover(&self) -> Vec<PathBuf> {
        self.config
            .categories
            .iter()
            .flat_map(|category| {
                discover_category(&self.config.input_root, category, &self.config.extension)
            })
            .collect()
    }

    /// Process every discovered file and write both output documents.
    ///
    /// An empty corpus logs an error and returns no results without writing
    /// anything. Per-file failures become empty results; only output and
    /// worker pool failures are returned as errors.
    pub fn run(&self) -> Result<Vec<FileResult>> {
        let _span = info_span!("batch", root = %self.config.input_root.display()).entered();

        let files = self.discover();
        if files.is_empty() {
            error!(
                "No .{} files found under {} in any of {:?}",
                self.config.extension,
                self.config.input_root.display(),
                self.config.categories
            );
            return Ok(Vec::new());
        }

        info!("Processing {} emails", files.len());
        let results = self.dispatch(files)?;
        let summary = BatchSummary::from_results(&results);

        write_json(&self.config.results_path, &results)?;
        write_json(&self.config.summary_path, &summary)?;

        info!("{summary}");
        Ok(results)
    }

    /// Feed files through a bounded queue to a fixed set of workers and
    /// collect their results once all of them have finished.
    fn dispatch(&self, files: Vec<PathBuf>) -> Result<Vec<FileResult>> {
        let workers = self.config.worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("extract-worker-{i}"))
            .build()
            .map_err(|e| ExtractError::WorkerPool(e.to_string()))?;

        let (job_tx, job_rx) = mpsc::sync_channel::<PathBuf>(self.config.queue_capacity());
        let job_rx = Mutex::new(job_rx);
        let (result_tx, result_rx) = mpsc::channel::<FileResult>();

        debug!("Starting {workers} workers");
        pool.in_place_scope(|scope| {
            for id in 0..workers {
                let job_rx = &job_rx;
                let result_tx = result_tx.clone();
                scope.spawn(move |_| {
                    let _span = info_span!("worker", id).entered();
                    while let Some(path) = next_job(job_rx) {
                        if result_tx.send(process_file(&path)).is_err() {
                            break;
                        }
                    }
                });
            }

            for path in files {
                if job_tx.send(path).is_err() {
                    break;
                }
            }
            drop(job_tx);
        });
        drop(result_tx);

        Ok(result_rx.into_iter().collect())
    }
}

fn next_job(queue: &Mutex<Receiver<PathBuf>>) -> Option<PathBuf> {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .recv()
        .ok()
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let output_write = |source: std::io::Error| ExtractError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(output_write)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(output_write)?);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| output_write(e.into()))?;
    writer.flush().map_err(output_write)?;

    debug!("Wrote {}", path.display());
    Ok(())
}

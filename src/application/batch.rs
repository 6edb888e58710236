//! Batch Runner
//!
//! Drives a cropping pass: each job hands a source and a destination path to
//! the `Cropper` collaborator. Progress is reported as `BatchEvent`s over an
//! explicit channel and cancellation is a token owned by the caller, checked
//! between jobs.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::LotResult;

/// Writes a processed copy of `source` to `destination`.
///
/// What gets written is up to the implementation.
pub trait Cropper {
    fn crop(&self, source: &Path, destination: &Path) -> LotResult<()>;
}

impl<F> Cropper for F
where
    F: Fn(&Path, &Path) -> LotResult<()>,
{
    fn crop(&self, source: &Path, destination: &Path) -> LotResult<()> {
        self(source, destination)
    }
}

/// One source/destination pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchJob {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl BatchJob {
    /// One job per input, writing under the same basename in `output`
    pub fn for_inputs<I>(inputs: I, output: &Path) -> Vec<BatchJob>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        inputs
            .into_iter()
            .filter_map(|source| {
                let name = source.file_name()?.to_owned();
                Some(BatchJob {
                    destination: output.join(name),
                    source,
                })
            })
            .collect()
    }
}

/// Progress of a batch, in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BatchEvent {
    Started { total: usize },
    /// About to process job `index` (0-based)
    Processing { index: usize, path: PathBuf },
    Failed {
        index: usize,
        path: PathBuf,
        message: String,
    },
    Finished {
        processed: usize,
        failed: usize,
        cancelled: bool,
    },
}

/// Cooperative cancellation flag shared between a batch and its controller
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Totals of a finished batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub processed: usize,
    pub failed: Vec<PathBuf>,
    pub cancelled: bool,
}

/// Sequential cropping pass
pub struct BatchRunner<C>
where
    C: Cropper,
{
    cropper: C,
}

impl<C> BatchRunner<C>
where
    C: Cropper,
{
    pub fn new(cropper: C) -> Self {
        Self { cropper }
    }

    /// Process `jobs` in order.
    ///
    /// A failed job is reported and the batch continues. A dropped progress
    /// receiver does not stop the batch.
    pub fn run(
        &self,
        jobs: &[BatchJob],
        progress: &Sender<BatchEvent>,
        cancel: &CancelToken,
    ) -> BatchSummary {
        let emit = |event: BatchEvent| {
            let _ = progress.send(event);
        };

        let mut summary = BatchSummary {
            total: jobs.len(),
            ..Default::default()
        };
        emit(BatchEvent::Started { total: jobs.len() });

        for (index, job) in jobs.iter().enumerate() {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }
            emit(BatchEvent::Processing {
                index,
                path: job.source.clone(),
            });
            debug!(source = %job.source.display(), destination = %job.destination.display(), "cropping");

            match self.cropper.crop(&job.source, &job.destination) {
                Ok(()) => summary.processed += 1,
                Err(e) => {
                    warn!(source = %job.source.display(), error = %e, "crop failed");
                    emit(BatchEvent::Failed {
                        index,
                        path: job.source.clone(),
                        message: e.to_string(),
                    });
                    summary.failed.push(job.source.clone());
                }
            }
        }

        emit(BatchEvent::Finished {
            processed: summary.processed,
            failed: summary.failed.len(),
            cancelled: summary.cancelled,
        });
        info!(
            total = summary.total,
            processed = summary.processed,
            failed = summary.failed.len(),
            cancelled = summary.cancelled,
            "batch finished"
        );
        summary
    }
}

impl<C> BatchRunner<C>
where
    C: Cropper + Send + 'static,
{
    /// Run the batch on a background thread
    pub fn spawn(
        self,
        jobs: Vec<BatchJob>,
        progress: Sender<BatchEvent>,
        cancel: CancelToken,
    ) -> JoinHandle<BatchSummary> {
        std::thread::spawn(move || self.run(&jobs, &progress, &cancel))
    }
}

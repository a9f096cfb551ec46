//! Batch-synchronous dispatch of evaluation jobs.
//!
//! The candidate stack is drained in batches of up to `n_workers`. All jobs
//! of a batch are fired before any is joined, and the whole batch is joined
//! before the next one starts — concurrency is bounded by the batch size and
//! stragglers hold the barrier. External training jobs are CPU-bound and
//! roughly homogeneous, so the simple barrier keeps the process count capped
//! without a work queue.

use std::path::PathBuf;
use std::sync::Arc;

use hs_types::{Candidate, EngineError, HsResult, Kernel};
use tracing::{debug, info};

use crate::collector::Collector;
use crate::runner::{CrossValJob, SvmRunner};

/// Per-sweep job parameters shared by every candidate.
#[derive(Debug, Clone)]
pub struct SweepJobSpec {
    pub kernel: Kernel,
    pub folds: u32,
    pub probability: bool,
    pub train_path: PathBuf,
}

impl SweepJobSpec {
    pub fn job_for(&self, candidate: Candidate) -> CrossValJob {
        CrossValJob {
            candidate,
            kernel: self.kernel,
            folds: self.folds,
            probability: self.probability,
            train_path: self.train_path.clone(),
        }
    }
}

/// Drains a candidate stack with batch-barrier semantics.
#[derive(Debug, Clone, Copy)]
pub struct BatchScheduler {
    n_workers: usize,
}

impl BatchScheduler {
    pub fn new(n_workers: usize) -> Self {
        Self { n_workers }
    }

    /// Run every candidate exactly once, feeding each completed job to the
    /// collector. Candidates pop off the end of `stack`, so the
    /// last-generated one is dispatched first.
    pub async fn drain(
        &self,
        runner: Arc<dyn SvmRunner>,
        mut stack: Vec<Candidate>,
        spec: &SweepJobSpec,
        collector: &mut Collector,
    ) -> HsResult<()> {
        while !stack.is_empty() {
            debug!(remaining = stack.len(), "starting batch");

            let mut handles = Vec::with_capacity(self.n_workers.min(stack.len()));
            for _ in 0..self.n_workers {
                let Some(candidate) = stack.pop() else {
                    break;
                };
                let runner = Arc::clone(&runner);
                let job = spec.job_for(candidate);
                handles.push(tokio::spawn(async move { runner.cross_validate(job).await }));
            }

            // Join the whole batch (in dispatch order) before the next one.
            for handle in handles {
                let output = handle.await.map_err(|e| EngineError::WorkerFailed {
                    message: e.to_string(),
                })??;
                collector.collect(&output)?;
            }
        }

        info!(
            recorded = collector.table().len(),
            skipped = collector.skipped(),
            "candidate set exhausted"
        );
        Ok(())
    }
}

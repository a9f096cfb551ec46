//! # hs-engine
//!
//! The HyperSweep grid-search engine: expands the parameter grid, drains it
//! through the external trainer with batch-synchronous concurrency, collects
//! cross-validation scores, selects the winning candidate, and finalizes
//! (model, predictions, optional ROC/AUC).

pub mod collector;
pub mod finalize;
pub mod runner;
pub mod scheduler;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use hs_data::ToolChain;
use hs_grid::{BestSelection, ParamGrid, ResultTable};
use hs_types::{HsResult, SweepConfig};

pub use collector::{parse_validation_accuracy, Collector};
pub use finalize::{FinalOutcome, RocSummary};
pub use runner::{CommandRunner, CrossValJob, FinalTrainJob, JobOutput, PredictJob, SvmRunner};
pub use scheduler::{BatchScheduler, SweepJobSpec};

/// Summary of a completed sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub candidates_generated: usize,
    pub results_recorded: usize,
    pub jobs_skipped: usize,
    pub best: BestSelection,
}

/// Everything a finished sweep hands back to the caller.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub best: BestSelection,
    pub report: SweepReport,
    pub table: ResultTable,
}

/// Orchestrates one grid-search run end to end.
pub struct SweepEngine {
    config: SweepConfig,
    runner: Arc<dyn SvmRunner>,
}

impl SweepEngine {
    pub fn new(config: SweepConfig, runner: Arc<dyn SvmRunner>) -> Self {
        Self { config, runner }
    }

    /// Engine backed by the real toolchain binaries.
    pub fn with_toolchain(config: SweepConfig, toolchain: ToolChain) -> Self {
        Self::new(config, Arc::new(CommandRunner::new(toolchain)))
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run the full sweep: generate, dispatch, collect, select.
    ///
    /// The selection is only made after the entire candidate set has been
    /// exhausted; a sweep where nothing parsed fails with `NoResults`.
    pub async fn run(&self) -> HsResult<SweepOutcome> {
        self.config.validate()?;
        let started_at = Utc::now();

        let grid = ParamGrid::generate(&self.config.cost_range, &self.config.gamma_range);
        let candidates_generated = grid.len();
        info!(
            candidates = candidates_generated,
            batch_size = self.config.n_workers,
            "training across gridded parameter groups"
        );

        let mut collector = Collector::create(&self.config.params_path())?;
        let spec = SweepJobSpec {
            kernel: self.config.kernel,
            folds: self.config.folds,
            probability: self.config.probability,
            train_path: self.config.train_path.clone(),
        };
        BatchScheduler::new(self.config.n_workers)
            .drain(
                Arc::clone(&self.runner),
                grid.into_stack(),
                &spec,
                &mut collector,
            )
            .await?;

        let jobs_skipped = collector.skipped();
        let table = collector.into_table();
        let best = table.best()?;
        info!(
            score = best.score,
            cost = best.candidate.cost,
            gamma = best.candidate.gamma,
            "selected best candidate"
        );

        let report = SweepReport {
            id: Uuid::new_v4(),
            started_at,
            finished_at: Utc::now(),
            candidates_generated,
            results_recorded: table.len(),
            jobs_skipped,
            best,
        };
        Ok(SweepOutcome {
            best,
            report,
            table,
        })
    }

    /// Retrain with `best` and score the test set, when one was supplied.
    pub async fn finalize(&self, best: &BestSelection) -> HsResult<Option<FinalOutcome>> {
        finalize::finalize(self.runner.as_ref(), &self.config, best).await
    }
}

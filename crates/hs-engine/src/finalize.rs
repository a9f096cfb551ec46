//! Final retrain, test-set scoring, and optional ROC/AUC.

use std::path::PathBuf;

use hs_grid::BestSelection;
use hs_metrics::{parse_labels, parse_probability_predictions, RocCalculator};
use hs_types::{HsResult, SweepConfig};
use tracing::info;

use crate::runner::{FinalTrainJob, PredictJob, SvmRunner};

/// ROC artifact summary for a probability-mode run.
#[derive(Debug, Clone, PartialEq)]
pub struct RocSummary {
    pub auc: f64,
    pub path: PathBuf,
}

/// What the final stage produced.
#[derive(Debug, Clone)]
pub struct FinalOutcome {
    pub model_path: PathBuf,
    pub predict_path: PathBuf,
    /// The predictor's own accuracy report, verbatim.
    pub predictor_output: String,
    pub roc: Option<RocSummary>,
}

/// Retrain with the winning candidate and score the test set.
///
/// Without a test set there is nothing to do: the run ends after the best
/// parameters have been reported, and `Ok(None)` comes back.
pub async fn finalize(
    runner: &dyn SvmRunner,
    config: &SweepConfig,
    best: &BestSelection,
) -> HsResult<Option<FinalOutcome>> {
    let Some(test_path) = &config.test_path else {
        return Ok(None);
    };

    let model_path = config.model_path();
    info!(model = %model_path.display(), "saving final model");
    runner
        .train(FinalTrainJob {
            candidate: best.candidate,
            kernel: config.kernel,
            probability: config.probability,
            train_path: config.train_path.clone(),
            model_path: model_path.clone(),
        })
        .await?;

    let predict_path = config.predict_path();
    let predictor_output = runner
        .predict(PredictJob {
            probability: config.probability,
            test_path: test_path.clone(),
            model_path: model_path.clone(),
            predict_path: predict_path.clone(),
        })
        .await?;

    // ROC only makes sense when predictions are probabilities.
    let roc = if config.probability {
        let predictions =
            parse_probability_predictions(&tokio::fs::read_to_string(&predict_path).await?)?;
        let labels = parse_labels(&tokio::fs::read_to_string(test_path).await?)?;
        let curve = RocCalculator::compute(&labels, &predictions)?;

        let roc_path = config.roc_path();
        tokio::fs::write(&roc_path, format!("{}\n", curve.to_csv())).await?;
        info!(auc = curve.auc, path = %roc_path.display(), "wrote ROC curve");
        Some(RocSummary {
            auc: curve.auc,
            path: roc_path,
        })
    } else {
        None
    };

    Ok(Some(FinalOutcome {
        model_path,
        predict_path,
        predictor_output,
        roc,
    }))
}

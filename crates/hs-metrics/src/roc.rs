//! ROC curve and AUC computation.
//!
//! [`RocCalculator`] takes parallel ground-truth labels and predicted scores
//! and produces a [`RocCurve`] ordered by threshold descent.

use hs_types::MetricsError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One (FPR, TPR) point of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
}

/// An ROC polyline with its trapezoidal area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    /// Points ordered by descending threshold (FPR non-decreasing).
    pub points: Vec<RocPoint>,
    pub auc: f64,
}

impl RocCurve {
    /// Render the curve as `fpr,tpr` lines with four decimal places, the
    /// on-disk format of the `.roc.txt` artifact.
    pub fn to_csv(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{:.4},{:.4}", p.fpr, p.tpr))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Stateless calculator for ROC/AUC.
pub struct RocCalculator;

impl RocCalculator {
    /// Compute the ROC curve over `actual` labels and `predicted` scores.
    ///
    /// Labels are binarized against the positive class label 1 (anything
    /// else counts as negative). Every distinct predicted score becomes a
    /// threshold, taken in descending order; at each threshold a prediction
    /// counts as positive when its score is >= the threshold. The AUC is the
    /// trapezoidal area under the resulting polyline.
    ///
    /// A test set with no positives or no negatives has no defined curve and
    /// is rejected rather than dividing by zero.
    pub fn compute(actual: &[i64], predicted: &[f64]) -> Result<RocCurve, MetricsError> {
        if actual.len() != predicted.len() {
            return Err(MetricsError::LengthMismatch {
                labels: actual.len(),
                scores: predicted.len(),
            });
        }

        let truth: Vec<bool> = actual.iter().map(|label| *label == 1).collect();
        let n_pos = truth.iter().filter(|t| **t).count();
        let n_neg = truth.len() - n_pos;
        if n_pos == 0 || n_neg == 0 {
            return Err(MetricsError::DegenerateInput {
                positives: n_pos,
                negatives: n_neg,
            });
        }

        let mut thresholds = predicted.to_vec();
        thresholds.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        thresholds.dedup();

        let points: Vec<RocPoint> = thresholds
            .iter()
            .map(|t| {
                let mut tp = 0usize;
                let mut fp = 0usize;
                for (is_pos, score) in truth.iter().zip(predicted) {
                    if *score >= *t {
                        if *is_pos {
                            tp += 1;
                        } else {
                            fp += 1;
                        }
                    }
                }
                RocPoint {
                    fpr: fp as f64 / n_neg as f64,
                    tpr: tp as f64 / n_pos as f64,
                }
            })
            .collect();

        let auc = points
            .windows(2)
            .map(|w| (w[1].fpr - w[0].fpr) * (w[1].tpr + w[0].tpr) / 2.0)
            .sum();

        Ok(RocCurve { points, auc })
    }
}

//! # hs-metrics
//!
//! Final-stage scoring for HyperSweep: parsing the predictor's probability
//! output and the test set's ground-truth labels, and summarizing classifier
//! discrimination as an ROC curve with its AUC.

mod predictions;
mod roc;

pub use predictions::{parse_labels, parse_probability_predictions};
pub use roc::{RocCalculator, RocCurve, RocPoint};

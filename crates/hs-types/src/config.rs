//! Sweep configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::params::{ExponentRange, Kernel};

/// Default log2 range for the cost parameter.
pub const DEFAULT_COST_RANGE: &str = "-7:5:2";
/// Default log2 range for the gamma parameter.
pub const DEFAULT_GAMMA_RANGE: &str = "-16:4:2";
/// Default cross-validation fold count.
pub const DEFAULT_FOLDS: u32 = 8;

/// Top-level configuration for a grid-search sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Training-set path (required).
    pub train_path: PathBuf,

    /// Held-out test-set path. When absent the run stops after reporting the
    /// best cross-validation parameters.
    pub test_path: Option<PathBuf>,

    /// Kernel passed to the external trainer.
    pub kernel: Kernel,

    /// log2 sweep over the cost parameter.
    pub cost_range: ExponentRange,

    /// log2 sweep over the gamma parameter.
    pub gamma_range: ExponentRange,

    /// How many evaluation jobs to run per batch.
    pub n_workers: usize,

    /// Cross-validation fold count passed to the trainer.
    pub folds: u32,

    /// Store predictions as class-1 probabilities and compute ROC/AUC.
    pub probability: bool,

    /// Prefix for the `.params`, `.model`, `.predict`, and `.roc.txt`
    /// artifacts.
    pub out_prefix: PathBuf,
}

impl SweepConfig {
    pub fn new(train_path: impl Into<PathBuf>) -> Self {
        let train_path = train_path.into();
        let out_prefix = default_prefix(&train_path);
        Self {
            train_path,
            test_path: None,
            kernel: Kernel::Rbf,
            // Defaults are valid by construction.
            cost_range: ExponentRange {
                start: -7.0,
                stop: 5.0,
                step: 2.0,
            },
            gamma_range: ExponentRange {
                start: -16.0,
                stop: 4.0,
                step: 2.0,
            },
            n_workers: default_workers(),
            folds: DEFAULT_FOLDS,
            probability: false,
            out_prefix,
        }
    }

    pub fn with_test_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.test_path = Some(path.into());
        self
    }

    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn with_ranges(mut self, cost: ExponentRange, gamma: ExponentRange) -> Self {
        self.cost_range = cost;
        self.gamma_range = gamma;
        self
    }

    pub fn with_workers(mut self, n: usize) -> Self {
        self.n_workers = n;
        self
    }

    pub fn with_folds(mut self, folds: u32) -> Self {
        self.folds = folds;
        self
    }

    pub fn with_probability(mut self, probability: bool) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_out_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.out_prefix = prefix.into();
        self
    }

    /// Check the cross-field invariants that range parsing cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.folds < 2 {
            return Err(ConfigError::BadFoldCount { folds: self.folds });
        }
        if self.n_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }

    /// Path of the params log this sweep appends to.
    pub fn params_path(&self) -> PathBuf {
        artifact_path(&self.out_prefix, "params")
    }

    /// Path of the persisted model artifact.
    pub fn model_path(&self) -> PathBuf {
        artifact_path(&self.out_prefix, "model")
    }

    /// Path of the prediction artifact.
    pub fn predict_path(&self) -> PathBuf {
        artifact_path(&self.out_prefix, "predict")
    }

    /// Path of the ROC curve output.
    pub fn roc_path(&self) -> PathBuf {
        artifact_path(&self.out_prefix, "roc.txt")
    }
}

fn artifact_path(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(format!(".{suffix}"));
    PathBuf::from(name)
}

/// Output prefix when none is supplied: the training path minus its final
/// extension.
pub fn default_prefix(train_path: &Path) -> PathBuf {
    train_path.with_extension("")
}

/// Worker count when none is supplied: the host's logical core count.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_the_documented_ranges() {
        let config = SweepConfig::new("data/heart.svm");
        assert_eq!(config.cost_range.to_string(), DEFAULT_COST_RANGE);
        assert_eq!(config.gamma_range.to_string(), DEFAULT_GAMMA_RANGE);
        assert_eq!(config.folds, DEFAULT_FOLDS);
        assert_eq!(config.kernel, Kernel::Rbf);
        assert!(!config.probability);
    }

    #[test]
    fn default_prefix_strips_extension() {
        let config = SweepConfig::new("data/heart.svm");
        assert_eq!(config.out_prefix, PathBuf::from("data/heart"));
        assert_eq!(config.params_path(), PathBuf::from("data/heart.params"));
        assert_eq!(config.model_path(), PathBuf::from("data/heart.model"));
        assert_eq!(config.predict_path(), PathBuf::from("data/heart.predict"));
        assert_eq!(config.roc_path(), PathBuf::from("data/heart.roc.txt"));
    }

    #[test]
    fn validate_rejects_bad_folds() {
        let config = SweepConfig::new("train.svm").with_folds(1);
        match config.validate() {
            Err(ConfigError::BadFoldCount { folds: 1 }) => (),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let config = SweepConfig::new("train.svm").with_workers(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroWorkers)));
    }

    #[test]
    fn builder_chain() {
        let config = SweepConfig::new("train.svm")
            .with_kernel(Kernel::Linear)
            .with_workers(2)
            .with_folds(5)
            .with_probability(true)
            .with_out_prefix("out/run1");
        assert_eq!(config.kernel, Kernel::Linear);
        assert_eq!(config.n_workers, 2);
        assert_eq!(config.folds, 5);
        assert!(config.probability);
        assert_eq!(config.params_path(), PathBuf::from("out/run1.params"));
    }

    #[test]
    fn config_serialization_round_trip() {
        let config = SweepConfig::new("train.svm").with_test_path("test.svm");
        let json = serde_json::to_string(&config).unwrap();
        let back: SweepConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}

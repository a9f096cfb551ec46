//! Discovery of the external svm toolchain.
//!
//! `svm-train` must be reachable before any job is dispatched; its absence is
//! fatal up front rather than per job. The predictor and scaler are resolved
//! at the same time but only demanded when the run actually needs them.

use std::env;
use std::path::PathBuf;

use hs_types::EnvError;
use tracing::debug;

pub const SVM_TRAIN: &str = "svm-train";
pub const SVM_PREDICT: &str = "svm-predict";
pub const SVM_SCALE: &str = "svm-scale";

/// Resolved paths to the external binaries.
#[derive(Debug, Clone)]
pub struct ToolChain {
    train: PathBuf,
    predict: Option<PathBuf>,
    scale: Option<PathBuf>,
}

impl ToolChain {
    /// Walk `PATH` (then `./` and `../`) for the toolchain. Missing
    /// `svm-train` is fatal; the siblings are checked lazily through
    /// [`ToolChain::predict`] / [`ToolChain::scale`].
    pub fn discover() -> Result<Self, EnvError> {
        let train = find_binary(SVM_TRAIN).ok_or_else(|| EnvError::BinaryNotFound {
            binary: SVM_TRAIN.to_string(),
        })?;
        debug!(path = %train.display(), "found trainer");
        Ok(Self {
            train,
            predict: find_binary(SVM_PREDICT),
            scale: find_binary(SVM_SCALE),
        })
    }

    /// Build a toolchain from known binary locations (tests, embedders).
    pub fn from_paths(
        train: PathBuf,
        predict: Option<PathBuf>,
        scale: Option<PathBuf>,
    ) -> Self {
        Self {
            train,
            predict,
            scale,
        }
    }

    pub fn train(&self) -> &PathBuf {
        &self.train
    }

    pub fn predict(&self) -> Result<&PathBuf, EnvError> {
        self.predict.as_ref().ok_or_else(|| EnvError::BinaryNotFound {
            binary: SVM_PREDICT.to_string(),
        })
    }

    pub fn scale(&self) -> Result<&PathBuf, EnvError> {
        self.scale.as_ref().ok_or_else(|| EnvError::BinaryNotFound {
            binary: SVM_SCALE.to_string(),
        })
    }
}

fn find_binary(name: &str) -> Option<PathBuf> {
    let path_dirs: Vec<PathBuf> = env::var_os("PATH")
        .map(|value| env::split_paths(&value).collect())
        .unwrap_or_default();
    let fallbacks = [PathBuf::from("."), PathBuf::from("..")];
    search_dirs(path_dirs.into_iter().chain(fallbacks), name)
}

fn search_dirs(dirs: impl IntoIterator<Item = PathBuf>, name: &str) -> Option<PathBuf> {
    dirs.into_iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn search_finds_binary_in_listed_dir() {
        let dir = tempdir().unwrap();
        let binary = dir.path().join(SVM_TRAIN);
        std::fs::write(&binary, b"#!/bin/sh\n").unwrap();

        let found = search_dirs([dir.path().to_path_buf()], SVM_TRAIN);
        assert_eq!(found, Some(binary));
    }

    #[test]
    fn search_skips_dirs_without_the_binary() {
        let empty = tempdir().unwrap();
        let with_binary = tempdir().unwrap();
        let binary = with_binary.path().join(SVM_TRAIN);
        std::fs::write(&binary, b"").unwrap();

        let found = search_dirs(
            [empty.path().to_path_buf(), with_binary.path().to_path_buf()],
            SVM_TRAIN,
        );
        assert_eq!(found, Some(binary));
    }

    #[test]
    fn search_returns_none_when_absent() {
        let empty = tempdir().unwrap();
        assert_eq!(search_dirs([empty.path().to_path_buf()], SVM_TRAIN), None);
    }

    #[test]
    fn missing_predictor_is_reported_on_demand() {
        let chain = ToolChain::from_paths(PathBuf::from("/usr/bin/svm-train"), None, None);
        assert!(chain.predict().is_err());
        assert!(chain.scale().is_err());
    }
}

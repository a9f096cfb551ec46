//! Dataset rescaling through `svm-scale`.
//!
//! Scaling the training set produces a `<prefix>.range` file plus a
//! `<dataset>.scale` derivative; the test set is then scaled against the
//! training set's range file. Work is skipped when the derivatives are newer
//! than their source dataset.

use std::path::{Path, PathBuf};

use hs_types::{DataError, HsResult};
use tokio::process::Command;
use tracing::info;

/// Wrapper around the external `svm-scale` binary.
#[derive(Debug, Clone)]
pub struct Scaler {
    binary: PathBuf,
}

impl Scaler {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Scale the training set (and test set, when present) under
    /// `out_prefix`. Returns the paths the sweep should use from here on.
    pub async fn scale(
        &self,
        train: &Path,
        test: Option<&Path>,
        out_prefix: &Path,
    ) -> HsResult<(PathBuf, Option<PathBuf>)> {
        let range_file = append_suffix(out_prefix, ".range");
        let scaled_train = append_suffix(train, ".scale");

        if !(up_to_date(train, &range_file) && up_to_date(train, &scaled_train)) {
            info!(dataset = %train.display(), "scaling");
            self.run_scale("-s", &range_file, train, &scaled_train).await?;
        }

        let Some(test) = test else {
            return Ok((scaled_train, None));
        };

        // Scale the test file according to the range found in the train file.
        let scaled_test = append_suffix(test, ".scale");
        if !(up_to_date(test, &range_file) && up_to_date(test, &scaled_test)) {
            info!(dataset = %test.display(), "scaling");
            self.run_scale("-r", &range_file, test, &scaled_test).await?;
        }

        Ok((scaled_train, Some(scaled_test)))
    }

    async fn run_scale(
        &self,
        range_mode: &str,
        range_file: &Path,
        dataset: &Path,
        output: &Path,
    ) -> HsResult<()> {
        let out = Command::new(&self.binary)
            .arg(range_mode)
            .arg(range_file)
            .arg(dataset)
            .output()
            .await?;

        if !out.status.success() {
            return Err(DataError::ScaleFailed {
                path: dataset.display().to_string(),
                message: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            }
            .into());
        }

        // svm-scale writes the rescaled dataset to stdout.
        tokio::fs::write(output, &out.stdout).await?;
        Ok(())
    }
}

/// True when `derived` exists and is at least as new as `source`.
fn up_to_date(source: &Path, derived: &Path) -> bool {
    let (Ok(source_meta), Ok(derived_meta)) =
        (std::fs::metadata(source), std::fs::metadata(derived))
    else {
        return false;
    };
    match (source_meta.modified(), derived_meta.modified()) {
        (Ok(source_mtime), Ok(derived_mtime)) => derived_mtime >= source_mtime,
        _ => false,
    }
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

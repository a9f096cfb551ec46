//! External trainer/predictor invocation.
//!
//! [`SvmRunner`] is the seam between the scheduler and the outside world.
//! The production implementation shells out to the discovered toolchain; the
//! engine's tests substitute a scripted runner.

use async_trait::async_trait;
use std::path::PathBuf;

use hs_data::ToolChain;
use hs_types::{Candidate, EngineError, HsResult, Kernel};
use tracing::debug;

/// Kernel cache size (MB) passed to the trainer in cross-validation mode.
const CACHE_MEGABYTES: u32 = 1000;

/// One cross-validated evaluation of a candidate.
#[derive(Debug, Clone)]
pub struct CrossValJob {
    pub candidate: Candidate,
    pub kernel: Kernel,
    pub folds: u32,
    pub probability: bool,
    pub train_path: PathBuf,
}

/// The final (non-cross-validated) training run over the full training set.
#[derive(Debug, Clone)]
pub struct FinalTrainJob {
    pub candidate: Candidate,
    pub kernel: Kernel,
    pub probability: bool,
    pub train_path: PathBuf,
    pub model_path: PathBuf,
}

/// Scoring the test set against a persisted model.
#[derive(Debug, Clone)]
pub struct PredictJob {
    pub probability: bool,
    pub test_path: PathBuf,
    pub model_path: PathBuf,
    pub predict_path: PathBuf,
}

/// What one evaluation job produced: the candidate it evaluated, the literal
/// command invoked, the captured stdout, and the exit status.
#[derive(Debug, Clone)]
pub struct JobOutput {
    pub candidate: Candidate,
    pub command: String,
    pub stdout: String,
    pub success: bool,
    pub status_code: Option<i32>,
}

/// Interface to the external svm toolchain.
#[async_trait]
pub trait SvmRunner: Send + Sync {
    /// Run one cross-validated evaluation. Blocks until the child exits.
    /// A non-zero exit is not an error here — the output comes back with
    /// `success: false` and the caller decides to skip the candidate.
    async fn cross_validate(&self, job: CrossValJob) -> HsResult<JobOutput>;

    /// Train the final model. Non-zero exit is fatal.
    async fn train(&self, job: FinalTrainJob) -> HsResult<()>;

    /// Run prediction, returning the predictor's stdout. Non-zero exit is
    /// fatal.
    async fn predict(&self, job: PredictJob) -> HsResult<String>;
}

/// Production runner backed by the discovered toolchain binaries.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    toolchain: ToolChain,
}

impl CommandRunner {
    pub fn new(toolchain: ToolChain) -> Self {
        Self { toolchain }
    }
}

#[async_trait]
impl SvmRunner for CommandRunner {
    async fn cross_validate(&self, job: CrossValJob) -> HsResult<JobOutput> {
        let args = vec![
            "-b".to_string(),
            flag(job.probability),
            "-t".to_string(),
            job.kernel.svm_index().to_string(),
            "-m".to_string(),
            CACHE_MEGABYTES.to_string(),
            "-c".to_string(),
            job.candidate.cost.to_string(),
            "-g".to_string(),
            job.candidate.gamma.to_string(),
            "-v".to_string(),
            job.folds.to_string(),
            job.train_path.display().to_string(),
        ];
        let command = render_command(&self.toolchain.train().display().to_string(), &args);
        debug!(%command, "dispatching cross-validation job");

        let out = tokio::process::Command::new(self.toolchain.train())
            .args(&args)
            .output()
            .await?;

        Ok(JobOutput {
            candidate: job.candidate,
            command,
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            success: out.status.success(),
            status_code: out.status.code(),
        })
    }

    async fn train(&self, job: FinalTrainJob) -> HsResult<()> {
        let args = vec![
            "-b".to_string(),
            flag(job.probability),
            "-t".to_string(),
            job.kernel.svm_index().to_string(),
            "-c".to_string(),
            job.candidate.cost.to_string(),
            "-g".to_string(),
            job.candidate.gamma.to_string(),
            job.train_path.display().to_string(),
            job.model_path.display().to_string(),
        ];
        let command = render_command(&self.toolchain.train().display().to_string(), &args);
        debug!(%command, "training final model");

        let out = tokio::process::Command::new(self.toolchain.train())
            .args(&args)
            .output()
            .await?;
        if !out.status.success() {
            return Err(EngineError::CommandFailed {
                command,
                code: out.status.code(),
            }
            .into());
        }
        Ok(())
    }

    async fn predict(&self, job: PredictJob) -> HsResult<String> {
        let predictor = self.toolchain.predict()?;
        let args = vec![
            "-b".to_string(),
            flag(job.probability),
            job.test_path.display().to_string(),
            job.model_path.display().to_string(),
            job.predict_path.display().to_string(),
        ];
        let command = render_command(&predictor.display().to_string(), &args);
        debug!(%command, "scoring test set");

        let out = tokio::process::Command::new(predictor)
            .args(&args)
            .output()
            .await?;
        if !out.status.success() {
            return Err(EngineError::CommandFailed {
                command,
                code: out.status.code(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

fn flag(on: bool) -> String {
    if on { "1" } else { "0" }.to_string()
}

fn render_command(program: &str, args: &[String]) -> String {
    format!("{} {}", program, args.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_command_matches_the_trainer_template() {
        let args = vec![
            "-b".to_string(),
            "0".to_string(),
            "-t".to_string(),
            "3".to_string(),
            "-m".to_string(),
            "1000".to_string(),
            "-c".to_string(),
            "0.5".to_string(),
            "-g".to_string(),
            "2".to_string(),
            "-v".to_string(),
            "8".to_string(),
            "train.svm".to_string(),
        ];
        assert_eq!(
            render_command("svm-train", &args),
            "svm-train -b 0 -t 3 -m 1000 -c 0.5 -g 2 -v 8 train.svm"
        );
    }

    #[test]
    fn probability_flag_renders_as_zero_or_one() {
        assert_eq!(flag(false), "0");
        assert_eq!(flag(true), "1");
    }
}

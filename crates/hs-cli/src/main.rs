//! HyperSweep CLI: grid search for svm hyperparameters driven by the
//! external libsvm toolchain.
//!
//! NOTE: `svm-train` (and `svm-predict` / `svm-scale` when used) must be on
//! your PATH, so you may call with:
//!
//!     PATH=/dir/containing/libsvm:$PATH hypersweep ...

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use hs_data::{split_dataset, Scaler, ToolChain, DEFAULT_SPLIT_SEED};
use hs_engine::SweepEngine;
use hs_types::{
    default_prefix, ConfigError, ExponentRange, Kernel, SweepConfig, DEFAULT_COST_RANGE,
    DEFAULT_FOLDS, DEFAULT_GAMMA_RANGE,
};

#[derive(Parser, Debug)]
#[command(name = "hypersweep")]
#[command(about = "Grid search for svm hyperparameters via the external libsvm toolchain")]
#[command(version)]
struct Cli {
    /// Training-set path
    train: PathBuf,

    /// Held-out test-set path (omit to stop after parameter selection)
    test: Option<PathBuf>,

    /// Kernel: one of linear/polynomial/rbf/sigmoid
    #[arg(long, default_value = "rbf")]
    kernel: Kernel,

    /// log2 range of C values in start:stop:step format
    #[arg(long = "c-range", default_value = DEFAULT_COST_RANGE, allow_hyphen_values = true)]
    c_range: ExponentRange,

    /// log2 range of gamma values in start:stop:step format
    #[arg(long = "g-range", default_value = DEFAULT_GAMMA_RANGE, allow_hyphen_values = true)]
    g_range: ExponentRange,

    /// Number of concurrent evaluation jobs (defaults to the core count)
    #[arg(long = "n-workers")]
    n_workers: Option<usize>,

    /// Where to send results (defaults to the training path minus extension)
    #[arg(long)]
    out_prefix: Option<PathBuf>,

    /// Fold count for cross-validation on the training set
    #[arg(long = "x-fold", default_value_t = DEFAULT_FOLDS)]
    x_fold: u32,

    /// Rescale the dataset(s) with svm-scale before training
    #[arg(long)]
    scale: bool,

    /// Randomly split the training file into train/test halves; --split 0.8
    /// trains on 80% of the lines. Used instead of supplying a test file.
    #[arg(long)]
    split: Option<f64>,

    /// Seed for the random split
    #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
    split_seed: u64,

    /// Store predictions as class-1 probabilities and compute ROC/AUC
    #[arg(short = 'b', long)]
    probability: bool,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level.to_string())),
        )
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    if !cli.train.exists() {
        return Err(ConfigError::TrainingSetNotFound {
            path: cli.train.display().to_string(),
        }
        .into());
    }
    if let Some(test) = &cli.test {
        if !test.exists() {
            return Err(ConfigError::TestSetNotFound {
                path: test.display().to_string(),
            }
            .into());
        }
    }
    if cli.split.is_some() && cli.test.is_some() {
        return Err(ConfigError::SplitWithTestSet.into());
    }

    // Fail fast before any job is dispatched.
    let toolchain = ToolChain::discover()?;

    // The prefix is derived from the original training path, before any
    // .scale/.split derivatives replace it.
    let out_prefix = cli
        .out_prefix
        .clone()
        .unwrap_or_else(|| default_prefix(&cli.train));

    let mut train = cli.train.clone();
    let mut test = cli.test.clone();
    if cli.scale {
        let scaler = Scaler::new(toolchain.scale()?.clone());
        let (scaled_train, scaled_test) =
            scaler.scale(&train, test.as_deref(), &out_prefix).await?;
        train = scaled_train;
        test = scaled_test;
    }
    if let Some(fraction) = cli.split {
        let (split_train, split_test) = split_dataset(&train, fraction, cli.split_seed)?;
        train = split_train;
        test = Some(split_test);
    }

    let mut config = SweepConfig::new(train)
        .with_kernel(cli.kernel)
        .with_ranges(cli.c_range, cli.g_range)
        .with_folds(cli.x_fold)
        .with_probability(cli.probability)
        .with_out_prefix(out_prefix);
    if let Some(n_workers) = cli.n_workers {
        config = config.with_workers(n_workers);
    }
    if let Some(test) = test {
        config = config.with_test_path(test);
    }
    config.validate()?;

    let engine = SweepEngine::with_toolchain(config, toolchain);
    let outcome = engine.run().await?;

    println!(
        "Best Cross Validation Accuracy: {:.2} with parameters c:{}, g:{}",
        outcome.best.score, outcome.best.candidate.cost, outcome.best.candidate.gamma
    );
    println!(
        "wrote all params and accuracies to: {}",
        engine.config().params_path().display()
    );

    if let Some(final_outcome) = engine.finalize(&outcome.best).await? {
        println!("Saved model file to {}", final_outcome.model_path.display());
        println!("{}", final_outcome.predictor_output.trim());
        if let Some(roc) = final_outcome.roc {
            println!("AUC: {}", roc.auc);
        }
    }
    Ok(())
}

use thiserror::Error;

/// Main error type for the HyperSweep system
#[derive(Error, Debug)]
pub enum HsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment error: {0}")]
    Env(#[from] EnvError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors detected while assembling or validating a sweep configuration.
/// All of these are fatal before any work starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed range '{input}': {reason}")]
    MalformedRange { input: String, reason: String },

    #[error("unknown kernel '{name}', expected one of linear/polynomial/rbf/sigmoid")]
    UnknownKernel { name: String },

    #[error("training set not found: {path}")]
    TrainingSetNotFound { path: String },

    #[error("test set not found: {path}")]
    TestSetNotFound { path: String },

    #[error("--split cannot be combined with an explicit test set")]
    SplitWithTestSet,

    #[error("cross-validation fold count must be at least 2, got {folds}")]
    BadFoldCount { folds: u32 },

    #[error("split fraction must be strictly between 0 and 1, got {fraction}")]
    BadSplitFraction { fraction: f64 },

    #[error("worker count must be nonzero")]
    ZeroWorkers,
}

/// Errors about the host environment, checked once before any job is
/// dispatched.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("{binary} not found on PATH (also tried ./ and ../)")]
    BinaryNotFound { binary: String },
}

/// Errors from the dataset collaborators (scaling, splitting).
#[derive(Error, Debug)]
pub enum DataError {
    #[error("dataset not found: {path}")]
    DatasetNotFound { path: String },

    #[error("scaling {path} failed: {message}")]
    ScaleFailed { path: String, message: String },

    #[error("splitting {path} failed: {message}")]
    SplitFailed { path: String, message: String },
}

/// Errors raised by the sweep engine itself.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no cross-validation results were collected; cannot select best parameters")]
    NoResults,

    #[error("command `{command}` exited with status {code:?}")]
    CommandFailed { command: String, code: Option<i32> },

    #[error("worker task failed: {message}")]
    WorkerFailed { message: String },
}

/// Errors from final-stage metric computation. Unlike cross-validation
/// parsing, these are never swallowed.
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("malformed prediction at line {line_no}: '{line}'")]
    MalformedPrediction { line_no: usize, line: String },

    #[error("malformed label at line {line_no}: '{line}'")]
    MalformedLabel { line_no: usize, line: String },

    #[error("label/score length mismatch: {labels} labels vs {scores} scores")]
    LengthMismatch { labels: usize, scores: usize },

    #[error("degenerate ROC input: {positives} positives, {negatives} negatives in test set")]
    DegenerateInput { positives: usize, negatives: usize },
}

/// Result type alias for HyperSweep operations
pub type HsResult<T> = Result<T, HsError>;

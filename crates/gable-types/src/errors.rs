use thiserror::Error;

/// Main error type for the Gable pipeline
#[derive(Error, Debug)]
pub enum GableError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Sweep error: {0}")]
    Sweep(#[from] SweepError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Dataset loading and splitting errors
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Dataset file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid dataset format: {message}")]
    InvalidFormat { message: String },

    #[error("Empty dataset: {path}")]
    Empty { path: String },

    #[error("Row {row} has {got} columns, expected {expected}")]
    ColumnCountMismatch {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("Non-numeric value in row {row}, column {column}: {value}")]
    NonNumericValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Split fraction out of range: {fraction}")]
    InvalidFraction { fraction: f64 },

    #[error("Not enough rows to split: have {rows}, need at least {minimum}")]
    InsufficientRows { rows: usize, minimum: usize },
}

/// Model fitting, scoring, and artifact errors
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid hyperparameter {parameter}: {message}")]
    InvalidHyperparameter { parameter: String, message: String },

    #[error("Model has not been fitted")]
    NotFitted,

    #[error("Feature width mismatch: model expects {expected} features, got {got}")]
    FeatureWidthMismatch { expected: usize, got: usize },

    #[error("Training data is empty")]
    EmptyTrainingData,

    #[error("Feature/target length mismatch: {features} rows vs {targets} targets")]
    LengthMismatch { features: usize, targets: usize },

    #[error("Model artifact not found: {path}")]
    ArtifactNotFound { path: String },

    #[error("Model artifact unreadable: {message}")]
    ArtifactCorrupt { message: String },
}

/// Sweep result parsing and selection errors
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Results directory not found: {path}")]
    ResultsDirNotFound { path: String },

    #[error("Malformed hyperparameter JSON in {file}: {message}")]
    MalformedRecord { file: String, message: String },

    #[error("Non-numeric score in {file}: {text}")]
    MalformedScore { file: String, text: String },

    #[error("Best hyperparameters file not found: {path}")]
    MissingHyperparams { path: String },

    #[error("Result file unreadable: {file}: {message}")]
    Unreadable { file: String, message: String },
}

/// Result type alias for Gable operations
pub type GableResult<T> = Result<T, GableError>;

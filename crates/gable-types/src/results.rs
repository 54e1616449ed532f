//! Scored sweep results and the result-file line markers.

use serde::{Deserialize, Serialize};

use crate::hyperparams::HyperparamRecord;

/// Suffix a file must carry to be considered a result file.
pub const RESULT_FILE_SUFFIX: &str = ".txt";

/// Line prefix introducing the hyperparameter JSON object.
pub const HYPERPARAMS_MARKER: &str = "Hyperparameters:";

/// Accepted score-line markers. Historical result files carry a misspelled
/// variant ("Vaildation"), so matching is against a set rather than one
/// literal. New spellings get appended here if output drifts again.
pub const SCORE_MARKERS: &[&str] = &[
    "R2 score on Validation Set:",
    "R2 score on Vaildation Set:",
];

/// The marker new result files are written with.
pub const CANONICAL_SCORE_MARKER: &str = "R2 score on Validation Set:";

/// One tuning run's outcome: a hyperparameter record plus its validation
/// score. Immutable after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub record: HyperparamRecord,
    pub r2: f64,
    /// File the result was parsed from, for reporting.
    pub source: String,
}

impl ScoredResult {
    pub fn new(record: HyperparamRecord, r2: f64, source: impl Into<String>) -> Self {
        Self {
            record,
            r2,
            source: source.into(),
        }
    }
}

/// Render the canonical two-line result file body for a tuning run.
pub fn format_result_file(record_json: &str, r2: f64) -> String {
    format!("{HYPERPARAMS_MARKER} {record_json}\n{CANONICAL_SCORE_MARKER} {r2}\n")
}

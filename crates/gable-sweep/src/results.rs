//! Result-file parsing: one `ScoredResult` per well-formed tuning output.

use std::path::Path;

use gable_types::{
    GableResult, HyperparamRecord, ScoredResult, SweepError, HYPERPARAMS_MARKER,
    RESULT_FILE_SUFFIX, SCORE_MARKERS,
};

/// How malformed result files are treated.
///
/// The pipeline default is [`Lenient`](ParsePolicy::Lenient): a bad file is
/// logged and skipped, and the rest of the directory still contributes.
/// [`Strict`](ParsePolicy::Strict) aborts the whole pass on the first
/// unreadable or malformed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePolicy {
    Strict,
    Lenient,
}

/// Parse one result file.
///
/// Returns `Ok(None)` when the file is readable but does not contain both a
/// hyperparameter line and a score line; such files contribute nothing under
/// either policy.
pub fn parse_result_file<P: AsRef<Path>>(path: P) -> GableResult<Option<ScoredResult>> {
    let path = path.as_ref();
    let file_name = path.display().to_string();

    let contents = std::fs::read_to_string(path).map_err(|e| SweepError::Unreadable {
        file: file_name.clone(),
        message: e.to_string(),
    })?;

    let mut record: Option<HyperparamRecord> = None;
    let mut r2: Option<f64> = None;

    for line in contents.lines() {
        let line = line.trim();
        if let Some(json) = line.strip_prefix(HYPERPARAMS_MARKER) {
            record = Some(serde_json::from_str(json.trim()).map_err(|e| {
                SweepError::MalformedRecord {
                    file: file_name.clone(),
                    message: e.to_string(),
                }
            })?);
        } else if let Some(marker) = SCORE_MARKERS.iter().find(|m| line.contains(*m)) {
            let text = line
                .rsplit(*marker)
                .next()
                .unwrap_or_default()
                .trim();
            r2 = Some(text.parse().map_err(|_| SweepError::MalformedScore {
                file: file_name.clone(),
                text: text.to_string(),
            })?);
        }
    }

    match (record, r2) {
        (Some(record), Some(r2)) => Ok(Some(ScoredResult::new(record, r2, file_name))),
        _ => Ok(None),
    }
}

/// Collect scored results from every `.txt` file in `dir`.
///
/// Output order follows directory listing order, which is not contractually
/// sorted; the selector's stable sort is what imposes ranking.
pub fn collect_results<P: AsRef<Path>>(
    dir: P,
    policy: ParsePolicy,
) -> GableResult<Vec<ScoredResult>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(SweepError::ResultsDirNotFound {
            path: dir.display().to_string(),
        }
        .into());
    }

    let mut results = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.ends_with(RESULT_FILE_SUFFIX) || !path.is_file() {
            continue;
        }

        match parse_result_file(&path) {
            Ok(Some(result)) => {
                tracing::debug!(file = %name, r2 = result.r2, "Parsed result file");
                results.push(result);
            }
            Ok(None) => {
                tracing::debug!(file = %name, "Result file incomplete, skipping");
            }
            Err(e) => match policy {
                ParsePolicy::Strict => return Err(e),
                ParsePolicy::Lenient => {
                    tracing::warn!(file = %name, error = %e, "Skipping malformed result file");
                }
            },
        }
    }

    tracing::info!(count = results.len(), dir = %dir.display(), "Collected sweep results");
    Ok(results)
}

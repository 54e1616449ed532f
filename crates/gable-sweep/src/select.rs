//! Best-hyperparameter selection: strict arg-max on validation score.

use std::path::Path;

use gable_types::{GableResult, ScoredResult};

/// Stable descending sort by score; ties keep discovery order.
pub fn rank_results(results: &mut [ScoredResult]) {
    results.sort_by(|a, b| b.r2.partial_cmp(&a.r2).unwrap_or(std::cmp::Ordering::Equal));
}

/// Rank the result set and persist the winner's record as JSON.
///
/// Returns `None` without writing anything when the set is empty. The
/// output file is overwritten on every run, so re-running on the same set
/// is idempotent.
pub fn select_best<P: AsRef<Path>>(
    mut results: Vec<ScoredResult>,
    out_path: P,
) -> GableResult<Option<ScoredResult>> {
    if results.is_empty() {
        tracing::info!("No valid results found");
        return Ok(None);
    }

    rank_results(&mut results);
    let best = results.swap_remove(0);
    best.record.to_json_file(&out_path)?;
    tracing::info!(
        r2 = best.r2,
        record = %best.record,
        path = %out_path.as_ref().display(),
        "Selected best hyperparameters"
    );
    Ok(Some(best))
}

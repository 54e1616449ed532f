//! Tabular dataset loading from CSV.

use std::path::Path;

use gable_types::{DataError, GableResult};

/// A tabular regression dataset: numeric feature columns plus one
/// continuous target column (the last CSV column).
#[derive(Debug, Clone)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    /// Row-major feature matrix.
    pub features: Vec<Vec<f64>>,
    pub target: Vec<f64>,
}

impl Dataset {
    /// Load a dataset from a headered CSV file.
    ///
    /// The layout follows the California-housing export: every column is
    /// numeric, and the final column is the regression target.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> GableResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::InvalidFormat {
            message: format!("{}: {e}", path.display()),
        })?;

        let headers = reader
            .headers()
            .map_err(|e| DataError::InvalidFormat {
                message: format!("missing header row: {e}"),
            })?
            .clone();
        if headers.len() < 2 {
            return Err(DataError::InvalidFormat {
                message: format!(
                    "need at least one feature column and a target column, got {} columns",
                    headers.len()
                ),
            }
            .into());
        }
        let n_columns = headers.len();
        let feature_names: Vec<String> = headers
            .iter()
            .take(n_columns - 1)
            .map(|h| h.to_string())
            .collect();

        let mut features = Vec::new();
        let mut target = Vec::new();

        for (row_idx, record) in reader.records().enumerate() {
            let record = record.map_err(|e| DataError::InvalidFormat {
                message: format!("row {row_idx}: {e}"),
            })?;
            if record.len() != n_columns {
                return Err(DataError::ColumnCountMismatch {
                    row: row_idx,
                    got: record.len(),
                    expected: n_columns,
                }
                .into());
            }

            let mut row = Vec::with_capacity(n_columns - 1);
            for (col_idx, value) in record.iter().enumerate() {
                let parsed: f64 = value.trim().parse().map_err(|_| DataError::NonNumericValue {
                    row: row_idx,
                    column: headers[col_idx].to_string(),
                    value: value.to_string(),
                })?;
                if col_idx == n_columns - 1 {
                    target.push(parsed);
                } else {
                    row.push(parsed);
                }
            }
            features.push(row);
        }

        if features.is_empty() {
            return Err(DataError::Empty {
                path: path.display().to_string(),
            }
            .into());
        }

        Ok(Self {
            feature_names,
            features,
            target,
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }
}

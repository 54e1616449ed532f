//! Hyperparameter grid enumeration and Kubernetes job manifest emission.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gable_types::{GableError, GableResult, HyperparamRecord};

/// The four sweep axes. The reference grid carries two values per axis,
/// giving 16 combinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyperparamGrid {
    pub n_estimators: Vec<usize>,
    pub max_depth: Vec<Option<usize>>,
    pub min_samples_split: Vec<usize>,
    pub min_samples_leaf: Vec<usize>,
}

impl Default for HyperparamGrid {
    fn default() -> Self {
        Self {
            n_estimators: vec![50, 100],
            max_depth: vec![Some(5), Some(10)],
            min_samples_split: vec![2, 5],
            min_samples_leaf: vec![1, 2],
        }
    }
}

impl HyperparamGrid {
    pub fn grid_size(&self) -> usize {
        self.n_estimators.len()
            * self.max_depth.len()
            * self.min_samples_split.len()
            * self.min_samples_leaf.len()
    }

    /// Cartesian product of the four axes, in axis order: the last axis
    /// varies fastest.
    pub fn combinations(&self) -> Vec<HyperparamRecord> {
        let mut combos = Vec::with_capacity(self.grid_size());
        for &n_estimators in &self.n_estimators {
            for &max_depth in &self.max_depth {
                for &min_samples_split in &self.min_samples_split {
                    for &min_samples_leaf in &self.min_samples_leaf {
                        combos.push(HyperparamRecord {
                            n_estimators,
                            max_depth,
                            min_samples_split,
                            min_samples_leaf,
                        });
                    }
                }
            }
        }
        combos
    }
}

/// Render a record as the tuning CLI flags a job container runs with.
pub fn record_to_args(record: &HyperparamRecord) -> Vec<String> {
    let mut args = vec![format!("--n_estimators={}", record.n_estimators)];
    if let Some(depth) = record.max_depth {
        args.push(format!("--max_depth={depth}"));
    }
    args.push(format!("--min_samples_split={}", record.min_samples_split));
    args.push(format!("--min_samples_leaf={}", record.min_samples_leaf));
    args
}

// ---------------------------------------------------------------------------
// Kubernetes batch/v1 Job manifest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobManifest {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: JobMetadata,
    pub spec: JobSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMetadata {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    pub template: PodTemplate,
    #[serde(rename = "backoffLimit")]
    pub backoff_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodTemplate {
    pub spec: PodSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodSpec {
    pub containers: Vec<Container>,
    #[serde(rename = "restartPolicy")]
    pub restart_policy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub args: Vec<String>,
}

impl JobManifest {
    /// Build one tuning-job manifest for a grid combination.
    pub fn for_record(name: &str, image: &str, record: &HyperparamRecord) -> Self {
        Self {
            api_version: "batch/v1".to_string(),
            kind: "Job".to_string(),
            metadata: JobMetadata {
                name: name.to_string(),
            },
            spec: JobSpec {
                template: PodTemplate {
                    spec: PodSpec {
                        containers: vec![Container {
                            name: "house-price-container".to_string(),
                            image: image.to_string(),
                            command: vec!["gable-train".to_string(), "tune".to_string()],
                            args: record_to_args(record),
                        }],
                        restart_policy: "Never".to_string(),
                    },
                },
                backoff_limit: 4,
            },
        }
    }
}

/// Emit one YAML manifest per grid combination into `output_dir`.
///
/// Job names carry a sequential index (`hp-tuning-jobs-<idx>`), so no two
/// jobs in a run share a name. Returns the written paths in emission order.
pub fn emit_jobs<P: AsRef<Path>>(
    grid: &HyperparamGrid,
    image: &str,
    output_dir: P,
) -> GableResult<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for (idx, record) in grid.combinations().iter().enumerate() {
        let job_name = format!("hp-tuning-jobs-{idx}");
        let manifest = JobManifest::for_record(&job_name, image, record);
        let yaml = serde_yaml::to_string(&manifest)
            .map_err(|e| GableError::Internal(format!("YAML serialization failed: {e}")))?;

        let path = output_dir.join(format!("{job_name}.yaml"));
        std::fs::write(&path, yaml)?;
        tracing::info!(path = %path.display(), "Generated job manifest");
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_grid_has_sixteen_combinations() {
        let grid = HyperparamGrid::default();
        assert_eq!(grid.grid_size(), 16);
        assert_eq!(grid.combinations().len(), 16);
    }

    #[test]
    fn combinations_are_unique() {
        let combos = HyperparamGrid::default().combinations();
        for (i, a) in combos.iter().enumerate() {
            for b in &combos[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn args_carry_all_four_flags() {
        let record = HyperparamRecord {
            n_estimators: 50,
            max_depth: Some(5),
            min_samples_split: 2,
            min_samples_leaf: 1,
        };
        let args = record_to_args(&record);
        assert_eq!(
            args,
            vec![
                "--n_estimators=50",
                "--max_depth=5",
                "--min_samples_split=2",
                "--min_samples_leaf=1"
            ]
        );
    }

    #[test]
    fn unbounded_depth_omits_the_flag() {
        let record = HyperparamRecord::default();
        let args = record_to_args(&record);
        assert!(!args.iter().any(|a| a.starts_with("--max_depth")));
    }

    #[test]
    fn emits_one_uniquely_named_manifest_per_combination() {
        let dir = tempfile::tempdir().unwrap();
        let written = emit_jobs(
            &HyperparamGrid::default(),
            "house-price-model:v1",
            dir.path(),
        )
        .unwrap();

        assert_eq!(written.len(), 16);
        let mut names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 16);
        assert!(written[0].exists());
    }

    #[test]
    fn manifest_yaml_round_trips() {
        let record = HyperparamRecord {
            n_estimators: 50,
            max_depth: Some(10),
            min_samples_split: 5,
            min_samples_leaf: 2,
        };
        let manifest = JobManifest::for_record("hp-tuning-jobs-3", "house-price-model:v1", &record);
        let yaml = serde_yaml::to_string(&manifest).unwrap();
        assert!(yaml.contains("apiVersion: batch/v1"));
        assert!(yaml.contains("restartPolicy: Never"));
        assert!(yaml.contains("backoffLimit: 4"));

        let back: JobManifest = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(manifest, back);
    }
}

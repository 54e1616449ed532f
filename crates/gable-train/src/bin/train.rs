//! `gable-train`: run a tuning combination or fit the final model.
//!
//! ```bash
//! # Tuning run (one grid combination)
//! gable-train tune --data data/california_housing.csv \
//!     --n_estimators 50 --max_depth 10 --min_samples_split 2 --min_samples_leaf 1
//!
//! # Final run (requires best_hyperparams.json)
//! gable-train final --data data/california_housing.csv
//! ```

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gable_data::prepare_dataset;
use gable_train::{final_run, tuning_run};
use gable_types::{
    HyperparamRecord, CANONICAL_SCORE_MARKER, BEST_HYPERPARAMS_PATH, HYPERPARAMS_MARKER,
    MODEL_ARTIFACT_PATH,
};

#[derive(Parser, Debug)]
#[command(name = "gable-train", about = "Random-forest training for house prices")]
struct Cli {
    /// Path to the housing dataset CSV.
    #[arg(long, default_value = "data/california_housing.csv", global = true)]
    data: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit one hyperparameter combination and write its result file.
    Tune(TuneArgs),
    /// Fit the final model with the selected hyperparameters.
    Final(FinalArgs),
}

#[derive(Args, Debug)]
struct TuneArgs {
    /// Number of trees.
    #[arg(long = "n_estimators", default_value_t = 100)]
    n_estimators: usize,

    /// Maximum depth of the tree (unbounded when omitted).
    #[arg(long = "max_depth")]
    max_depth: Option<usize>,

    /// Minimum number of samples required to split an internal node.
    #[arg(long = "min_samples_split", default_value_t = 2)]
    min_samples_split: usize,

    /// Minimum number of samples required to be at a leaf node.
    #[arg(long = "min_samples_leaf", default_value_t = 1)]
    min_samples_leaf: usize,

    /// Where to write the two-line result file.
    #[arg(long, default_value = "results.txt")]
    out: String,
}

#[derive(Args, Debug)]
struct FinalArgs {
    /// Best-hyperparameters file produced by `gable-select`.
    #[arg(long, default_value = BEST_HYPERPARAMS_PATH)]
    hyperparams: String,

    /// Where to persist the fitted model artifact.
    #[arg(long = "model-out", default_value = MODEL_ARTIFACT_PATH)]
    model_out: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let split = prepare_dataset(&cli.data)?;

    match cli.command {
        Command::Tune(args) => {
            let record = HyperparamRecord {
                n_estimators: args.n_estimators,
                max_depth: args.max_depth,
                min_samples_split: args.min_samples_split,
                min_samples_leaf: args.min_samples_leaf,
            };
            record.validate()?;

            let outcome = tuning_run(&split, &record, &args.out)?;
            println!("{CANONICAL_SCORE_MARKER} {}", outcome.validation_r2);
            println!("{HYPERPARAMS_MARKER} {}", outcome.record.to_json()?);
        }
        Command::Final(args) => {
            // Missing hyperparameters are a required precondition, not a
            // fallback case: propagate and exit non-zero.
            let record = HyperparamRecord::from_json_file(&args.hyperparams)?;
            record.validate()?;

            let outcome = final_run(&split, &record, &args.model_out)?;
            println!("R2 score on Test Set: {}", outcome.test_r2);
            println!("Final model saved as '{}'", args.model_out);
        }
    }

    Ok(())
}

//! `gable-select`: rank sweep result files and persist the winning
//! hyperparameter record.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gable_sweep::{collect_results, select_best, ParsePolicy};
use gable_types::BEST_HYPERPARAMS_PATH;

#[derive(Parser, Debug)]
#[command(name = "gable-select", about = "Pick the best tuning run by validation R²")]
struct Cli {
    /// Directory holding per-run result files.
    #[arg(long, default_value = "./results")]
    results_dir: String,

    /// Where to write the winning hyperparameter record.
    #[arg(long, default_value = BEST_HYPERPARAMS_PATH)]
    out: String,

    /// Abort on the first malformed result file instead of skipping it.
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let policy = if cli.strict {
        ParsePolicy::Strict
    } else {
        ParsePolicy::Lenient
    };

    let results = collect_results(&cli.results_dir, policy)?;
    match select_best(results, &cli.out)? {
        Some(best) => {
            println!("Best Hyperparameters: {}", best.record.to_json()?);
            println!("Best R2 score on Validation Set: {}", best.r2);
            println!("Best hyperparameters saved to '{}'", cli.out);
        }
        None => {
            println!("No valid results found.");
        }
    }

    Ok(())
}

//! `gable-jobs`: emit one Kubernetes job manifest per hyperparameter grid
//! combination.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gable_sweep::{emit_jobs, HyperparamGrid};

#[derive(Parser, Debug)]
#[command(name = "gable-jobs", about = "Generate tuning job manifests")]
struct Cli {
    /// Directory the YAML manifests are written into.
    #[arg(long, default_value = "generated_jobs")]
    output_dir: String,

    /// Container image the jobs run.
    #[arg(long, default_value = "house-price-model:v1")]
    image: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let grid = HyperparamGrid::default();
    let written = emit_jobs(&grid, &cli.image, &cli.output_dir)?;

    for path in &written {
        println!("Generated {}", path.display());
    }
    println!(
        "All {} job YAML files generated in '{}' directory.",
        written.len(),
        cli.output_dir
    );

    Ok(())
}

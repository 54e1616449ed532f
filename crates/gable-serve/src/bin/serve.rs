//! `gable-serve`: load the persisted model and answer predictions.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use gable_model::ModelArtifact;
use gable_serve::serve;
use gable_types::MODEL_ARTIFACT_PATH;

#[derive(Parser, Debug)]
#[command(name = "gable-serve", about = "House-price prediction service")]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: String,

    /// Path to the persisted model artifact.
    #[arg(long, default_value = MODEL_ARTIFACT_PATH)]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let artifact = Arc::new(ModelArtifact::load(&cli.model)?);
    tracing::info!(
        model = %cli.model,
        features = artifact.n_features(),
        "Loaded model artifact"
    );

    let listener = TcpListener::bind(&cli.addr).await?;
    println!("Gable prediction service listening on {}", cli.addr);

    serve(listener, artifact).await?;
    Ok(())
}

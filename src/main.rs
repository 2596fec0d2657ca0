//! Service entry point: initialise logging, load configuration, load the
//! pipeline artifact, publish it, and serve until interrupted. A missing or
//! malformed artifact aborts startup with a non-zero exit code; the service
//! never accepts traffic without a valid model.

use clap::Parser;
use entretien_api::artifact::PipelineArtifact;
use entretien_api::config::ServiceConfig;
use entretien_api::error::StartupError;
use entretien_api::handlers::AppState;
use entretien_api::server;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();
  let config = ServiceConfig::parse();
  match run(config).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!(error = %err, "startup failed, refusing to serve traffic");
      ExitCode::FAILURE
    }
  }
}

async fn run(config: ServiceConfig) -> Result<(), StartupError> {
  info!(path = %config.model_path.display(), "loading pipeline artifact");
  let artifact = PipelineArtifact::load(&config.model_path)?;
  info!(
    format_version = artifact.format_version,
    feature_width = artifact.transform.width(),
    threshold = artifact.threshold,
    "pipeline artifact ready"
  );
  let bind = config.bind;
  let state = AppState::new(artifact, config);
  server::serve(state, bind, shutdown_signal()).await?;
  info!("service stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(err) = tokio::signal::ctrl_c().await {
    error!(error = %err, "failed to listen for shutdown signal");
  }
}

//! # Service Configuration
//!
//! Startup configuration, populated from CLI flags with environment-variable
//! fallbacks. Everything has a sensible default; only a deployment that moves
//! the artifact or changes resource limits needs to set anything.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Configuration for one service process.
#[derive(Debug, Clone, Parser)]
#[command(
  name = "entretien-api",
  version,
  about = "Service de prédiction du succès d'un entretien d'embauche"
)]
pub struct ServiceConfig {
  /// Path to the serialized pipeline artifact.
  #[arg(long, env = "ENTRETIEN_MODEL_PATH", default_value = "model/pipeline_entretien.json")]
  pub model_path: PathBuf,

  /// Address the HTTP listener binds to.
  #[arg(long, env = "ENTRETIEN_BIND", default_value = "127.0.0.1:8000")]
  pub bind: SocketAddr,

  /// Maximum number of records accepted in one batch request.
  #[arg(long, env = "ENTRETIEN_MAX_BATCH", default_value_t = 100)]
  pub max_batch_size: usize,

  /// Maximum request body size in bytes.
  #[arg(long, default_value_t = 1024 * 1024)]
  pub max_body_bytes: usize,

  /// Reject records that carry unknown fields instead of ignoring them.
  #[arg(long, default_value_t = false)]
  pub strict_fields: bool,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      model_path: PathBuf::from("model/pipeline_entretien.json"),
      bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
      max_batch_size: 100,
      max_body_bytes: 1024 * 1024,
      strict_fields: false,
    }
  }
}

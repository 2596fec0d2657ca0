//! # entretien-api
//!
//! Prediction-serving core for interview-success scoring. The service loads
//! one immutable, pre-fit preprocessing-plus-classifier pipeline at startup
//! and exposes it over two request types (single and batch prediction) with
//! declarative input validation, structured success/error responses, and a
//! machine-readable interface description.
//!
//! ## Architecture
//!
//! - [`artifact`]: loads and shape-checks the serialized pipeline bundle;
//!   the two fitted stages are composed behind small traits.
//! - [`schema`]: the per-field constraint table, single source of truth for
//!   both validation and the served interface description.
//! - [`validate`]: evaluates the table over raw JSON, collecting every
//!   violation before reporting.
//! - [`inference`]: pure, deterministic scoring over the shared artifact.
//! - [`handlers`] / [`server`]: request orchestration and the accept loop.
//! - [`response`]: the wire shapes for success, error, and batch items.
//!
//! The artifact is published behind an `Arc` before the listener accepts its
//! first connection, and nothing mutates it afterwards: concurrent requests
//! share it lock-free.

#![deny(missing_docs)]

pub mod artifact;
pub mod candidate;
pub mod config;
pub mod error;
pub mod handlers;
pub mod inference;
pub mod response;
pub mod schema;
pub mod server;
pub mod validate;

#[cfg(test)]
mod inference_test;
#[cfg(test)]
pub(crate) mod testutil;
#[cfg(test)]
mod validate_test;

pub use artifact::{PipelineArtifact, PredictStage, TransformStage};
pub use candidate::{CandidateRecord, Diplome, Sexe};
pub use config::ServiceConfig;
pub use error::{ArtifactLoadError, InferenceError, StartupError, ValidationError};
pub use handlers::AppState;
pub use inference::{predict_many, predict_one, Prediction};
pub use response::{BatchItem, ErrorKind, ErrorResponse, PredictionResponse};

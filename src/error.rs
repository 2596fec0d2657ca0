//! # Error Types
//!
//! Error taxonomy for the prediction service:
//!
//! - [`ArtifactLoadError`]: fatal, startup-only. A missing or malformed
//!   pipeline artifact is a deployment problem; the service refuses to start.
//! - [`ValidationError`]: per-request, recoverable. Carries every field
//!   violation so callers can fix all problems in one round trip.
//! - [`InferenceError`]: per-request, recoverable. A validated record the
//!   fitted pipeline still cannot transform (e.g. a category value the
//!   training-time encoding never saw). Reported, never silently defaulted.
//! - [`StartupError`]: umbrella for everything that can abort startup.
//!
//! Per-request errors are isolated: one failing request (or batch item) never
//! affects other requests or the shared artifact.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Error raised while loading the pipeline artifact at startup.
///
/// Never retried: the service exits non-zero instead of serving traffic
/// without a valid artifact.
#[derive(Error, Debug)]
pub enum ArtifactLoadError {
  /// The artifact file does not exist.
  #[error("pipeline artifact not found at '{}'", .path.display())]
  NotFound {
    /// Path that was probed.
    path: PathBuf,
  },
  /// The artifact file exists but could not be read.
  #[error("failed to read pipeline artifact '{}': {source}", .path.display())]
  Io {
    /// Path that was read.
    path: PathBuf,
    /// Underlying I/O error.
    #[source]
    source: std::io::Error,
  },
  /// The artifact file is not valid JSON or misses required keys.
  #[error("pipeline artifact could not be deserialized: {0}")]
  Deserialize(#[from] serde_json::Error),
  /// The artifact deserialized but its transform/classifier shape is
  /// internally inconsistent (wrong coefficient count, zero scale, ...).
  #[error("pipeline artifact is malformed: {0}")]
  Malformed(String),
}

/// A single rejected field: which field, what value, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
  /// Name of the offending field.
  pub field: String,
  /// The rejected value as received (JSON `null` when the field was absent).
  pub value: serde_json::Value,
  /// Human-readable reason for the rejection.
  pub reason: String,
}

impl FieldViolation {
  /// Creates a violation for `field` with the rejected `value` and `reason`.
  pub fn new(field: impl Into<String>, value: serde_json::Value, reason: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      value,
      reason: reason.into(),
    }
  }
}

/// A candidate record failed validation.
///
/// Collects every violation across all fields, not just the first one.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("validation failed: {} field violation(s)", .violations.len())]
pub struct ValidationError {
  /// All violations found in the record, in field declaration order.
  pub violations: Vec<FieldViolation>,
}

impl ValidationError {
  /// Creates a validation error from a list of violations.
  pub fn new(violations: Vec<FieldViolation>) -> Self {
    Self { violations }
  }

  /// Creates a validation error with a single violation.
  pub fn single(field: impl Into<String>, value: serde_json::Value, reason: impl Into<String>) -> Self {
    Self {
      violations: vec![FieldViolation::new(field, value, reason)],
    }
  }
}

/// A validated record could not be pushed through the fitted pipeline.
///
/// Signals a mismatch between the request schema and the artifact's
/// training-time expectations, not a caller mistake.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
  /// A categorical value is not covered by the training-time encoding.
  #[error("value '{value}' of field '{field}' is not covered by the training-time encoding")]
  UnknownCategory {
    /// The categorical field.
    field: String,
    /// The value absent from the fitted encoding.
    value: String,
  },
  /// The artifact references a feature the record does not carry.
  #[error("record does not carry feature '{field}' required by the transform")]
  MissingFeature {
    /// The feature name requested by the artifact.
    field: String,
  },
}

impl InferenceError {
  /// The field the failure is attached to, when there is one.
  pub fn field_name(&self) -> Option<&str> {
    match self {
      Self::UnknownCategory { field, .. } => Some(field),
      Self::MissingFeature { field } => Some(field),
    }
  }
}

/// Everything that can abort service startup.
#[derive(Error, Debug)]
pub enum StartupError {
  /// The pipeline artifact could not be loaded.
  #[error(transparent)]
  Artifact(#[from] ArtifactLoadError),
  /// The listener could not be bound or the accept loop failed.
  #[error("server error: {0}")]
  Io(#[from] std::io::Error),
}

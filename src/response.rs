//! # Response Shapes
//!
//! The caller-facing payloads: the success shape for predictions, the uniform
//! error shape for every recoverable failure, and the per-item shape used in
//! batch responses. All of them serialize with `serde`, matching the wire
//! format documented by the interface description.

use crate::error::{FieldViolation, InferenceError, ValidationError};
use crate::inference::Prediction;
use serde::{Deserialize, Serialize};

/// Successful prediction payload: `{"prediction", "probabilite_retenu"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
  /// Binary class label: 1 = retenu, 0 = non retenu.
  pub prediction: u8,
  /// Probability of the positive class, rounded to 4 decimal places.
  pub probabilite_retenu: f64,
}

impl From<Prediction> for PredictionResponse {
  fn from(prediction: Prediction) -> Self {
    Self {
      prediction: prediction.label,
      probabilite_retenu: round4(prediction.probability),
    }
  }
}

/// Rounds a probability to 4 decimal places for the wire format.
///
/// Applied only at the formatting boundary; the engine keeps full precision.
pub fn round4(value: f64) -> f64 {
  (value * 10_000.0).round() / 10_000.0
}

/// Machine-readable classification of an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  /// The record (or batch envelope) failed validation.
  ValidationError,
  /// A validated record could not be pushed through the pipeline.
  InferenceError,
  /// The request body was not parseable as the expected JSON shape.
  BadRequest,
  /// The request body or batch exceeded a configured limit.
  PayloadTooLarge,
  /// No route matches the requested method and path.
  NotFound,
}

/// Uniform error payload: `{"error_kind", "message", "field"?, "details"?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
  /// Error classification.
  pub error_kind: ErrorKind,
  /// Human-readable summary.
  pub message: String,
  /// The offending field, when the error is attached to exactly one.
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub field: Option<String>,
  /// Every field violation, for validation errors.
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub details: Vec<FieldViolation>,
}

impl ErrorResponse {
  /// Builds the error payload for a failed validation.
  pub fn validation(error: &ValidationError) -> Self {
    let field = match error.violations.as_slice() {
      [only] => Some(only.field.clone()),
      _ => None,
    };
    Self {
      error_kind: ErrorKind::ValidationError,
      message: error.to_string(),
      field,
      details: error.violations.clone(),
    }
  }

  /// Builds the error payload for a failed inference.
  pub fn inference(error: &InferenceError) -> Self {
    Self {
      error_kind: ErrorKind::InferenceError,
      message: error.to_string(),
      field: error.field_name().map(str::to_string),
      details: Vec::new(),
    }
  }

  /// Builds a `bad_request` payload (malformed JSON, wrong top-level shape).
  pub fn bad_request(message: impl Into<String>) -> Self {
    Self {
      error_kind: ErrorKind::BadRequest,
      message: message.into(),
      field: None,
      details: Vec::new(),
    }
  }

  /// Builds a `payload_too_large` payload (body or batch over the limit).
  pub fn payload_too_large(message: impl Into<String>) -> Self {
    Self {
      error_kind: ErrorKind::PayloadTooLarge,
      message: message.into(),
      field: None,
      details: Vec::new(),
    }
  }

  /// Builds the payload for an unmatched route.
  pub fn not_found(path: &str) -> Self {
    Self {
      error_kind: ErrorKind::NotFound,
      message: format!("no route for '{path}'"),
      field: None,
      details: Vec::new(),
    }
  }
}

/// One entry of a batch response: either a prediction or the error that kept
/// this item from producing one. Positionally aligned with the request array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
  /// The item validated and scored successfully.
  Success(PredictionResponse),
  /// The item failed validation or inference; neighbours are unaffected.
  Error(ErrorResponse),
}

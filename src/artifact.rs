//! # Pipeline Artifact
//!
//! The serialized bundle produced by offline training: a fitted feature
//! transform (scaler + categorical encodings) composed with a fitted
//! classifier. The service loads it once at startup, validates its shape, and
//! shares it read-only across all request tasks. It is never mutated or
//! reloaded; a new model means a new deployment.
//!
//! The two stages are expressed as small traits ([`TransformStage`],
//! [`PredictStage`]) composed by [`PipelineArtifact`], so the inference
//! engine never depends on the concrete model family.

use crate::candidate::CandidateRecord;
use crate::error::{ArtifactLoadError, InferenceError};
use crate::schema::{field_spec, FieldKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// The artifact format this build understands.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Converts a validated candidate into the fixed-order numeric feature vector.
pub trait TransformStage {
  /// Encodes and scales `record` exactly as fitted at training time.
  ///
  /// Never re-fits: the same input always yields the same vector.
  fn transform(&self, record: &CandidateRecord) -> Result<Vec<f64>, InferenceError>;
}

/// Scores a feature vector into a positive-class probability.
pub trait PredictStage {
  /// Returns the probability of the positive class, in `[0, 1]`.
  fn predict(&self, features: &[f64]) -> f64;
}

/// Fitted standardization parameters for the numeric features, in
/// `numeric_features` order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedScaler {
  /// Per-feature means learned at training time.
  pub means: Vec<f64>,
  /// Per-feature scales learned at training time (all non-zero).
  pub scales: Vec<f64>,
}

/// The fitted category list for one categorical field.
///
/// The position of a value in `categories` is its one-hot slot; a value
/// absent from the list was never seen at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalEncoding {
  /// Wire name of the categorical field.
  pub field: String,
  /// Training-time categories, in one-hot order.
  pub categories: Vec<String>,
}

/// The deterministic feature-transform stage: standardized numerics followed
/// by one-hot encoded categoricals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureTransform {
  /// Numeric field names, in feature-vector order.
  pub numeric_features: Vec<String>,
  /// Fitted scaler for the numeric features.
  pub scaler: FittedScaler,
  /// Fitted encodings for the categorical fields, in feature-vector order.
  pub categorical_features: Vec<CategoricalEncoding>,
}

impl FeatureTransform {
  /// Width of the produced feature vector.
  pub fn width(&self) -> usize {
    self.numeric_features.len()
      + self
        .categorical_features
        .iter()
        .map(|enc| enc.categories.len())
        .sum::<usize>()
  }
}

impl TransformStage for FeatureTransform {
  fn transform(&self, record: &CandidateRecord) -> Result<Vec<f64>, InferenceError> {
    let mut features = Vec::with_capacity(self.width());
    let scaling = self.scaler.means.iter().zip(&self.scaler.scales);
    for (name, (mean, scale)) in self.numeric_features.iter().zip(scaling) {
      let raw = record
        .numeric_field(name)
        .ok_or_else(|| InferenceError::MissingFeature { field: name.clone() })?;
      features.push((raw - mean) / scale);
    }
    for encoding in &self.categorical_features {
      let value = record
        .categorical_field(&encoding.field)
        .ok_or_else(|| InferenceError::MissingFeature {
          field: encoding.field.clone(),
        })?;
      let hot = encoding
        .categories
        .iter()
        .position(|category| category == value)
        .ok_or_else(|| InferenceError::UnknownCategory {
          field: encoding.field.clone(),
          value: value.to_string(),
        })?;
      for slot in 0..encoding.categories.len() {
        features.push(if slot == hot { 1.0 } else { 0.0 });
      }
    }
    Ok(features)
  }
}

/// The fitted classifier stage.
///
/// Tagged by model family so future artifact formats can carry other
/// classifiers without breaking older readers of the same version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
  /// Logistic regression over the transformed feature vector.
  LogisticRegression {
    /// One weight per feature-vector slot.
    coefficients: Vec<f64>,
    /// Bias term.
    intercept: f64,
  },
}

impl Classifier {
  fn coefficient_count(&self) -> usize {
    match self {
      Classifier::LogisticRegression { coefficients, .. } => coefficients.len(),
    }
  }
}

impl PredictStage for Classifier {
  fn predict(&self, features: &[f64]) -> f64 {
    match self {
      Classifier::LogisticRegression {
        coefficients,
        intercept,
      } => {
        let z = intercept
          + coefficients
            .iter()
            .zip(features)
            .map(|(weight, feature)| weight * feature)
            .sum::<f64>();
        1.0 / (1.0 + (-z).exp())
      }
    }
  }
}

/// The immutable, versioned pipeline bundle: transform + classifier +
/// decision threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
  /// Artifact format version; must match [`ARTIFACT_FORMAT_VERSION`].
  pub format_version: u32,
  /// Optional training timestamp, carried through to the health report.
  #[serde(default)]
  pub trained_at: Option<String>,
  /// The fitted feature-transform stage.
  pub transform: FeatureTransform,
  /// The fitted classifier stage.
  pub classifier: Classifier,
  /// Decision threshold: label = 1 iff probability >= threshold.
  #[serde(default = "default_threshold")]
  pub threshold: f64,
}

fn default_threshold() -> f64 {
  0.5
}

impl PipelineArtifact {
  /// Loads and shape-checks an artifact from `path`.
  ///
  /// Fatal at startup: a missing model is a deployment error, not a
  /// transient condition, so there are no retries.
  pub fn load(path: &Path) -> Result<Self, ArtifactLoadError> {
    let bytes = std::fs::read(path).map_err(|source| {
      if source.kind() == std::io::ErrorKind::NotFound {
        ArtifactLoadError::NotFound {
          path: path.to_path_buf(),
        }
      } else {
        ArtifactLoadError::Io {
          path: path.to_path_buf(),
          source,
        }
      }
    })?;
    let artifact: PipelineArtifact = serde_json::from_slice(&bytes)?;
    artifact.check_shape()?;
    debug!(
      format_version = artifact.format_version,
      width = artifact.transform.width(),
      "pipeline artifact loaded"
    );
    Ok(artifact)
  }

  /// Applies the decision rule to a probability.
  pub fn decide(&self, probability: f64) -> u8 {
    u8::from(probability >= self.threshold)
  }

  /// Verifies the internal consistency of the deserialized bundle.
  fn check_shape(&self) -> Result<(), ArtifactLoadError> {
    if self.format_version != ARTIFACT_FORMAT_VERSION {
      return Err(ArtifactLoadError::Malformed(format!(
        "unsupported format_version {} (expected {})",
        self.format_version, ARTIFACT_FORMAT_VERSION
      )));
    }

    let transform = &self.transform;
    if transform.scaler.means.len() != transform.numeric_features.len()
      || transform.scaler.scales.len() != transform.numeric_features.len()
    {
      return Err(ArtifactLoadError::Malformed(format!(
        "scaler carries {} means / {} scales for {} numeric features",
        transform.scaler.means.len(),
        transform.scaler.scales.len(),
        transform.numeric_features.len()
      )));
    }
    for (name, scale) in transform.numeric_features.iter().zip(&transform.scaler.scales) {
      if !scale.is_finite() || *scale == 0.0 {
        return Err(ArtifactLoadError::Malformed(format!(
          "scale for feature '{name}' is zero or non-finite"
        )));
      }
    }

    let mut seen = HashSet::new();
    for name in &transform.numeric_features {
      match field_spec(name).map(|spec| spec.kind) {
        Some(FieldKind::Integer) | Some(FieldKind::Number) => {}
        _ => {
          return Err(ArtifactLoadError::Malformed(format!(
            "'{name}' is not a known numeric field"
          )));
        }
      }
      if !seen.insert(name.as_str()) {
        return Err(ArtifactLoadError::Malformed(format!(
          "feature '{name}' appears more than once"
        )));
      }
    }
    for encoding in &transform.categorical_features {
      match field_spec(&encoding.field).map(|spec| spec.kind) {
        Some(FieldKind::Enumerated(_)) => {}
        _ => {
          return Err(ArtifactLoadError::Malformed(format!(
            "'{}' is not a known categorical field",
            encoding.field
          )));
        }
      }
      if encoding.categories.is_empty() {
        return Err(ArtifactLoadError::Malformed(format!(
          "encoding for '{}' carries no categories",
          encoding.field
        )));
      }
      if !seen.insert(encoding.field.as_str()) {
        return Err(ArtifactLoadError::Malformed(format!(
          "feature '{}' appears more than once",
          encoding.field
        )));
      }
    }

    let width = transform.width();
    if self.classifier.coefficient_count() != width {
      return Err(ArtifactLoadError::Malformed(format!(
        "classifier carries {} coefficients for a {}-wide feature vector",
        self.classifier.coefficient_count(),
        width
      )));
    }

    if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
      return Err(ArtifactLoadError::Malformed(format!(
        "decision threshold {} is outside [0, 1]",
        self.threshold
      )));
    }
    Ok(())
  }
}

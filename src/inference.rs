//! # Inference Engine
//!
//! Applies the loaded pipeline to validated candidate records. Pure and
//! deterministic: no randomness, no re-fitting, no shared mutable state, so
//! any number of requests can run inference concurrently over the same
//! artifact.

use crate::artifact::{PipelineArtifact, PredictStage, TransformStage};
use crate::candidate::CandidateRecord;
use crate::error::InferenceError;

/// The outcome of scoring one candidate.
///
/// `label` and `probability` are mutually consistent under the artifact's
/// decision threshold: `label == 1` iff `probability >= threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
  /// Binary class label: 1 = retained, 0 = not retained.
  pub label: u8,
  /// Unrounded probability of the positive class, in `[0, 1]`.
  pub probability: f64,
}

/// Scores one validated record through the transform and classifier stages.
pub fn predict_one(
  artifact: &PipelineArtifact,
  record: &CandidateRecord,
) -> Result<Prediction, InferenceError> {
  let features = artifact.transform.transform(record)?;
  let probability = artifact.classifier.predict(&features);
  Ok(Prediction {
    label: artifact.decide(probability),
    probability,
  })
}

/// Scores many records, element-wise.
///
/// Identical to calling [`predict_one`] on each record in order: result `i`
/// describes record `i`, and a failing record never affects its neighbours.
pub fn predict_many(
  artifact: &PipelineArtifact,
  records: &[CandidateRecord],
) -> Vec<Result<Prediction, InferenceError>> {
  records
    .iter()
    .map(|record| predict_one(artifact, record))
    .collect()
}

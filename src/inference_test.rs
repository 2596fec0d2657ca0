//! Tests for the inference engine: determinism, batch/single equivalence,
//! label/probability consistency, and training-time encoding mismatches.

use crate::error::InferenceError;
use crate::inference::{predict_many, predict_one};
use crate::testutil::{fixture_artifact, narrow_artifact, record, strong_candidate, weak_candidate};
use serde_json::json;

#[test]
fn test_strong_candidate_is_retained() {
  let artifact = fixture_artifact();
  let prediction = predict_one(&artifact, &record(&strong_candidate())).expect("prediction");
  assert_eq!(prediction.label, 1);
  assert!(prediction.probability > 0.9);
  assert!(prediction.probability <= 1.0);
}

#[test]
fn test_weak_candidate_is_not_retained() {
  let artifact = fixture_artifact();
  let prediction = predict_one(&artifact, &record(&weak_candidate())).expect("prediction");
  assert_eq!(prediction.label, 0);
  assert!(prediction.probability < 0.1);
  assert!(prediction.probability >= 0.0);
}

#[test]
fn test_inference_is_deterministic() {
  let artifact = fixture_artifact();
  let candidate = record(&strong_candidate());
  let first = predict_one(&artifact, &candidate).expect("first run");
  let second = predict_one(&artifact, &candidate).expect("second run");
  // Bit-identical, not approximately equal.
  assert_eq!(first.probability.to_bits(), second.probability.to_bits());
  assert_eq!(first.label, second.label);
}

#[test]
fn test_batch_matches_single_element_wise() {
  let artifact = fixture_artifact();
  let records = vec![record(&strong_candidate()), record(&weak_candidate())];
  let batch = predict_many(&artifact, &records);
  assert_eq!(batch.len(), 2);
  for (result, single) in batch.iter().zip(records.iter().map(|r| predict_one(&artifact, r))) {
    let batched = result.as_ref().expect("batch prediction");
    let single = single.expect("single prediction");
    assert_eq!(batched.probability.to_bits(), single.probability.to_bits());
    assert_eq!(batched.label, single.label);
  }
}

#[test]
fn test_batch_preserves_order() {
  let artifact = fixture_artifact();
  let records = vec![record(&strong_candidate()), record(&weak_candidate())];
  let batch = predict_many(&artifact, &records);
  assert_eq!(batch[0].as_ref().expect("strong").label, 1);
  assert_eq!(batch[1].as_ref().expect("weak").label, 0);
}

#[test]
fn test_label_is_consistent_with_threshold() {
  let artifact = fixture_artifact();
  for raw in [strong_candidate(), weak_candidate()] {
    let prediction = predict_one(&artifact, &record(&raw)).expect("prediction");
    assert_eq!(prediction.label, u8::from(prediction.probability >= artifact.threshold));
  }
}

#[test]
fn test_artifact_threshold_drives_the_label() {
  let mut raised = fixture_artifact();
  raised.threshold = 0.99;
  let prediction = predict_one(&raised, &record(&strong_candidate())).expect("prediction");
  // High probability, but below the artifact's stricter cutoff.
  assert!(prediction.probability > 0.9);
  assert_eq!(prediction.label, 0);
}

#[test]
fn test_unknown_training_category_is_reported() {
  let artifact = narrow_artifact();
  let mut raw = strong_candidate();
  raw["diplome"] = json!("Doctorat");
  let err = predict_one(&artifact, &record(&raw)).expect_err("Doctorat unseen at training");
  match err {
    InferenceError::UnknownCategory { field, value } => {
      assert_eq!(field, "diplome");
      assert_eq!(value, "Doctorat");
    }
    other => panic!("expected UnknownCategory, got {other:?}"),
  }
}

#[test]
fn test_batch_isolates_failing_records() {
  let artifact = narrow_artifact();
  let mut doctorat = strong_candidate();
  doctorat["diplome"] = json!("Doctorat");
  let records = vec![record(&strong_candidate()), record(&doctorat)];
  let batch = predict_many(&artifact, &records);
  assert!(batch[0].is_ok());
  assert!(batch[1].is_err());
}

//! Shared test fixtures: a small frozen pipeline artifact with hand-picked
//! weights, plus canonical strong/weak candidate payloads.

use crate::artifact::PipelineArtifact;
use crate::candidate::CandidateRecord;
use crate::validate::validate;
use serde_json::{json, Value};

/// The frozen fixture artifact as JSON, shaped exactly like a trainer export.
pub(crate) fn fixture_artifact_json() -> Value {
  json!({
    "format_version": 1,
    "trained_at": "2025-06-01T12:00:00Z",
    "transform": {
      "numeric_features": [
        "age", "note_anglais", "experience", "entreprises_precedentes",
        "distance_km", "score_entretien", "score_competence", "score_personnalite"
      ],
      "scaler": {
        "means": [30.0, 65.0, 6.0, 2.0, 10.0, 6.5, 6.5, 72.0],
        "scales": [8.0, 15.0, 5.0, 1.5, 7.0, 1.5, 1.5, 12.0]
      },
      "categorical_features": [
        { "field": "diplome", "categories": ["BTS", "Licence", "Master", "Doctorat"] },
        { "field": "sexe", "categories": ["M", "F"] }
      ]
    },
    "classifier": {
      "kind": "logistic_regression",
      "coefficients": [0.0, 0.8, 0.5, 0.1, -0.4, 1.2, 1.1, 0.7, -0.9, -0.1, 0.6, 0.8, 0.0, 0.0],
      "intercept": 0.3
    },
    "threshold": 0.5
  })
}

/// Fixture artifact where the diploma encoding never saw `Doctorat`, so a
/// validated record can still fail the transform.
pub(crate) fn narrow_artifact_json() -> Value {
  json!({
    "format_version": 1,
    "transform": {
      "numeric_features": [
        "age", "note_anglais", "experience", "entreprises_precedentes",
        "distance_km", "score_entretien", "score_competence", "score_personnalite"
      ],
      "scaler": {
        "means": [30.0, 65.0, 6.0, 2.0, 10.0, 6.5, 6.5, 72.0],
        "scales": [8.0, 15.0, 5.0, 1.5, 7.0, 1.5, 1.5, 12.0]
      },
      "categorical_features": [
        { "field": "diplome", "categories": ["BTS", "Licence", "Master"] },
        { "field": "sexe", "categories": ["M", "F"] }
      ]
    },
    "classifier": {
      "kind": "logistic_regression",
      "coefficients": [0.0, 0.8, 0.5, 0.1, -0.4, 1.2, 1.1, 0.7, -0.9, -0.1, 0.6, 0.0, 0.0],
      "intercept": 0.3
    }
  })
}

pub(crate) fn fixture_artifact() -> PipelineArtifact {
  serde_json::from_value(fixture_artifact_json()).expect("fixture artifact deserializes")
}

pub(crate) fn narrow_artifact() -> PipelineArtifact {
  serde_json::from_value(narrow_artifact_json()).expect("narrow artifact deserializes")
}

/// A candidate the fixture model scores well above the threshold.
pub(crate) fn strong_candidate() -> Value {
  json!({
    "age": 30,
    "diplome": "BTS",
    "note_anglais": 85,
    "experience": 5,
    "entreprises_precedentes": 2,
    "distance_km": 4.5,
    "score_entretien": 8.2,
    "score_competence": 7.5,
    "score_personnalite": 80,
    "sexe": "F"
  })
}

/// A candidate the fixture model scores far below the threshold.
pub(crate) fn weak_candidate() -> Value {
  json!({
    "age": 24,
    "diplome": "BTS",
    "note_anglais": 40,
    "experience": 1,
    "entreprises_precedentes": 1,
    "distance_km": 25.0,
    "score_entretien": 4.0,
    "score_competence": 4.5,
    "score_personnalite": 60,
    "sexe": "M"
  })
}

/// Validates a raw payload into a typed record, panicking on fixture bugs.
pub(crate) fn record(raw: &Value) -> CandidateRecord {
  validate(raw, false).expect("fixture candidate validates")
}

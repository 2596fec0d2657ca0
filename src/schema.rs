//! # Field Constraints & Interface Description
//!
//! One declarative constraint table drives both input validation and the
//! machine-readable interface description served at `GET /schema`. Keeping a
//! single source of truth means the published schema can never drift from
//! what the validator actually enforces.

use serde_json::{json, Value};

/// The declared type of a candidate field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
  /// Whole number within `[min, max]`.
  Integer,
  /// Real number within `[min, max]`.
  Number,
  /// String drawn from a fixed set of values.
  Enumerated(&'static [&'static str]),
}

/// An example value for a field, used in the interface description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Example {
  /// Integer example.
  Int(i64),
  /// Real-number example.
  Num(f64),
  /// String example.
  Str(&'static str),
}

impl Example {
  /// Converts the example into a JSON value.
  pub fn to_value(self) -> Value {
    match self {
      Example::Int(i) => json!(i),
      Example::Num(n) => json!(n),
      Example::Str(s) => json!(s),
    }
  }
}

/// Declarative constraints for one candidate field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
  /// Wire name of the field.
  pub name: &'static str,
  /// Declared type.
  pub kind: FieldKind,
  /// Inclusive lower bound (numeric kinds only).
  pub min: Option<f64>,
  /// Inclusive upper bound (numeric kinds only).
  pub max: Option<f64>,
  /// Human-readable description, surfaced in the interface description.
  pub description: &'static str,
  /// Example value, surfaced in the interface description.
  pub example: Example,
}

/// Allowed diploma levels, in training-data order.
pub const DIPLOME_VALUES: &[&str] = &["BTS", "Licence", "Master", "Doctorat"];

/// Allowed gender markers.
pub const SEXE_VALUES: &[&str] = &["M", "F"];

/// The full constraint table for a candidate record.
///
/// Validation walks this table in order; the interface description is
/// generated from it.
pub const CANDIDATE_FIELDS: &[FieldSpec] = &[
  FieldSpec {
    name: "age",
    kind: FieldKind::Integer,
    min: Some(15.0),
    max: Some(70.0),
    description: "Âge du candidat",
    example: Example::Int(30),
  },
  FieldSpec {
    name: "diplome",
    kind: FieldKind::Enumerated(DIPLOME_VALUES),
    min: None,
    max: None,
    description: "Niveau de diplôme",
    example: Example::Str("BTS"),
  },
  FieldSpec {
    name: "note_anglais",
    kind: FieldKind::Number,
    min: Some(0.0),
    max: Some(100.0),
    description: "Score au test d'anglais",
    example: Example::Num(85.0),
  },
  FieldSpec {
    name: "experience",
    kind: FieldKind::Integer,
    min: Some(0.0),
    max: Some(50.0),
    description: "Années d'expérience",
    example: Example::Int(5),
  },
  FieldSpec {
    name: "entreprises_precedentes",
    kind: FieldKind::Integer,
    min: Some(0.0),
    max: Some(20.0),
    description: "Nombre d'entreprises précédentes",
    example: Example::Int(2),
  },
  FieldSpec {
    name: "distance_km",
    kind: FieldKind::Number,
    min: Some(0.0),
    max: Some(1000.0),
    description: "Distance domicile-entreprise (km)",
    example: Example::Num(4.5),
  },
  FieldSpec {
    name: "score_entretien",
    kind: FieldKind::Number,
    min: Some(0.0),
    max: Some(10.0),
    description: "Score d'entretien sur 10",
    example: Example::Num(8.2),
  },
  FieldSpec {
    name: "score_competence",
    kind: FieldKind::Number,
    min: Some(0.0),
    max: Some(10.0),
    description: "Score de compétence sur 10",
    example: Example::Num(7.5),
  },
  FieldSpec {
    name: "score_personnalite",
    kind: FieldKind::Number,
    min: Some(0.0),
    max: Some(100.0),
    description: "Score de personnalité",
    example: Example::Num(80.0),
  },
  FieldSpec {
    name: "sexe",
    kind: FieldKind::Enumerated(SEXE_VALUES),
    min: None,
    max: None,
    description: "Sexe du candidat (M/F)",
    example: Example::Str("F"),
  },
];

/// Looks up the constraint entry for a field name.
pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
  CANDIDATE_FIELDS.iter().find(|spec| spec.name == name)
}

/// The canonical example candidate, assembled from the table's examples.
pub fn example_candidate() -> Value {
  let mut obj = serde_json::Map::new();
  for spec in CANDIDATE_FIELDS {
    obj.insert(spec.name.to_string(), spec.example.to_value());
  }
  Value::Object(obj)
}

/// JSON Schema (draft-07) for one candidate record.
///
/// `strict` controls whether unknown fields are rejected
/// (`additionalProperties: false`) or ignored.
pub fn candidate_schema(strict: bool) -> Value {
  let mut properties = serde_json::Map::new();
  let mut required = Vec::new();
  for spec in CANDIDATE_FIELDS {
    let mut prop = serde_json::Map::new();
    match spec.kind {
      FieldKind::Integer => {
        prop.insert("type".into(), json!("integer"));
      }
      FieldKind::Number => {
        prop.insert("type".into(), json!("number"));
      }
      FieldKind::Enumerated(values) => {
        prop.insert("type".into(), json!("string"));
        prop.insert("enum".into(), json!(values));
      }
    }
    if let Some(min) = spec.min {
      prop.insert("minimum".into(), json!(min));
    }
    if let Some(max) = spec.max {
      prop.insert("maximum".into(), json!(max));
    }
    prop.insert("description".into(), json!(spec.description));
    prop.insert("examples".into(), json!([spec.example.to_value()]));
    properties.insert(spec.name.to_string(), Value::Object(prop));
    required.push(spec.name);
  }
  json!({
    "$schema": "http://json-schema.org/draft-07/schema#",
    "title": "Candidat",
    "type": "object",
    "properties": Value::Object(properties),
    "required": required,
    "additionalProperties": !strict,
  })
}

/// The full machine-readable interface description served at `GET /schema`.
///
/// Describes every endpoint, its request and response shapes, and the field
/// constraints, so clients can generate typed bindings.
pub fn interface_description(strict: bool, max_batch_size: usize) -> Value {
  let prediction_response = json!({
    "type": "object",
    "properties": {
      "prediction": {
        "type": "integer",
        "enum": [0, 1],
        "description": "1 = retenu, 0 = non retenu",
      },
      "probabilite_retenu": {
        "type": "number",
        "minimum": 0.0,
        "maximum": 1.0,
        "description": "Probabilité d'être retenu, arrondie à 4 décimales",
      },
    },
    "required": ["prediction", "probabilite_retenu"],
  });
  let error_response = json!({
    "type": "object",
    "properties": {
      "error_kind": {
        "type": "string",
        "enum": ["validation_error", "inference_error", "bad_request", "payload_too_large", "not_found"],
      },
      "message": { "type": "string" },
      "field": { "type": "string" },
      "details": {
        "type": "array",
        "items": {
          "type": "object",
          "properties": {
            "field": { "type": "string" },
            "value": {},
            "reason": { "type": "string" },
          },
          "required": ["field", "value", "reason"],
        },
      },
    },
    "required": ["error_kind", "message"],
  });
  json!({
    "title": "API Prédiction Entretien d'Embauche",
    "version": env!("CARGO_PKG_VERSION"),
    "endpoints": [
      {
        "method": "POST",
        "path": "/predict",
        "summary": "Prédire le succès d'un entretien pour un candidat",
        "request": { "$ref": "#/definitions/Candidat" },
        "response": { "$ref": "#/definitions/PredictionResponse" },
        "example_request": example_candidate(),
      },
      {
        "method": "POST",
        "path": "/predict_batch",
        "summary": "Prédire pour plusieurs candidats",
        "request": {
          "type": "array",
          "items": { "$ref": "#/definitions/Candidat" },
          "minItems": 1,
          "maxItems": max_batch_size,
        },
        "response": {
          "type": "array",
          "items": {
            "oneOf": [
              { "$ref": "#/definitions/PredictionResponse" },
              { "$ref": "#/definitions/ErrorResponse" },
            ],
          },
          "description": "Aligné position par position sur la requête",
        },
        "example_request": [example_candidate()],
      },
      {
        "method": "GET",
        "path": "/health",
        "summary": "État du service et métadonnées du modèle",
      },
      {
        "method": "GET",
        "path": "/schema",
        "summary": "Description de l'interface",
      },
    ],
    "definitions": {
      "Candidat": candidate_schema(strict),
      "PredictionResponse": prediction_response,
      "ErrorResponse": error_response,
    },
  })
}

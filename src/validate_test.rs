//! Tests for the candidate validator: presence, coercion, bounds,
//! enumeration membership, strict mode, and multi-violation reporting.

use crate::candidate::{Diplome, Sexe};
use crate::validate::validate;
use serde_json::{json, Value};

use crate::testutil::strong_candidate;

fn violation_fields(raw: &Value, strict: bool) -> Vec<String> {
  let err = validate(raw, strict).expect_err("expected a validation error");
  err.violations.into_iter().map(|v| v.field).collect()
}

#[test]
fn test_valid_record() {
  let record = validate(&strong_candidate(), false).expect("valid record");
  assert_eq!(record.age, 30);
  assert_eq!(record.diplome, Diplome::Bts);
  assert_eq!(record.note_anglais, 85.0);
  assert_eq!(record.experience, 5);
  assert_eq!(record.entreprises_precedentes, 2);
  assert_eq!(record.distance_km, 4.5);
  assert_eq!(record.score_entretien, 8.2);
  assert_eq!(record.score_competence, 7.5);
  assert_eq!(record.score_personnalite, 80.0);
  assert_eq!(record.sexe, Sexe::F);
}

#[test]
fn test_numeric_strings_coerce() {
  let mut raw = strong_candidate();
  raw["age"] = json!("30");
  raw["note_anglais"] = json!("85.5");
  let record = validate(&raw, false).expect("coerced record");
  assert_eq!(record.age, 30);
  assert_eq!(record.note_anglais, 85.5);
}

#[test]
fn test_whole_float_coerces_to_integer() {
  let mut raw = strong_candidate();
  raw["age"] = json!(30.0);
  let record = validate(&raw, false).expect("whole float accepted");
  assert_eq!(record.age, 30);
}

#[test]
fn test_fractional_number_rejected_for_integer_field() {
  let mut raw = strong_candidate();
  raw["age"] = json!(30.5);
  let err = validate(&raw, false).expect_err("fractional age");
  assert_eq!(err.violations.len(), 1);
  assert_eq!(err.violations[0].field, "age");
  assert_eq!(err.violations[0].reason, "expected an integer");
}

#[test]
fn test_wrong_type_names_the_field() {
  let mut raw = strong_candidate();
  raw["age"] = json!("thirty");
  let err = validate(&raw, false).expect_err("non-numeric age");
  assert_eq!(err.violations.len(), 1);
  assert_eq!(err.violations[0].field, "age");
  assert_eq!(err.violations[0].value, json!("thirty"));
}

#[test]
fn test_out_of_bounds_age() {
  let mut raw = strong_candidate();
  raw["age"] = json!(-1);
  let err = validate(&raw, false).expect_err("negative age");
  assert_eq!(err.violations[0].field, "age");
  assert_eq!(err.violations[0].reason, "must be between 15 and 70");
}

#[test]
fn test_out_of_bounds_note_anglais() {
  let mut raw = strong_candidate();
  raw["note_anglais"] = json!(150);
  assert_eq!(violation_fields(&raw, false), vec!["note_anglais"]);
}

#[test]
fn test_unknown_diploma_rejected() {
  let mut raw = strong_candidate();
  raw["diplome"] = json!("Unknown");
  let err = validate(&raw, false).expect_err("unknown diploma");
  assert_eq!(err.violations[0].field, "diplome");
  assert!(err.violations[0].reason.contains("BTS"));
}

#[test]
fn test_enumerated_values_are_trimmed() {
  let mut raw = strong_candidate();
  raw["sexe"] = json!(" F ");
  let record = validate(&raw, false).expect("trimmed marker accepted");
  assert_eq!(record.sexe, Sexe::F);
}

#[test]
fn test_missing_field_is_required() {
  let mut raw = strong_candidate();
  raw.as_object_mut().expect("object").remove("experience");
  let err = validate(&raw, false).expect_err("missing experience");
  assert_eq!(err.violations[0].field, "experience");
  assert_eq!(err.violations[0].value, Value::Null);
  assert_eq!(err.violations[0].reason, "field is required");
}

#[test]
fn test_null_field_is_required() {
  let mut raw = strong_candidate();
  raw["distance_km"] = Value::Null;
  assert_eq!(violation_fields(&raw, false), vec!["distance_km"]);
}

#[test]
fn test_all_violations_reported_together() {
  let mut raw = strong_candidate();
  raw["age"] = json!(-1);
  raw["diplome"] = json!("Unknown");
  raw["note_anglais"] = json!(150);
  let fields = violation_fields(&raw, false);
  assert_eq!(fields, vec!["age", "diplome", "note_anglais"]);
}

#[test]
fn test_empty_object_reports_every_field() {
  let fields = violation_fields(&json!({}), false);
  assert_eq!(fields.len(), 10);
}

#[test]
fn test_unknown_fields_ignored_by_default() {
  let mut raw = strong_candidate();
  raw["linkedin"] = json!("https://example.com");
  assert!(validate(&raw, false).is_ok());
}

#[test]
fn test_strict_mode_rejects_unknown_fields() {
  let mut raw = strong_candidate();
  raw["linkedin"] = json!("https://example.com");
  let err = validate(&raw, true).expect_err("unknown field in strict mode");
  assert_eq!(err.violations[0].field, "linkedin");
  assert_eq!(err.violations[0].reason, "unknown field");
}

#[test]
fn test_non_object_payload_rejected() {
  let err = validate(&json!([1, 2, 3]), false).expect_err("array payload");
  assert_eq!(err.violations[0].field, "body");
  assert_eq!(err.violations[0].reason, "expected a JSON object");
}

#[test]
fn test_boolean_rejected_for_numeric_field() {
  let mut raw = strong_candidate();
  raw["score_entretien"] = json!(true);
  let err = validate(&raw, false).expect_err("boolean score");
  assert_eq!(err.violations[0].field, "score_entretien");
  assert_eq!(err.violations[0].reason, "expected a number");
}

#[test]
fn test_number_rejected_for_enumerated_field() {
  let mut raw = strong_candidate();
  raw["sexe"] = json!(1);
  let err = validate(&raw, false).expect_err("numeric sexe");
  assert_eq!(err.violations[0].field, "sexe");
  assert_eq!(err.violations[0].reason, "expected a string");
}

//! # Candidate Validation
//!
//! Validates an untyped JSON record against the declarative constraint table
//! in [`crate::schema`] and produces a typed [`CandidateRecord`].
//!
//! The validator is a pure function: no side effects, no partial acceptance.
//! All violations across all fields are collected and reported together so a
//! caller can fix every problem in one round trip. Unknown extra fields are
//! ignored for forward compatibility unless strict mode is enabled.

use crate::candidate::CandidateRecord;
use crate::error::{FieldViolation, ValidationError};
use crate::schema::{field_spec, FieldKind, FieldSpec, CANDIDATE_FIELDS};
use serde_json::{Map, Number, Value};

/// Validates a raw JSON value as one candidate record.
///
/// Checks presence, type coercibility, and domain bounds or enumeration
/// membership for every declared field. JSON numbers are accepted directly;
/// strings that parse cleanly as the declared numeric type are coerced.
/// Integer fields reject fractional numbers. Enumerated fields are matched
/// after trimming surrounding whitespace.
pub fn validate(raw: &Value, strict: bool) -> Result<CandidateRecord, ValidationError> {
  let obj = match raw.as_object() {
    Some(obj) => obj,
    None => {
      return Err(ValidationError::single(
        "body",
        raw.clone(),
        "expected a JSON object",
      ));
    }
  };

  let mut violations = Vec::new();
  // Coerced values in canonical JSON form; only decoded once the record is
  // known to be violation-free.
  let mut canonical = Map::new();

  for spec in CANDIDATE_FIELDS {
    let value = match obj.get(spec.name) {
      None | Some(Value::Null) => {
        violations.push(FieldViolation::new(spec.name, Value::Null, "field is required"));
        continue;
      }
      Some(value) => value,
    };

    match spec.kind {
      FieldKind::Integer => match coerce_integer(value) {
        Some(int) if in_bounds(spec, int as f64) => {
          canonical.insert(spec.name.to_string(), Value::from(int));
        }
        Some(_) => violations.push(out_of_bounds(spec, value)),
        None => violations.push(FieldViolation::new(
          spec.name,
          value.clone(),
          "expected an integer",
        )),
      },
      FieldKind::Number => match coerce_number(value) {
        Some(num) if in_bounds(spec, num) => match Number::from_f64(num) {
          Some(n) => {
            canonical.insert(spec.name.to_string(), Value::Number(n));
          }
          None => violations.push(FieldViolation::new(
            spec.name,
            value.clone(),
            "expected a finite number",
          )),
        },
        Some(_) => violations.push(out_of_bounds(spec, value)),
        None => violations.push(FieldViolation::new(
          spec.name,
          value.clone(),
          "expected a number",
        )),
      },
      FieldKind::Enumerated(allowed) => match value.as_str() {
        Some(s) => {
          let trimmed = s.trim();
          if allowed.contains(&trimmed) {
            canonical.insert(spec.name.to_string(), Value::from(trimmed));
          } else {
            violations.push(FieldViolation::new(
              spec.name,
              value.clone(),
              format!("must be one of: {}", allowed.join(", ")),
            ));
          }
        }
        None => violations.push(FieldViolation::new(
          spec.name,
          value.clone(),
          "expected a string",
        )),
      },
    }
  }

  if strict {
    for (key, value) in obj {
      if field_spec(key).is_none() {
        violations.push(FieldViolation::new(key.clone(), value.clone(), "unknown field"));
      }
    }
  }

  if !violations.is_empty() {
    return Err(ValidationError::new(violations));
  }

  // All fields are present and coerced to canonical types, so decoding is
  // expected to succeed; a failure here is reported, not panicked on.
  serde_json::from_value(Value::Object(canonical)).map_err(|err| {
    ValidationError::single("body", Value::Null, format!("record decoding failed: {err}"))
  })
}

fn in_bounds(spec: &FieldSpec, value: f64) -> bool {
  spec.min.map_or(true, |min| value >= min) && spec.max.map_or(true, |max| value <= max)
}

fn out_of_bounds(spec: &FieldSpec, value: &Value) -> FieldViolation {
  // min/max are always declared for numeric kinds in the table.
  let min = spec.min.unwrap_or(f64::NEG_INFINITY);
  let max = spec.max.unwrap_or(f64::INFINITY);
  FieldViolation::new(
    spec.name,
    value.clone(),
    format!("must be between {} and {}", min, max),
  )
}

fn coerce_integer(value: &Value) -> Option<i64> {
  match value {
    Value::Number(n) => n.as_i64().or_else(|| {
      // Whole-valued floats ("30.0") coerce; fractional ones do not.
      n.as_f64()
        .filter(|f| f.fract() == 0.0 && f.is_finite())
        .map(|f| f as i64)
    }),
    Value::String(s) => s.trim().parse::<i64>().ok(),
    _ => None,
  }
}

fn coerce_number(value: &Value) -> Option<f64> {
  match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
    _ => None,
  }
}

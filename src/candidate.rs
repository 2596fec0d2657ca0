//! # Candidate Record
//!
//! The typed, validated input shape for one candidate. A [`CandidateRecord`]
//! only exists after validation: every field is present and within its
//! declared domain (see [`crate::schema`] for the constraint table).

use serde::{Deserialize, Serialize};

/// Diploma level, one of the fixed enumerated set known at training time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diplome {
  /// Technician-level degree (bac+2).
  #[serde(rename = "BTS")]
  Bts,
  /// Bachelor-level degree.
  Licence,
  /// Master-level degree.
  Master,
  /// Doctorate.
  Doctorat,
}

impl Diplome {
  /// The wire representation of this diploma level.
  pub fn as_str(&self) -> &'static str {
    match self {
      Diplome::Bts => "BTS",
      Diplome::Licence => "Licence",
      Diplome::Master => "Master",
      Diplome::Doctorat => "Doctorat",
    }
  }
}

/// Candidate gender marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sexe {
  /// Male.
  M,
  /// Female.
  F,
}

impl Sexe {
  /// The wire representation of this marker.
  pub fn as_str(&self) -> &'static str {
    match self {
      Sexe::M => "M",
      Sexe::F => "F",
    }
  }
}

/// One candidate's attributes, fully validated.
///
/// Field names match the JSON wire format one-to-one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
  /// Candidate age in years (15..=70).
  pub age: u32,
  /// Diploma level.
  pub diplome: Diplome,
  /// English-test score (0..=100).
  pub note_anglais: f64,
  /// Years of professional experience (0..=50).
  pub experience: u32,
  /// Count of previous employers (0..=20).
  pub entreprises_precedentes: u32,
  /// Home-to-office commute distance in kilometers (0..=1000).
  pub distance_km: f64,
  /// Interview score out of 10.
  pub score_entretien: f64,
  /// Competency score out of 10.
  pub score_competence: f64,
  /// Personality score out of 100.
  pub score_personnalite: f64,
  /// Gender marker.
  pub sexe: Sexe,
}

impl CandidateRecord {
  /// Looks up a numeric field by its wire name.
  ///
  /// Returns `None` for categorical or unknown names. Used by the feature
  /// transform, which addresses fields by the names stored in the artifact.
  pub fn numeric_field(&self, name: &str) -> Option<f64> {
    match name {
      "age" => Some(f64::from(self.age)),
      "note_anglais" => Some(self.note_anglais),
      "experience" => Some(f64::from(self.experience)),
      "entreprises_precedentes" => Some(f64::from(self.entreprises_precedentes)),
      "distance_km" => Some(self.distance_km),
      "score_entretien" => Some(self.score_entretien),
      "score_competence" => Some(self.score_competence),
      "score_personnalite" => Some(self.score_personnalite),
      _ => None,
    }
  }

  /// Looks up a categorical field by its wire name.
  ///
  /// Returns `None` for numeric or unknown names.
  pub fn categorical_field(&self, name: &str) -> Option<&'static str> {
    match name {
      "diplome" => Some(self.diplome.as_str()),
      "sexe" => Some(self.sexe.as_str()),
      _ => None,
    }
  }
}

//! Saved sieve-analysis sessions.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uom::si::{
    f64::{Length, Mass},
    length::millimeter,
    mass::gram,
};

use crate::models::soil::gradation::{GradationSample, SampleError, SieveReading};

/// One row of the sieve table, stored exactly as entered.
///
/// Fields are strings so a saved session reproduces the table verbatim,
/// including blanks. An empty `size` marks the pan row; an empty `retained`
/// reads as zero mass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SieveRow {
    #[serde(default)]
    pub size: String,

    /// Sieve designation, e.g. `"No. 200"`.
    #[serde(default)]
    pub number: String,

    #[serde(default)]
    pub retained: String,
}

/// A saved sieve-analysis session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SieveSession {
    /// Total sample weight in grams, as entered. Older files may store this
    /// as a JSON number; it is accepted either way.
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_weight: String,

    #[serde(default)]
    pub sieve_data: Vec<SieveRow>,
}

/// Errors raised while converting a saved session into a sample.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("could not parse total weight {value:?} as a number")]
    InvalidTotalWeight { value: String },

    #[error("row {row}: could not parse `{field}` value {value:?} as a number")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Sample(#[from] SampleError),
}

impl SieveSession {
    /// Parses a session from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the session to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] on failure.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses and validates the session into a [`GradationSample`].
    ///
    /// Rows may appear in any order; they are sorted by ascending opening
    /// size before validation. Rows with an empty `size` become the pan.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] naming the first unparseable field, or the
    /// [`SampleError`] from sample validation (duplicate sizes, negative
    /// masses, non-positive total weight).
    pub fn to_sample(&self) -> Result<GradationSample, SessionError> {
        let total_g: f64 = self.total_weight.trim().parse().map_err(|_| {
            SessionError::InvalidTotalWeight {
                value: self.total_weight.clone(),
            }
        })?;

        let mut readings = Vec::with_capacity(self.sieve_data.len());
        for (row, data) in self.sieve_data.iter().enumerate() {
            let retained_g = parse_field(&data.retained, "retained", row)?.unwrap_or(0.0);
            let retained = Mass::new::<gram>(retained_g);

            let reading = match parse_field(&data.size, "size", row)? {
                Some(size_mm) => {
                    let label = if data.number.trim().is_empty() {
                        format!("{size_mm} mm")
                    } else {
                        data.number.trim().to_owned()
                    };
                    SieveReading::new(Length::new::<millimeter>(size_mm), label, retained)?
                }
                None => SieveReading::pan("Pan", retained)?,
            };
            readings.push(reading);
        }

        readings.sort_by(|a, b| {
            a.size()
                .get::<millimeter>()
                .total_cmp(&b.size().get::<millimeter>())
        });

        Ok(GradationSample::new(Mass::new::<gram>(total_g), readings)?)
    }
}

/// Parses a table cell, treating a blank cell as absent.
fn parse_field(value: &str, field: &'static str, row: usize) -> Result<Option<f64>, SessionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| SessionError::InvalidNumber {
            row,
            field,
            value: value.to_owned(),
        })
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(value) => value.to_string(),
    })
}

//! Saved classification sessions.

use serde::{Deserialize, Serialize};

use crate::models::soil::uscs::{ClassificationData, organic_from_liquid_limits};

/// A saved classification form. Every field defaults to zero when absent, so
/// sessions written by older versions load cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationSession {
    pub boulders: f64,
    pub cobbles: f64,
    pub gravel: f64,
    pub sand: f64,
    pub fines: f64,
    pub ll: f64,
    pub pl: f64,
    pub d10: f64,
    pub d30: f64,
    pub d60: f64,
    pub air_dry_ll: f64,
    pub oven_dry_ll: f64,
}

impl ClassificationSession {
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

    /// Converts the session into [`ClassificationData`] ready for validation.
    ///
    /// Zero D-values read as "not supplied", and the organic flag is derived
    /// from the air-dried and oven-dried liquid limits.
    pub fn to_data(&self) -> ClassificationData {
        ClassificationData {
            percent_boulders: self.boulders,
            percent_cobbles: self.cobbles,
            percent_gravel: self.gravel,
            percent_sand: self.sand,
            percent_fines: self.fines,
            liquid_limit: self.ll,
            plastic_limit: self.pl,
            plasticity_index: None,
            d10: supplied(self.d10),
            d30: supplied(self.d30),
            d60: supplied(self.d60),
            cu: None,
            cc: None,
            organic: organic_from_liquid_limits(self.air_dry_ll, self.oven_dry_ll),
        }
    }
}

fn supplied(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

//! Particle-category breakdown from raw retained masses.
//!
//! Categories follow the standard size breakpoints: boulders above 300 mm,
//! cobbles from 75 to 300 mm inclusive, gravel from 4.75 mm up to but not
//! including 75 mm, sand from 0.075 mm up to but not including 4.75 mm, and
//! fines below 0.075 mm. Fines are computed as the residual pan mass, not
//! from a direct sieve reading.

use thiserror::Error;

use super::{round_to, sample::GradationSample};

/// Tolerance for the mass balance check, absorbing float accumulation error.
const MASS_BALANCE_TOL_G: f64 = 1e-9;

/// Largest sum-of-percentages deviation silently absorbed into Fines.
const ABSORB_TOL_PERCENT: f64 = 0.5;

/// The five standard particle size categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleCategory {
    Boulders,
    Cobbles,
    Gravel,
    Sand,
    Fines,
}

impl ParticleCategory {
    /// All categories, coarsest first.
    pub const ALL: [Self; 5] = [
        Self::Boulders,
        Self::Cobbles,
        Self::Gravel,
        Self::Sand,
        Self::Fines,
    ];

    /// Human-readable label including the size range.
    pub fn label(self) -> &'static str {
        match self {
            Self::Boulders => "Boulders (> 300 mm)",
            Self::Cobbles => "Cobbles (75 - 300 mm)",
            Self::Gravel => "Gravel (4.75 - 75 mm)",
            Self::Sand => "Sand (0.075 - 4.75 mm)",
            Self::Fines => "Fines (< 0.075 mm)",
        }
    }

    /// Category for material retained on a sieve of the given opening size.
    ///
    /// Returns `None` for the pan and for openings finer than 0.075 mm:
    /// fines are defined as material *passing* the 0.075 mm sieve, so mass
    /// retained on a finer sieve belongs to no category (it still counts in
    /// the mass balance).
    pub fn from_sieve_size(size_mm: f64) -> Option<Self> {
        if size_mm > 300.0 {
            Some(Self::Boulders)
        } else if size_mm >= 75.0 {
            Some(Self::Cobbles)
        } else if size_mm >= 4.75 {
            Some(Self::Gravel)
        } else if size_mm >= 0.075 {
            Some(Self::Sand)
        } else {
            None
        }
    }
}

/// Percentage of total sample weight in each particle category.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleDistribution {
    percentages: [f64; 5],
}

/// Error raised when retained mass exceeds the total sample weight.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "retained mass on sieves ({retained_g:.2} g) exceeds total sample weight ({total_g:.2} g)"
)]
pub struct DataConsistencyError {
    /// Sum of retained masses over all sieves (pan excluded).
    pub retained_g: f64,

    /// Total sample weight.
    pub total_g: f64,
}

impl ParticleDistribution {
    /// Computes the distribution for a sample.
    ///
    /// Each non-pan reading's mass is credited to its size category; pan
    /// mass is the total weight minus everything retained on sieves.
    /// Percentages are of total weight, rounded to 2 decimals. A rounding
    /// deviation of the category sum below 0.5 is absorbed into Fines
    /// (clamped at zero); larger deviations are logged and left uncorrected.
    ///
    /// # Errors
    ///
    /// Returns a [`DataConsistencyError`] when the retained mass exceeds the
    /// total weight beyond floating-point tolerance; the sample is invalid
    /// and the caller should treat the distribution as all-zero.
    pub fn from_sample(sample: &GradationSample) -> Result<Self, DataConsistencyError> {
        let total_g = sample.total_weight_g();

        let retained_on_sieves_g: f64 = sample
            .readings()
            .iter()
            .filter(|r| !r.is_pan())
            .map(|r| r.retained_g())
            .sum();

        let pan_g = total_g - retained_on_sieves_g;
        if pan_g < -MASS_BALANCE_TOL_G {
            return Err(DataConsistencyError {
                retained_g: retained_on_sieves_g,
                total_g,
            });
        }
        let pan_g = pan_g.max(0.0);

        let mut masses_g = [0.0; 5];
        for reading in sample.readings().iter().filter(|r| !r.is_pan()) {
            if let Some(category) = ParticleCategory::from_sieve_size(reading.size_mm()) {
                masses_g[category as usize] += reading.retained_g();
            }
        }
        masses_g[ParticleCategory::Fines as usize] = pan_g;

        let mut percentages = masses_g.map(|mass| round_to(mass / total_g * 100.0, 2));

        let sum: f64 = percentages.iter().sum();
        let deviation = 100.0 - sum;
        if deviation != 0.0 {
            if deviation.abs() < ABSORB_TOL_PERCENT {
                let fines = &mut percentages[ParticleCategory::Fines as usize];
                *fines = round_to(*fines + deviation, 2).max(0.0);
            } else {
                log::warn!(
                    "particle distribution percentages sum to {sum:.2}%, \
                     deviation too large to absorb"
                );
            }
        }

        Ok(Self { percentages })
    }

    /// An all-zero distribution, used when the sample fails the mass balance.
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Percentage of total weight in one category.
    pub fn percent(&self, category: ParticleCategory) -> f64 {
        self.percentages[category as usize]
    }

    /// Sum of all category percentages.
    pub fn total(&self) -> f64 {
        self.percentages.iter().sum()
    }

    /// Iterates categories with their percentages, coarsest first.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleCategory, f64)> + '_ {
        ParticleCategory::ALL
            .into_iter()
            .map(|category| (category, self.percent(category)))
    }
}

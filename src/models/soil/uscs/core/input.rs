//! Validated input for USCS classification.

use thiserror::Error;

use crate::models::soil::gradation::Coefficients;

/// Raw classification data as gathered from a caller.
///
/// Construct this literally (it implements `Default`) and call
/// [`ClassificationData::validate`] to obtain a [`ClassificationInput`]
/// accepted by the classifier. Percentages are of total sample weight and
/// must sum to 100; Atterberg limits are in percent moisture content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassificationData {
    pub percent_boulders: f64,
    pub percent_cobbles: f64,
    pub percent_gravel: f64,
    pub percent_sand: f64,
    pub percent_fines: f64,

    /// Liquid limit (LL).
    pub liquid_limit: f64,

    /// Plastic limit (PL).
    pub plastic_limit: f64,

    /// Plasticity index; derived as `LL - PL` when absent.
    pub plasticity_index: Option<f64>,

    /// Characteristic diameters (mm), when supplied directly.
    pub d10: Option<f64>,
    pub d30: Option<f64>,
    pub d60: Option<f64>,

    /// Gradation coefficients; derived from the D-values when absent.
    pub cu: Option<f64>,
    pub cc: Option<f64>,

    /// Whether the soil is organic (see [`organic_from_liquid_limits`]).
    pub organic: bool,
}

/// Classification input that has passed validation.
///
/// The plasticity index and coefficients are resolved; the classifier maps
/// every possible `ClassificationInput` to a symbol without failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationInput {
    percent_boulders: f64,
    percent_cobbles: f64,
    percent_gravel: f64,
    percent_sand: f64,
    percent_fines: f64,
    liquid_limit: f64,
    plasticity_index: f64,
    cu: Option<f64>,
    cc: Option<f64>,
    organic: bool,
}

/// Errors raised while validating [`ClassificationData`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InputError {
    #[error("percentage `{name}` must be between 0 and 100, got {value}")]
    PercentageOutOfRange { name: &'static str, value: f64 },

    #[error("particle percentages must sum to 100 within 0.1, got {sum:.1}")]
    PercentageSum { sum: f64 },

    #[error("Atterberg limit `{name}` cannot be negative, got {value}")]
    NegativeLimit { name: &'static str, value: f64 },

    #[error(
        "liquid limit ({liquid_limit}) cannot be less than plastic limit ({plastic_limit})"
    )]
    LimitOrder {
        liquid_limit: f64,
        plastic_limit: f64,
    },

    #[error("characteristic diameter `{name}` cannot be negative, got {value}")]
    NegativeDValue { name: &'static str, value: f64 },

    #[error("characteristic diameters must satisfy D10 <= D30 <= D60")]
    DValueOrder,

    #[error("coefficient `{name}` cannot be negative, got {value}")]
    NegativeCoefficient { name: &'static str, value: f64 },
}

impl ClassificationData {
    /// Validates the data and resolves derived quantities.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] encountered; no partial result is
    /// produced.
    pub fn validate(self) -> Result<ClassificationInput, InputError> {
        let percentages = [
            ("boulders", self.percent_boulders),
            ("cobbles", self.percent_cobbles),
            ("gravel", self.percent_gravel),
            ("sand", self.percent_sand),
            ("fines", self.percent_fines),
        ];
        for (name, value) in percentages {
            if !(0.0..=100.0).contains(&value) {
                return Err(InputError::PercentageOutOfRange { name, value });
            }
        }
        let sum: f64 = percentages.iter().map(|(_, v)| v).sum();
        if (sum - 100.0).abs() > 0.1 {
            return Err(InputError::PercentageSum { sum });
        }

        if !(self.liquid_limit >= 0.0) {
            return Err(InputError::NegativeLimit {
                name: "liquid limit",
                value: self.liquid_limit,
            });
        }
        if !(self.plastic_limit >= 0.0) {
            return Err(InputError::NegativeLimit {
                name: "plastic limit",
                value: self.plastic_limit,
            });
        }

        let plasticity_index = match self.plasticity_index {
            Some(pi) => pi,
            None => {
                if self.liquid_limit < self.plastic_limit {
                    return Err(InputError::LimitOrder {
                        liquid_limit: self.liquid_limit,
                        plastic_limit: self.plastic_limit,
                    });
                }
                self.liquid_limit - self.plastic_limit
            }
        };

        let diameters = [("D10", self.d10), ("D30", self.d30), ("D60", self.d60)];
        for (name, value) in diameters {
            if let Some(value) = value
                && value < 0.0
            {
                return Err(InputError::NegativeDValue { name, value });
            }
        }
        if let (Some(d10), Some(d30), Some(d60)) = (self.d10, self.d30, self.d60)
            && !(d10 <= d30 && d30 <= d60)
        {
            return Err(InputError::DValueOrder);
        }

        for (name, value) in [("Cu", self.cu), ("Cc", self.cc)] {
            if let Some(value) = value
                && value < 0.0
            {
                return Err(InputError::NegativeCoefficient { name, value });
            }
        }

        let derived = Coefficients::from_diameters(self.d10, self.d30, self.d60);

        Ok(ClassificationInput {
            percent_boulders: self.percent_boulders,
            percent_cobbles: self.percent_cobbles,
            percent_gravel: self.percent_gravel,
            percent_sand: self.percent_sand,
            percent_fines: self.percent_fines,
            liquid_limit: self.liquid_limit,
            plasticity_index,
            cu: self.cu.or(derived.cu),
            cc: self.cc.or(derived.cc),
            organic: self.organic,
        })
    }
}

impl ClassificationInput {
    pub fn percent_boulders(&self) -> f64 {
        self.percent_boulders
    }

    pub fn percent_cobbles(&self) -> f64 {
        self.percent_cobbles
    }

    pub fn percent_gravel(&self) -> f64 {
        self.percent_gravel
    }

    pub fn percent_sand(&self) -> f64 {
        self.percent_sand
    }

    pub fn percent_fines(&self) -> f64 {
        self.percent_fines
    }

    /// The coarse fraction: everything retained on the No. 200 sieve.
    pub fn percent_coarse(&self) -> f64 {
        100.0 - self.percent_fines
    }

    pub fn liquid_limit(&self) -> f64 {
        self.liquid_limit
    }

    /// The resolved plasticity index.
    pub fn plasticity_index(&self) -> f64 {
        self.plasticity_index
    }

    pub fn cu(&self) -> Option<f64> {
        self.cu
    }

    pub fn cc(&self) -> Option<f64> {
        self.cc
    }

    pub fn organic(&self) -> bool {
        self.organic
    }
}

/// Derives the organic flag from air-dried and oven-dried liquid limits.
///
/// A soil is treated as organic when the oven-dried liquid limit drops below
/// 75% of the air-dried value. With either limit absent (zero or negative)
/// the soil is assumed inorganic.
pub fn organic_from_liquid_limits(air_dry_ll: f64, oven_dry_ll: f64) -> bool {
    if air_dry_ll <= 0.0 || oven_dry_ll <= 0.0 {
        return false;
    }
    if oven_dry_ll > air_dry_ll {
        log::warn!(
            "oven-dried LL ({oven_dry_ll}) exceeds air-dried LL ({air_dry_ll}); \
             expected the oven-dried value to be lower"
        );
    }
    oven_dry_ll / air_dry_ll < 0.75
}

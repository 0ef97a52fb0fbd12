//! Input types for a sieve analysis run.

use thiserror::Error;
use uom::si::{
    f64::{Length, Mass},
    length::millimeter,
    mass::gram,
};

use crate::support::constraint::{Constrained, ConstraintError, NonNegative, StrictlyPositive};

/// A single sieve reading: opening size, sieve label, and retained mass.
///
/// A "pan" reading uses a zero opening size to represent material passing the
/// finest sieve. It is excluded from size-based categorization and from the
/// gradation curve, but participates in the mass balance.
#[derive(Debug, Clone, PartialEq)]
pub struct SieveReading {
    size: Length,
    label: String,
    retained: Constrained<Mass, NonNegative>,
}

impl SieveReading {
    /// Creates a reading for a real sieve.
    ///
    /// # Errors
    ///
    /// Returns a [`SampleError`] if the opening size is not positive and
    /// finite, or if the retained mass is negative.
    pub fn new(size: Length, label: impl Into<String>, retained: Mass) -> Result<Self, SampleError> {
        let label = label.into();
        let size_mm = size.get::<millimeter>();
        if !(size_mm.is_finite() && size_mm > 0.0) {
            return Err(SampleError::InvalidSize { label });
        }
        let retained = NonNegative::new(retained)
            .map_err(|source| SampleError::NegativeRetainedMass {
                label: label.clone(),
                source,
            })?;
        Ok(Self {
            size,
            label,
            retained,
        })
    }

    /// Creates a pan reading (zero opening size).
    ///
    /// # Errors
    ///
    /// Returns a [`SampleError`] if the retained mass is negative.
    pub fn pan(label: impl Into<String>, retained: Mass) -> Result<Self, SampleError> {
        let label = label.into();
        let retained = NonNegative::new(retained)
            .map_err(|source| SampleError::NegativeRetainedMass {
                label: label.clone(),
                source,
            })?;
        Ok(Self {
            size: Length::new::<millimeter>(0.0),
            label,
            retained,
        })
    }

    /// The sieve opening size (zero for the pan).
    pub fn size(&self) -> Length {
        self.size
    }

    /// The sieve label, e.g. `"No. 200"` or `"3/4 inch"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The mass retained on this sieve.
    pub fn retained(&self) -> Mass {
        *self.retained.as_ref()
    }

    /// Whether this reading represents the pan.
    pub fn is_pan(&self) -> bool {
        self.size.get::<millimeter>() == 0.0
    }

    pub(crate) fn size_mm(&self) -> f64 {
        self.size.get::<millimeter>()
    }

    pub(crate) fn retained_g(&self) -> f64 {
        self.retained.as_ref().get::<gram>()
    }
}

/// An immutable sieve test sample: total weight plus ordered readings.
///
/// Readings must be ordered by strictly ascending opening size, which also
/// guarantees sizes are distinct. A pan reading, having zero size, can only
/// appear first. Percent passing is only physically meaningful when the
/// readings are monotone in size, so out-of-order input is rejected rather
/// than silently reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct GradationSample {
    total_weight: Constrained<Mass, StrictlyPositive>,
    readings: Vec<SieveReading>,
}

impl GradationSample {
    /// Creates a sample from a total weight and ascending-ordered readings.
    ///
    /// # Errors
    ///
    /// Returns a [`SampleError`] if the total weight is not strictly positive
    /// or the readings are not strictly ascending in size.
    pub fn new(total_weight: Mass, readings: Vec<SieveReading>) -> Result<Self, SampleError> {
        let total_weight =
            StrictlyPositive::new(total_weight).map_err(SampleError::NonPositiveWeight)?;

        for pair in readings.windows(2) {
            if pair[1].size_mm() <= pair[0].size_mm() {
                return Err(SampleError::OutOfOrder {
                    label: pair[1].label().to_owned(),
                });
            }
        }

        Ok(Self {
            total_weight,
            readings,
        })
    }

    /// The total weight of the sample.
    pub fn total_weight(&self) -> Mass {
        *self.total_weight.as_ref()
    }

    /// The readings, ordered by strictly ascending opening size.
    pub fn readings(&self) -> &[SieveReading] {
        &self.readings
    }

    pub(crate) fn total_weight_g(&self) -> f64 {
        self.total_weight.as_ref().get::<gram>()
    }
}

/// Errors raised while constructing a [`GradationSample`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// The total sample weight was zero, negative, or not a number.
    #[error("total sample weight must be strictly positive")]
    NonPositiveWeight(#[source] ConstraintError),

    /// A sieve opening size was zero, negative, infinite, or not a number.
    #[error("sieve opening for `{label}` must be positive and finite")]
    InvalidSize { label: String },

    /// A retained mass was negative or not a number.
    #[error("retained mass on `{label}` must be non-negative")]
    NegativeRetainedMass {
        label: String,
        #[source]
        source: ConstraintError,
    },

    /// Readings were not in strictly ascending size order.
    #[error("sieve readings must be in strictly ascending size order (`{label}` out of place)")]
    OutOfOrder { label: String },
}

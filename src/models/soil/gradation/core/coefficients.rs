//! Gradation coefficients derived from the characteristic diameters.

use super::{d_values::DValues, round_to};

/// Coefficient of uniformity (Cu) and coefficient of curvature (Cc).
///
/// Either coefficient is `None` when the D-values it needs are absent or the
/// arithmetic is undefined (zero denominator, non-finite result).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coefficients {
    /// `Cu = D60 / D10`.
    pub cu: Option<f64>,

    /// `Cc = D30^2 / (D10 * D60)`.
    pub cc: Option<f64>,
}

impl Coefficients {
    /// Computes both coefficients from extracted D-values, rounded to
    /// 4 decimals.
    pub fn from_d_values(d: &DValues) -> Self {
        Self::from_diameters(d.d10, d.d30, d.d60)
    }

    /// Computes both coefficients from individually supplied diameters.
    pub fn from_diameters(d10: Option<f64>, d30: Option<f64>, d60: Option<f64>) -> Self {
        let cu = match (d10, d60) {
            (Some(d10), Some(d60)) if d10 != 0.0 => finite(d60 / d10),
            _ => None,
        };
        let cc = match (d10, d30, d60) {
            (Some(d10), Some(d30), Some(d60)) if d10 * d60 != 0.0 => {
                finite(d30 * d30 / (d10 * d60))
            }
            _ => None,
        };
        Self {
            cu: cu.map(|v| round_to(v, 4)),
            cc: cc.map(|v| round_to(v, 4)),
        }
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn textbook_values() {
        let coefficients = Coefficients::from_d_values(&DValues {
            d10: Some(0.5),
            d30: Some(5.0),
            d60: Some(20.0),
        });
        assert_relative_eq!(coefficients.cu.unwrap(), 40.0);
        assert_relative_eq!(coefficients.cc.unwrap(), 2.5);
    }

    #[test]
    fn rounds_to_four_decimals() {
        let coefficients = Coefficients::from_diameters(Some(0.3), Some(0.7), Some(2.1));
        assert_relative_eq!(coefficients.cu.unwrap(), 7.0);
        // 0.49 / 0.63 = 0.77777...
        assert_relative_eq!(coefficients.cc.unwrap(), 0.7778);
    }

    #[test]
    fn missing_diameters_yield_none() {
        let coefficients = Coefficients::from_diameters(Some(0.5), None, Some(20.0));
        assert_relative_eq!(coefficients.cu.unwrap(), 40.0);
        assert_eq!(coefficients.cc, None);

        assert_eq!(
            Coefficients::from_diameters(None, Some(5.0), None),
            Coefficients::default()
        );
    }

    #[test]
    fn zero_denominator_yields_none() {
        let coefficients = Coefficients::from_diameters(Some(0.0), Some(5.0), Some(20.0));
        assert_eq!(coefficients.cu, None);
        assert_eq!(coefficients.cc, None);
    }
}

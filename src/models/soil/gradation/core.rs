//! Sieve analysis: gradation curve, characteristic diameters, coefficients,
//! and particle-category breakdown.
//!
//! The pipeline runs leaf to root: readings feed the curve builder, the
//! curve feeds the intersection solver, the D-values feed the coefficient
//! calculation, and (independently of the curve) the raw retained masses
//! feed the particle distribution. A mass-balance failure zeroes the
//! distribution but never disturbs the D-values.

mod coefficients;
mod curve;
mod d_values;
mod distribution;
mod results;
mod sample;

pub use coefficients::Coefficients;
pub use curve::{GradationCurve, InsufficientDataError};
pub use d_values::{CrossingConfig, DValues};
pub use distribution::{DataConsistencyError, ParticleCategory, ParticleDistribution};
pub use results::{GradationResults, GraphData, PlotType};
pub use sample::{GradationSample, SampleError, SieveReading};

/// Performs a complete sieve analysis for one sample.
///
/// # Errors
///
/// Returns an [`InsufficientDataError`] if the sample has fewer than two
/// readings with distinct positive sieve sizes; everything downstream of
/// curve construction is best-effort and cannot fail.
pub fn analyze(sample: &GradationSample) -> Result<GradationResults, InsufficientDataError> {
    let curve = GradationCurve::build(sample)?;
    let d_values = DValues::solve(&curve);
    let coefficients = Coefficients::from_d_values(&d_values);

    let (distribution, data_consistency) = match ParticleDistribution::from_sample(sample) {
        Ok(distribution) => (distribution, None),
        Err(err) => (ParticleDistribution::zeroed(), Some(err)),
    };

    Ok(GradationResults {
        sizes_mm: curve.sizes_mm().to_vec(),
        percent_passing: curve.percent_passing().to_vec(),
        curve_sizes_mm: curve.dense_sizes_mm().to_vec(),
        curve_percent_passing: curve.dense_percent_passing().to_vec(),
        d_values,
        coefficients,
        distribution,
        data_consistency,
    })
}

/// Rounds to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Length, Mass},
        length::millimeter,
        mass::gram,
    };

    fn reading(size_mm: f64, label: &str, retained_g: f64) -> SieveReading {
        SieveReading::new(
            Length::new::<millimeter>(size_mm),
            label,
            Mass::new::<gram>(retained_g),
        )
        .unwrap()
    }

    #[test]
    fn full_pipeline_on_a_well_graded_sand() {
        let sample = GradationSample::new(
            Mass::new::<gram>(500.0),
            vec![
                reading(0.075, "No. 200", 25.0),
                reading(0.15, "No. 100", 50.0),
                reading(0.30, "No. 50", 175.0),
                reading(0.60, "No. 30", 150.0),
                reading(1.18, "No. 16", 75.0),
                reading(2.36, "No. 8", 25.0),
                reading(4.75, "No. 4", 0.0),
            ],
        )
        .unwrap();

        let results = analyze(&sample).unwrap();

        assert!(results.data_consistency.is_none());
        assert_relative_eq!(results.distribution.total(), 100.0, epsilon = 0.1);
        // Every loaded sieve sits in the sand range, so the sample is all sand.
        assert_relative_eq!(
            results.distribution.percent(ParticleCategory::Sand),
            100.0
        );
        assert_relative_eq!(
            results.distribution.percent(ParticleCategory::Fines),
            0.0
        );

        assert!(results.is_valid());
        assert!(results.coefficients.cu.unwrap() > 1.0);
    }

    #[test]
    fn inconsistent_masses_zero_the_distribution_but_keep_d_values() {
        let sample = GradationSample::new(
            Mass::new::<gram>(100.0),
            vec![
                reading(0.075, "No. 200", 80.0),
                reading(0.60, "No. 30", 40.0),
                reading(4.75, "No. 4", 30.0),
            ],
        )
        .unwrap();

        let results = analyze(&sample).unwrap();

        assert!(results.data_consistency.is_some());
        assert_relative_eq!(results.distribution.total(), 0.0);
        // Percent passing derives from retained masses alone, so the
        // D-values still come out.
        assert!(results.d_values.d10.is_some());
        assert!(results.d_values.d60.is_some());
    }

    #[test]
    fn rounding_helper() {
        assert_relative_eq!(round_to(1.23456789, 4), 1.2346);
        assert_relative_eq!(round_to(99.999_96, 4), 100.0);
        assert_relative_eq!(round_to(1.005, 2), 1.0, epsilon = 0.01);
    }
}

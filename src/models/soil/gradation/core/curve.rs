//! Gradation curve construction from sieve readings.

mod linear;
mod pchip;

use thiserror::Error;

use linear::PiecewiseLinear;
use pchip::MonotoneCubic;

use super::{round_to, sample::GradationSample};

/// Number of points in the dense log-spaced curve sample.
const DENSE_POINTS: usize = 1000;

/// A smooth, queryable percent-passing-vs-size function.
///
/// Built from a [`GradationSample`] by accumulating retained mass from the
/// coarsest sieve downward: at each sieve, the cumulative retained percent is
/// the cumulative mass over the final cumulative mass times 100 (rounded to
/// 4 decimals), and percent passing is its complement. Pan mass participates
/// in the cumulative total but contributes no curve point.
///
/// The interpolant is a shape-preserving monotone cubic; if its construction
/// fails, a piecewise-linear interpolant with extrapolation takes its place.
/// The curve does not enforce monotonicity of the input data, it only
/// consumes whatever monotonicity the readings imply.
#[derive(Debug, Clone)]
pub struct GradationCurve {
    sizes_mm: Vec<f64>,
    percent_passing: Vec<f64>,
    interpolant: Interpolant,
    dense_sizes_mm: Vec<f64>,
    dense_percent_passing: Vec<f64>,
}

#[derive(Debug, Clone)]
enum Interpolant {
    MonotoneCubic(MonotoneCubic),
    Linear(PiecewiseLinear),
}

/// Error raised when a sample has too few distinct sieve sizes for a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("at least two sieve readings with distinct positive sizes are required, got {count}")]
pub struct InsufficientDataError {
    /// Number of usable (non-pan) readings supplied.
    pub count: usize,
}

impl GradationCurve {
    /// Builds the curve for a sample.
    ///
    /// # Errors
    ///
    /// Returns an [`InsufficientDataError`] if fewer than two readings with
    /// positive sieve size are present.
    pub fn build(sample: &GradationSample) -> Result<Self, InsufficientDataError> {
        let (sizes_mm, percent_passing) = percent_passing_points(sample);
        if sizes_mm.len() < 2 {
            return Err(InsufficientDataError {
                count: sizes_mm.len(),
            });
        }

        let interpolant = match MonotoneCubic::new(sizes_mm.clone(), percent_passing.clone()) {
            Ok(cubic) => Interpolant::MonotoneCubic(cubic),
            Err(err) => {
                log::warn!(
                    "monotone cubic construction failed ({err}), \
                     falling back to piecewise-linear interpolation"
                );
                Interpolant::Linear(PiecewiseLinear::new(
                    sizes_mm.clone(),
                    percent_passing.clone(),
                ))
            }
        };

        let dense_sizes_mm = log_spaced(
            sizes_mm[0],
            sizes_mm[sizes_mm.len() - 1],
            DENSE_POINTS,
        );
        let dense_percent_passing = dense_sizes_mm
            .iter()
            .map(|&size| interpolant.evaluate(size))
            .collect();

        Ok(Self {
            sizes_mm,
            percent_passing,
            interpolant,
            dense_sizes_mm,
            dense_percent_passing,
        })
    }

    /// Evaluates percent passing at an arbitrary size in millimetres.
    pub fn percent_at(&self, size_mm: f64) -> f64 {
        self.interpolant.evaluate(size_mm)
    }

    /// Sieve sizes (mm) backing the curve, ascending.
    pub fn sizes_mm(&self) -> &[f64] {
        &self.sizes_mm
    }

    /// Percent passing at each sieve size.
    pub fn percent_passing(&self) -> &[f64] {
        &self.percent_passing
    }

    /// Dense log-spaced sizes (mm) across the data range.
    pub fn dense_sizes_mm(&self) -> &[f64] {
        &self.dense_sizes_mm
    }

    /// Percent passing evaluated at each dense size.
    pub fn dense_percent_passing(&self) -> &[f64] {
        &self.dense_percent_passing
    }

    /// Smallest sieve size (mm) in the data.
    pub fn min_size_mm(&self) -> f64 {
        self.sizes_mm[0]
    }

    /// Largest sieve size (mm) in the data.
    pub fn max_size_mm(&self) -> f64 {
        self.sizes_mm[self.sizes_mm.len() - 1]
    }
}

impl Interpolant {
    fn evaluate(&self, t: f64) -> f64 {
        match self {
            Interpolant::MonotoneCubic(cubic) => cubic.evaluate(t),
            Interpolant::Linear(linear) => linear.evaluate(t),
        }
    }
}

/// Computes `(size, percent passing)` pairs for all non-pan readings.
///
/// Readings are ascending, so cumulative retained mass is accumulated in
/// reverse. With nothing retained at all, every percent is zero.
fn percent_passing_points(sample: &GradationSample) -> (Vec<f64>, Vec<f64>) {
    let readings = sample.readings();
    let total_retained: f64 = readings.iter().map(|r| r.retained_g()).sum();

    let mut points: Vec<(f64, f64)> = Vec::with_capacity(readings.len());
    let mut cumulative = 0.0;
    for reading in readings.iter().rev() {
        cumulative += reading.retained_g();
        if reading.is_pan() {
            continue;
        }
        let passing = if total_retained > 0.0 {
            let cumulative_percent = round_to(cumulative / total_retained * 100.0, 4);
            round_to(100.0 - cumulative_percent, 4)
        } else {
            0.0
        };
        points.push((reading.size_mm(), passing));
    }
    points.reverse();
    points.into_iter().unzip()
}

/// `n` log-spaced values between `min` and `max` inclusive.
fn log_spaced(min: f64, max: f64, n: usize) -> Vec<f64> {
    let log_min = min.log10();
    let log_max = max.log10();
    let step = (log_max - log_min) / (n - 1) as f64;
    (0..n)
        .map(|i| 10f64.powf(log_min + step * i as f64))
        .collect()
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

    use crate::models::soil::gradation::core::sample::SieveReading;

    fn reading(size_mm: f64, label: &str, retained_g: f64) -> SieveReading {
        SieveReading::new(
            Length::new::<millimeter>(size_mm),
            label,
            Mass::new::<gram>(retained_g),
        )
        .unwrap()
    }

    /// The "Well Graded Sand" bench sample: 500 g fully retained on sieves.
    fn well_graded_sand() -> GradationSample {
        GradationSample::new(
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
        .unwrap()
    }

    #[test]
    fn percent_passing_rises_with_size() {
        let curve = GradationCurve::build(&well_graded_sand()).unwrap();

        assert_eq!(curve.sizes_mm().len(), 7);
        let expected = [0.0, 5.0, 15.0, 50.0, 80.0, 95.0, 100.0];
        for (got, want) in curve.percent_passing().iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-9);
        }
    }

    #[test]
    fn dense_sample_spans_data_range() {
        let curve = GradationCurve::build(&well_graded_sand()).unwrap();
        let dense = curve.dense_sizes_mm();

        assert_eq!(dense.len(), 1000);
        assert_relative_eq!(dense[0], 0.075, epsilon = 1e-12);
        assert_relative_eq!(dense[999], 4.75, epsilon = 1e-12);
        assert!(dense.windows(2).all(|w| w[1] > w[0]));

        // The interpolant reproduces the node values at the range ends.
        assert_relative_eq!(curve.dense_percent_passing()[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(curve.dense_percent_passing()[999], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn pan_mass_shifts_the_curve_but_adds_no_point() {
        let sample = GradationSample::new(
            Mass::new::<gram>(200.0),
            vec![
                SieveReading::pan("Pan", Mass::new::<gram>(100.0)).unwrap(),
                reading(0.075, "No. 200", 50.0),
                reading(4.75, "No. 4", 50.0),
            ],
        )
        .unwrap();
        let curve = GradationCurve::build(&sample).unwrap();

        assert_eq!(curve.sizes_mm(), &[0.075, 4.75]);
        // 50 g of 200 g retained sits above the No. 200 sieve cumulative; the
        // pan's 100 g keeps percent passing at the finest sieve at 50%.
        assert_relative_eq!(curve.percent_passing()[0], 50.0);
        assert_relative_eq!(curve.percent_passing()[1], 75.0);
    }

    #[test]
    fn nothing_retained_flattens_to_zero() {
        let sample = GradationSample::new(
            Mass::new::<gram>(100.0),
            vec![reading(0.075, "No. 200", 0.0), reading(4.75, "No. 4", 0.0)],
        )
        .unwrap();
        let curve = GradationCurve::build(&sample).unwrap();
        assert_eq!(curve.percent_passing(), &[0.0, 0.0]);
    }

    #[test]
    fn too_few_sieves_is_fatal() {
        let sample = GradationSample::new(
            Mass::new::<gram>(100.0),
            vec![
                SieveReading::pan("Pan", Mass::new::<gram>(50.0)).unwrap(),
                reading(0.075, "No. 200", 50.0),
            ],
        )
        .unwrap();
        assert_eq!(
            GradationCurve::build(&sample).unwrap_err(),
            InsufficientDataError { count: 1 }
        );
    }
}

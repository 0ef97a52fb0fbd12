//! Characteristic particle diameter extraction (D10/D30/D60).
//!
//! For each target percentage the solver applies an ordered chain of
//! strategies, each returning an optional result, with the first success
//! short-circuiting the rest:
//!
//! 1. exact root finding over every sign-change bracket in the dense sample;
//! 2. a refined local search around the dense point closest to the target;
//! 3. the closest dense point itself.
//!
//! Once curve construction has succeeded a D-value is therefore always
//! produced, even for degenerate (flat) curves. No stage enforces
//! `D10 <= D30 <= D60`; that check belongs to result validation.

mod problem;

use twine_solvers::equation::bisection;

use problem::{CrossingProblem, CurveModel};

use super::{curve::GradationCurve, round_to};

/// Number of points sampled inside the refined search window.
const WINDOW_POINTS: usize = 1000;

/// Particle sizes (mm) at 10/30/60 percent passing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DValues {
    pub d10: Option<f64>,
    pub d30: Option<f64>,
    pub d60: Option<f64>,
}

/// Solver configuration for the bracketed crossing search.
#[derive(Debug, Clone, Copy)]
pub struct CrossingConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance for the particle size search variable (mm).
    pub size_tol_mm: f64,

    /// Absolute tolerance for the percent-passing residual.
    pub percent_tol: f64,
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            size_tol_mm: 1e-8,
            percent_tol: 1e-8,
        }
    }
}

impl CrossingConfig {
    /// Converts this configuration into a bisection solver configuration.
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.size_tol_mm,
            x_rel_tol: 0.0,
            residual_tol: self.percent_tol,
        }
    }
}

impl DValues {
    /// Extracts D10, D30, and D60 from a gradation curve.
    pub fn solve(curve: &GradationCurve) -> Self {
        Self::solve_with_config(curve, CrossingConfig::default())
    }

    /// Extracts the D-values with an explicit solver configuration.
    pub fn solve_with_config(curve: &GradationCurve, config: CrossingConfig) -> Self {
        Self {
            d10: solve_crossing(curve, 10.0, config),
            d30: solve_crossing(curve, 30.0, config),
            d60: solve_crossing(curve, 60.0, config),
        }
    }

    /// The D-values paired with their conventional labels.
    pub fn labelled(&self) -> [(&'static str, Option<f64>); 3] {
        [("D10", self.d10), ("D30", self.d30), ("D60", self.d60)]
    }
}

/// Runs the three-stage strategy chain for one target percentage.
fn solve_crossing(curve: &GradationCurve, target: f64, config: CrossingConfig) -> Option<f64> {
    exact_crossing(curve, target, config)
        .or_else(|| refined_search(curve, target))
        .or_else(|| closest_point(curve, target))
        .map(|size| round_to(size, 4))
}

/// Stage 1: bisection on every sign-change bracket of the dense sample.
///
/// Roots outside the data range are discarded; when several crossings exist
/// the smallest qualifying size (the finest diameter satisfying the target)
/// wins. A bracket whose solve fails or does not converge is skipped; the
/// next bracket may still produce a root.
fn exact_crossing(curve: &GradationCurve, target: f64, config: CrossingConfig) -> Option<f64> {
    let xs = curve.dense_sizes_mm();
    let ys = curve.dense_percent_passing();

    let mut finest: Option<f64> = None;
    for i in 0..ys.len() - 1 {
        if (ys[i] - target) * (ys[i + 1] - target) >= 0.0 {
            continue;
        }
        let Some(root) = bisect_bracket(curve, target, [xs[i], xs[i + 1]], config) else {
            continue;
        };
        if root < curve.min_size_mm() || root > curve.max_size_mm() {
            continue;
        }
        finest = Some(match finest {
            Some(best) => best.min(root),
            None => root,
        });
    }
    finest
}

/// Solves a single bracket with the bisection solver.
fn bisect_bracket(
    curve: &GradationCurve,
    target: f64,
    bracket: [f64; 2],
    config: CrossingConfig,
) -> Option<f64> {
    let model = CurveModel::new(curve);
    let problem = CrossingProblem::new(target);

    let solution = bisection::solve(
        &model,
        &problem,
        bracket,
        &config.bisection(),
        |_event: &bisection::Event<'_, _, _>| None,
    )
    .ok()?;

    if solution.status != bisection::Status::Converged {
        return None;
    }
    Some(solution.snapshot.output.size_mm)
}

/// Stage 2: dense re-sampling of the window around the closest dense point,
/// returning the size minimizing the distance to the target percent.
fn refined_search(curve: &GradationCurve, target: f64) -> Option<f64> {
    let xs = curve.dense_sizes_mm();
    let ys = curve.dense_percent_passing();

    let closest = index_of_closest(ys, target)?;
    let lo = xs[closest.saturating_sub(1)];
    let hi = xs[(closest + 1).min(xs.len() - 1)];

    let step = (hi - lo) / (WINDOW_POINTS - 1) as f64;
    let mut best_size = None;
    let mut best_distance = f64::INFINITY;
    for i in 0..WINDOW_POINTS {
        let size = lo + step * i as f64;
        let distance = (curve.percent_at(size) - target).abs();
        if distance < best_distance {
            best_distance = distance;
            best_size = Some(size);
        }
    }
    best_size
}

/// Stage 3: the dense sample size whose percent passing is nearest the target.
fn closest_point(curve: &GradationCurve, target: f64) -> Option<f64> {
    let idx = index_of_closest(curve.dense_percent_passing(), target)?;
    Some(curve.dense_sizes_mm()[idx])
}

/// Index of the value nearest `target`, ignoring non-finite entries.
fn index_of_closest(values: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, value) in values.iter().enumerate() {
        let distance = (value - target).abs();
        if !distance.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
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

    use crate::models::soil::gradation::core::sample::{GradationSample, SieveReading};

    fn reading(size_mm: f64, label: &str, retained_g: f64) -> SieveReading {
        SieveReading::new(
            Length::new::<millimeter>(size_mm),
            label,
            Mass::new::<gram>(retained_g),
        )
        .unwrap()
    }

    fn curve_for(total_g: f64, readings: Vec<SieveReading>) -> GradationCurve {
        let sample = GradationSample::new(Mass::new::<gram>(total_g), readings).unwrap();
        GradationCurve::build(&sample).unwrap()
    }

    #[test]
    fn two_point_curve_has_exact_linear_crossings() {
        // Percent passing runs 0 -> 50 linearly between 0.1 mm and 10 mm.
        let curve = curve_for(
            100.0,
            vec![reading(0.1, "fine", 50.0), reading(10.0, "coarse", 50.0)],
        );
        let d = DValues::solve(&curve);

        let slope = (10.0 - 0.1) / 50.0;
        assert_relative_eq!(d.d10.unwrap(), 0.1 + 10.0 * slope, epsilon = 1e-3);
        assert_relative_eq!(d.d30.unwrap(), 0.1 + 30.0 * slope, epsilon = 1e-3);
        // 60% is never reached: the closest point is the coarse end of the data.
        assert_relative_eq!(d.d60.unwrap(), 10.0, epsilon = 1e-3);
    }

    #[test]
    fn monotone_curve_yields_ordered_d_values() {
        let curve = curve_for(
            500.0,
            vec![
                reading(0.075, "No. 200", 25.0),
                reading(0.15, "No. 100", 50.0),
                reading(0.30, "No. 50", 175.0),
                reading(0.60, "No. 30", 150.0),
                reading(1.18, "No. 16", 75.0),
                reading(2.36, "No. 8", 25.0),
                reading(4.75, "No. 4", 0.0),
            ],
        );
        let d = DValues::solve(&curve);

        let (d10, d30, d60) = (d.d10.unwrap(), d.d30.unwrap(), d.d60.unwrap());
        assert!(d10 <= d30 && d30 <= d60, "unordered: {d10} {d30} {d60}");
        assert!(d10 >= curve.min_size_mm() && d60 <= curve.max_size_mm());

        // Each D-value actually lies on the curve.
        assert_relative_eq!(curve.percent_at(d10), 10.0, epsilon = 1e-2);
        assert_relative_eq!(curve.percent_at(d30), 30.0, epsilon = 1e-2);
        assert_relative_eq!(curve.percent_at(d60), 60.0, epsilon = 1e-2);
    }

    #[test]
    fn flat_curve_still_produces_values() {
        // Nothing retained: percent passing is identically zero, so the
        // closest-point fallback must kick in rather than failing.
        let curve = curve_for(
            100.0,
            vec![reading(0.075, "No. 200", 0.0), reading(4.75, "No. 4", 0.0)],
        );
        let d = DValues::solve(&curve);
        assert!(d.d10.is_some() && d.d30.is_some() && d.d60.is_some());
    }

    #[test]
    fn labelled_order_is_conventional() {
        let d = DValues {
            d10: Some(0.5),
            d30: Some(5.0),
            d60: Some(20.0),
        };
        let labels: Vec<&str> = d.labelled().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["D10", "D30", "D60"]);
    }
}

//! Problem formulation for curve/percentage intersection solving.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{f64::Length, length::millimeter};

use crate::models::soil::gradation::core::curve::GradationCurve;

/// Model adapter exposing the gradation curve to the equation solver.
///
/// The particle size is the sole input variable; the output carries both the
/// size and the evaluated percent passing so the converged root can be read
/// straight off the final snapshot.
pub(super) struct CurveModel<'a> {
    curve: &'a GradationCurve,
}

impl<'a> CurveModel<'a> {
    pub(super) fn new(curve: &'a GradationCurve) -> Self {
        Self { curve }
    }
}

/// A point on the gradation curve.
#[derive(Debug, Clone, Copy)]
pub(super) struct CurvePoint {
    pub(super) size_mm: f64,
    pub(super) percent: f64,
}

impl Model for CurveModel<'_> {
    type Input = Length;
    type Output = CurvePoint;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let size_mm = input.get::<millimeter>();
        Ok(CurvePoint {
            size_mm,
            percent: self.curve.percent_at(size_mm),
        })
    }
}

/// Equation problem definition for a percent-passing crossing.
///
/// Computes the residual as `percent(size) - target_percent`.
pub(super) struct CrossingProblem {
    target_percent: f64,
}

impl CrossingProblem {
    pub(super) fn new(target_percent: f64) -> Self {
        Self { target_percent }
    }
}

impl EquationProblem<1> for CrossingProblem {
    type Input = Length;
    type Output = CurvePoint;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Length::new::<millimeter>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.percent - self.target_percent])
    }
}

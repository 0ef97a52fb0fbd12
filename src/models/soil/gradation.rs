//! Gradation (sieve analysis) model.
//!
//! This module provides a [`twine_core::Model`] implementation for complete
//! sieve analysis runs. The computational core is in the internal [`core`]
//! module; the types a caller needs are re-exported here.

pub(crate) mod core;

pub use self::core::{
    Coefficients, CrossingConfig, DValues, DataConsistencyError, GradationCurve,
    GradationResults, GradationSample, GraphData, InsufficientDataError, ParticleCategory,
    ParticleDistribution, PlotType, SampleError, SieveReading, analyze,
};

use twine_core::Model;

/// Complete sieve analysis as a [`Model`].
///
/// A thin adapter over [`analyze`]: builds the gradation curve, extracts
/// D10/D30/D60, derives Cu/Cc, and buckets retained masses into particle
/// categories, all in one synchronous call.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradationAnalysis;

impl Model for GradationAnalysis {
    type Input = GradationSample;
    type Output = GradationResults;
    type Error = InsufficientDataError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        analyze(input)
    }
}

//! Result types for a sieve analysis run.

use std::collections::BTreeMap;

use super::{
    coefficients::Coefficients,
    d_values::DValues,
    distribution::{DataConsistencyError, ParticleDistribution},
};

/// Everything computed for one sieve analysis run.
///
/// The node and dense arrays mirror the gradation curve; the distribution is
/// all-zero whenever `data_consistency` holds an error (the D-values are
/// unaffected, they derive from percent passing alone).
#[derive(Debug, Clone)]
pub struct GradationResults {
    /// Sieve sizes (mm) backing the curve, ascending.
    pub sizes_mm: Vec<f64>,

    /// Percent passing at each sieve size.
    pub percent_passing: Vec<f64>,

    /// Dense log-spaced curve sizes (mm).
    pub curve_sizes_mm: Vec<f64>,

    /// Percent passing at each dense curve size.
    pub curve_percent_passing: Vec<f64>,

    /// Characteristic diameters at 10/30/60 percent passing.
    pub d_values: DValues,

    /// Gradation coefficients derived from the D-values.
    pub coefficients: Coefficients,

    /// Particle-category percentages of total weight.
    pub distribution: ParticleDistribution,

    /// Mass-balance failure, if the retained masses exceeded the total weight.
    pub data_consistency: Option<DataConsistencyError>,
}

/// Axis treatment requested from the graphing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotType {
    /// Linear axes.
    Simple,
    /// Logarithmic size axis, the conventional gradation plot.
    #[default]
    SemiLog,
    /// Both axes logarithmic.
    LogLog,
}

/// Data handed to the graphing collaborator; the core owns no rendering.
#[derive(Debug, Clone)]
pub struct GraphData<'a> {
    /// Dense curve sizes (mm).
    pub x_smooth: &'a [f64],
    /// Dense curve percent passing.
    pub y_smooth: &'a [f64],
    /// Sieve sizes (mm).
    pub xs: &'a [f64],
    /// Percent passing at each sieve.
    pub ys: &'a [f64],
    /// D-value label to diameter, for the intersection markers.
    pub intersections: BTreeMap<&'static str, f64>,
    /// Requested axis treatment.
    pub plot_type: PlotType,
}

impl GradationResults {
    /// Sanity-checks the computed results before they are trusted.
    ///
    /// Valid means: all three D-values are present with
    /// `D10 <= D30 <= D60`, any present coefficient is strictly positive,
    /// and the distribution percentages sum to 100 within 0.1. Inputs are
    /// not mutated.
    pub fn is_valid(&self) -> bool {
        let (Some(d10), Some(d30), Some(d60)) =
            (self.d_values.d10, self.d_values.d30, self.d_values.d60)
        else {
            return false;
        };
        if !(d10 <= d30 && d30 <= d60) {
            return false;
        }

        if self.coefficients.cu.is_some_and(|cu| cu <= 0.0) {
            return false;
        }
        if self.coefficients.cc.is_some_and(|cc| cc <= 0.0) {
            return false;
        }

        (self.distribution.total() - 100.0).abs() <= 0.1
    }

    /// Borrows the arrays and intersections for the graphing collaborator.
    pub fn graph_data(&self, plot_type: PlotType) -> GraphData<'_> {
        let intersections = self
            .d_values
            .labelled()
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| (label, v)))
            .collect();

        GraphData {
            x_smooth: &self.curve_sizes_mm,
            y_smooth: &self.curve_percent_passing,
            xs: &self.sizes_mm,
            ys: &self.percent_passing,
            intersections,
            plot_type,
        }
    }
}

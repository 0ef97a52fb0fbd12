//! Piecewise-linear interpolation with extrapolation.

/// A piecewise-linear interpolant over nodes with strictly increasing `x`.
///
/// Arguments outside the node range extrapolate along the end segments.
/// Used as the fallback when monotone cubic construction fails.
#[derive(Debug, Clone)]
pub(super) struct PiecewiseLinear {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl PiecewiseLinear {
    /// Builds the interpolant. The caller guarantees at least two nodes with
    /// strictly increasing `x`.
    pub(super) fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert!(x.len() >= 2 && x.len() == y.len());
        Self { x, y }
    }

    /// Evaluates the interpolant at `t`.
    pub(super) fn evaluate(&self, t: f64) -> f64 {
        let idx = self.x.partition_point(|&xi| xi <= t);
        let i = idx.saturating_sub(1).min(self.x.len() - 2);
        let slope = (self.y[i + 1] - self.y[i]) / (self.x[i + 1] - self.x[i]);
        self.y[i] + slope * (t - self.x[i])
    }
}

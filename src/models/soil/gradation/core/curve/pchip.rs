//! Shape-preserving monotone cubic interpolation (Fritsch–Carlson).

use thiserror::Error;

/// A monotone piecewise-cubic Hermite interpolant.
///
/// Node derivatives are chosen with the Fritsch–Carlson weighted harmonic
/// mean, which preserves the monotonicity of the data between nodes and never
/// overshoots a local extremum. Evaluation outside the node range continues
/// the cubic of the nearest end interval.
#[derive(Debug, Clone)]
pub(super) struct MonotoneCubic {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Node derivatives dy/dx.
    d: Vec<f64>,
}

/// Errors raised while constructing a [`MonotoneCubic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(super) enum MonotoneCubicError {
    #[error("at least two interpolation nodes are required")]
    TooFewPoints,

    #[error("interpolation nodes must be finite with strictly increasing x")]
    InvalidNodes,

    #[error("derivative computation produced a non-finite value")]
    NonFinite,
}

impl MonotoneCubic {
    /// Builds the interpolant over nodes with strictly increasing `x`.
    pub(super) fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, MonotoneCubicError> {
        let n = x.len();
        if n < 2 || y.len() != n {
            return Err(MonotoneCubicError::TooFewPoints);
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(MonotoneCubicError::InvalidNodes);
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MonotoneCubicError::InvalidNodes);
        }

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let delta: Vec<f64> = h
            .iter()
            .zip(y.windows(2))
            .map(|(h, w)| (w[1] - w[0]) / h)
            .collect();

        let mut d = vec![0.0; n];
        if n == 2 {
            d[0] = delta[0];
            d[1] = delta[0];
        } else {
            d[0] = edge_derivative(h[0], h[1], delta[0], delta[1]);
            d[n - 1] = edge_derivative(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
            for i in 1..n - 1 {
                if delta[i - 1] * delta[i] <= 0.0 {
                    // Local extremum or flat segment: force a flat tangent.
                    d[i] = 0.0;
                } else {
                    let w1 = 2.0 * h[i] + h[i - 1];
                    let w2 = h[i] + 2.0 * h[i - 1];
                    d[i] = (w1 + w2) / (w1 / delta[i - 1] + w2 / delta[i]);
                }
            }
        }

        if d.iter().any(|v| !v.is_finite()) {
            return Err(MonotoneCubicError::NonFinite);
        }

        Ok(Self { x, y, d })
    }

    /// Evaluates the interpolant at `t`.
    pub(super) fn evaluate(&self, t: f64) -> f64 {
        let i = self.interval(t);
        let h = self.x[i + 1] - self.x[i];
        let s = (t - self.x[i]) / h;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        self.y[i] * h00 + self.d[i] * h * h10 + self.y[i + 1] * h01 + self.d[i + 1] * h * h11
    }

    /// Index of the interval containing `t`, clamped to the node range so
    /// out-of-range arguments extrapolate with the end cubics.
    fn interval(&self, t: f64) -> usize {
        let idx = self.x.partition_point(|&xi| xi <= t);
        idx.saturating_sub(1).min(self.x.len() - 2)
    }
}

/// One-sided three-point derivative estimate for an end node, clamped so the
/// end interval stays monotone (`h0`/`delta0` are adjacent to the edge).
fn edge_derivative(h0: f64, h1: f64, delta0: f64, delta1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * delta0 - h0 * delta1) / (h0 + h1);
    if d * delta0 <= 0.0 {
        0.0
    } else if delta0 * delta1 < 0.0 && d.abs() > 3.0 * delta0.abs() {
        3.0 * delta0
    } else {
        d
    }
}

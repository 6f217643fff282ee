//! Savitzky–Golay smoothing
//!
//! Every position is replaced by the value of a least-squares polynomial fitted
//! to the window around it. Near the ends, where a centered window does not
//! fit, the polynomial of the first (or last) full window is evaluated at the
//! position instead.
//!
//! The fit is linear in the window values, so the whole filter reduces to a
//! `w × w` projection matrix computed once per call: row `k` holds the weights
//! that produce the fitted value at offset `k` of a window.

use crate::traits::{FilterOutcome, SeriesFilter};
use anomaly_core::{Error, Result, TimeSeries};
use nalgebra::DMatrix;
use tracing::trace;

/// Upper bound on the smoothing window
pub const MAX_SMOOTHING_WINDOW: usize = 15;

/// Degree of the local polynomial
pub const SMOOTHING_POLYORDER: usize = 3;

/// Local cubic smoother with a length-dependent window
#[derive(Debug, Clone, Copy)]
pub struct SavitzkyGolaySmoother {
    max_window: usize,
    polyorder: usize,
}

impl Default for SavitzkyGolaySmoother {
    fn default() -> Self {
        Self {
            max_window: MAX_SMOOTHING_WINDOW,
            polyorder: SMOOTHING_POLYORDER,
        }
    }
}

impl SavitzkyGolaySmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window used for a series of `len` points: `min(15, len / 3)`, made odd
    pub fn window_for(&self, len: usize) -> usize {
        let width = self.max_window.min(len / 3);
        if width % 2 == 0 {
            width + 1
        } else {
            width
        }
    }

    /// Smooth `values`
    ///
    /// Series no longer than their window are returned unchanged. When the
    /// window has no more points than the polynomial has coefficients the fit
    /// is exact, so the values are returned unchanged as well.
    pub fn smooth(&self, values: &[f64]) -> Result<Vec<f64>> {
        let n = values.len();
        let width = self.window_for(n);
        let order = self.polyorder.min(width - 1);
        if n <= width || order + 1 >= width {
            trace!(len = n, width, "smoothing skipped");
            return Ok(values.to_vec());
        }
        trace!(len = n, width, order, "smoothing");

        let projection = projection_matrix(width, order)?;
        let half = width / 2;
        let smoothed: Vec<f64> = (0..n)
            .map(|i| {
                let start = i.saturating_sub(half).min(n - width);
                let row = projection.row(i - start);
                values[start..start + width]
                    .iter()
                    .zip(row.iter())
                    .map(|(v, w)| v * w)
                    .sum::<f64>()
            })
            .collect();
        Ok(smoothed)
    }
}

/// `X (XᵀX)⁻¹ Xᵀ` for a Vandermonde design on offsets centered in the window
fn projection_matrix(width: usize, order: usize) -> Result<DMatrix<f64>> {
    let center = (width / 2) as f64;
    let design = DMatrix::from_fn(width, order + 1, |r, c| (r as f64 - center).powi(c as i32));
    let xt = design.transpose();
    let xtx = &xt * &design;

    let weights = match xtx.clone().cholesky() {
        Some(chol) => chol.solve(&xt),
        None => xtx
            .svd(true, true)
            .solve(&xt, 1e-10)
            .map_err(|e| Error::Computation(format!("Savitzky-Golay fit failed: {e}")))?,
    };
    Ok(design * weights)
}

impl SeriesFilter for SavitzkyGolaySmoother {
    fn name(&self) -> &'static str {
        "smoother"
    }

    fn filter(&self, series: &TimeSeries) -> Result<FilterOutcome> {
        let smoothed = self.smooth(series.values())?;
        Ok(FilterOutcome::unchanged(series.with_values(smoothed)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_window_for_length() {
        let s = SavitzkyGolaySmoother::new();
        assert_eq!(s.window_for(0), 1);
        assert_eq!(s.window_for(5), 1);
        assert_eq!(s.window_for(15), 5);
        assert_eq!(s.window_for(18), 7);
        assert_eq!(s.window_for(30), 11);
        assert_eq!(s.window_for(45), 15);
        assert_eq!(s.window_for(1000), 15);
    }

    #[test]
    fn test_short_series_unchanged() {
        let s = SavitzkyGolaySmoother::new();
        let values = [10.0, 10.0, 100.0, 10.0, 10.0];
        assert_eq!(s.smooth(&values).unwrap(), values.to_vec());
        // window 3 admits at most a quadratic: exact fit
        let values: Vec<f64> = (0..9).map(|i| ((i * 37) % 11) as f64).collect();
        assert_eq!(s.smooth(&values).unwrap(), values);
    }

    #[test]
    fn test_projection_rows_sum_to_one() {
        let p = projection_matrix(7, 3).unwrap();
        for r in 0..7 {
            assert_abs_diff_eq!(p.row(r).sum(), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_center_weights_match_tabulated_coefficients() {
        // classic 7-point cubic: (-2, 3, 6, 7, 6, 3, -2) / 21
        let p = projection_matrix(7, 3).unwrap();
        let expected = [-2.0, 3.0, 6.0, 7.0, 6.0, 3.0, -2.0];
        for (w, e) in p.row(3).iter().zip(expected) {
            assert_abs_diff_eq!(*w, e / 21.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_cubic_is_preserved_including_edges() {
        let values: Vec<f64> = (0..60)
            .map(|i| {
                let x = i as f64 / 10.0;
                0.5 * x * x * x - 2.0 * x * x + x + 3.0
            })
            .collect();
        let smoothed = SavitzkyGolaySmoother::new().smooth(&values).unwrap();
        for (s, v) in smoothed.iter().zip(&values) {
            assert_abs_diff_eq!(*s, *v, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_alternating_noise_is_damped() {
        let values: Vec<f64> = (0..90)
            .map(|i| 50.0 + if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let smoothed = SavitzkyGolaySmoother::new().smooth(&values).unwrap();
        let interior = &smoothed[7..83];
        assert!(interior.iter().all(|v| (v - 50.0).abs() < 0.5));
    }

    #[test]
    fn test_filter_keeps_timestamps() {
        let series = TimeSeries::new(
            (0..20).map(|i| i * 10).collect(),
            (0..20).map(|i| i as f64).collect(),
        )
        .unwrap();
        let outcome = SavitzkyGolaySmoother::new().filter(&series).unwrap();
        assert_eq!(outcome.series.times(), series.times());
        assert!(outcome.flagged.is_empty());
    }
}

//! Rolling evaluation of window statistics
//!
//! Scans every position of a series with a [`CenteredWindow`] and evaluates a
//! [`WindowStatistic`] over the valid values it covers. Cost is O(N·W); the
//! series this serves are hundreds to low thousands of points.

use crate::statistic::{Mad, Mean, Median, Quantile, WindowStatistic};
use crate::window::CenteredWindow;
use tracing::trace;

/// Kernel for centered rolling computations
#[derive(Debug, Clone, Copy)]
pub struct RollingKernel {
    window: CenteredWindow,
}

impl RollingKernel {
    pub fn new(window: CenteredWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &CenteredWindow {
        &self.window
    }

    /// Evaluate `stat` at every position
    ///
    /// `NaN` values inside a window are skipped. A window with no valid value
    /// produces `NaN`.
    pub fn apply<S>(&self, data: &[f64], stat: &S) -> Vec<f64>
    where
        S: WindowStatistic + ?Sized,
    {
        trace!(
            statistic = stat.name(),
            width = self.window.width(),
            len = data.len(),
            "rolling pass"
        );

        let mut scratch = Vec::with_capacity(self.window.width());
        (0..data.len())
            .map(|i| self.evaluate(data, i, stat, &mut scratch))
            .collect()
    }

    /// Evaluate several statistics in a single pass over the windows
    pub fn apply_multi(&self, data: &[f64], stats: &[&dyn WindowStatistic]) -> Vec<Vec<f64>> {
        let mut results = vec![Vec::with_capacity(data.len()); stats.len()];
        let mut scratch = Vec::with_capacity(self.window.width());

        for i in 0..data.len() {
            for (j, stat) in stats.iter().enumerate() {
                results[j].push(self.evaluate(data, i, *stat, &mut scratch));
            }
        }

        results
    }

    fn evaluate<S>(&self, data: &[f64], index: usize, stat: &S, scratch: &mut Vec<f64>) -> f64
    where
        S: WindowStatistic + ?Sized,
    {
        scratch.clear();
        scratch.extend(
            data[self.window.bounds(index, data.len())]
                .iter()
                .copied()
                .filter(|v| !v.is_nan()),
        );
        if scratch.is_empty() {
            f64::NAN
        } else {
            stat.compute(scratch)
        }
    }
}

/// Centered rolling mean
pub fn rolling_mean(data: &[f64], window: CenteredWindow) -> Vec<f64> {
    RollingKernel::new(window).apply(data, &Mean)
}

/// Centered rolling median
pub fn rolling_median(data: &[f64], window: CenteredWindow) -> Vec<f64> {
    RollingKernel::new(window).apply(data, &Median)
}

/// Centered rolling median absolute deviation
pub fn rolling_mad(data: &[f64], window: CenteredWindow) -> Vec<f64> {
    RollingKernel::new(window).apply(data, &Mad)
}

/// Centered rolling quantile
pub fn rolling_quantile(data: &[f64], window: CenteredWindow, quantile: Quantile) -> Vec<f64> {
    RollingKernel::new(window).apply(data, &quantile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowBoundary;
    use approx::assert_relative_eq;

    #[test]
    fn test_rolling_mean_truncates_at_edges() {
        let data = [0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0];
        let w = CenteredWindow::new(3).unwrap();
        let means = rolling_mean(&data, w);
        assert_relative_eq!(means[0], 0.0);
        assert_relative_eq!(means[2], 10.0 / 3.0);
        assert_relative_eq!(means[3], 10.0 / 3.0);
        assert_relative_eq!(means[4], 10.0 / 3.0);
        assert_relative_eq!(means[6], 0.0);
    }

    #[test]
    fn test_nan_is_skipped() {
        let data = [f64::NAN, 2.0, 4.0];
        let w = CenteredWindow::new(3).unwrap();
        let means = rolling_mean(&data, w);
        assert_relative_eq!(means[0], 2.0);
        assert_relative_eq!(means[1], 3.0);

        let all_missing = [f64::NAN, f64::NAN];
        assert!(rolling_mean(&all_missing, w).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rolling_median_and_mad_around_spike() {
        let data = [10.0, 10.0, 100.0, 10.0, 10.0];
        let w = CenteredWindow::new(5).unwrap();
        let medians = rolling_median(&data, w);
        let mads = rolling_mad(&data, w);
        assert!(medians.iter().all(|&m| m == 10.0));
        assert!(mads.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_rolling_quantile_edges() {
        let data = [10.0, 11.0, 10.0, 11.0, 10.0];
        let w = CenteredWindow::new(5).unwrap();
        let q3 = rolling_quantile(&data, w, Quantile::upper_quartile());
        // position 0 sees [10, 11, 10]
        assert_relative_eq!(q3[0], 10.5);
        // position 2 sees everything
        assert_relative_eq!(q3[2], 11.0);
    }

    #[test]
    fn test_apply_multi_matches_single() {
        let data: Vec<f64> = (0..20).map(|i| ((i * 7) % 5) as f64).collect();
        let kernel = RollingKernel::new(CenteredWindow::new(4).unwrap());
        let q1 = Quantile::lower_quartile();
        let q3 = Quantile::upper_quartile();
        let multi = kernel.apply_multi(&data, &[&q1, &q3]);
        assert_eq!(multi[0], kernel.apply(&data, &q1));
        assert_eq!(multi[1], kernel.apply(&data, &q3));
    }

    #[test]
    fn test_shrink_boundary_uses_single_point_at_ends() {
        let data = [1.0, 5.0, 9.0];
        let w = CenteredWindow::new(3)
            .unwrap()
            .with_boundary(WindowBoundary::Shrink);
        let means = rolling_mean(&data, w);
        assert_eq!(means, vec![1.0, 5.0, 9.0]);
    }

    #[test]
    fn test_empty_input() {
        let w = CenteredWindow::new(3).unwrap();
        assert!(rolling_median(&[], w).is_empty());
    }
}

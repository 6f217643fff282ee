//! Rolling acceptance fences
//!
//! A fence is the closed interval a value must fall in to be kept. Both
//! cleaning passes compute one fence per position from the window around it.

use anomaly_window::{Mad, Median, Quantile, RollingKernel, WindowStatistic};

/// Closed acceptance interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fence {
    pub lower: f64,
    pub upper: f64,
}

impl Fence {
    /// `center ± scale × spread`
    pub fn around(center: f64, spread: f64, scale: f64) -> Self {
        Self {
            lower: center - scale * spread,
            upper: center + scale * spread,
        }
    }

    /// Strictly outside the interval
    ///
    /// Comparisons with `NaN` are false, so an undefined fence or value never
    /// flags anything.
    pub fn excludes(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// `median ± threshold × MAD` over each window
pub fn mad_fences(values: &[f64], kernel: &RollingKernel, threshold: f64) -> Vec<Fence> {
    let stats: [&dyn WindowStatistic; 2] = [&Median, &Mad];
    let rolled = kernel.apply_multi(values, &stats);
    rolled[0]
        .iter()
        .zip(&rolled[1])
        .map(|(&median, &mad)| Fence::around(median, mad, threshold))
        .collect()
}

/// `[Q1 − threshold × IQR, Q3 + threshold × IQR]` over each window
pub fn iqr_fences(values: &[f64], kernel: &RollingKernel, threshold: f64) -> Vec<Fence> {
    let q1 = Quantile::lower_quartile();
    let q3 = Quantile::upper_quartile();
    let stats: [&dyn WindowStatistic; 2] = [&q1, &q3];
    let rolled = kernel.apply_multi(values, &stats);
    rolled[0]
        .iter()
        .zip(&rolled[1])
        .map(|(&lo, &hi)| {
            let iqr = hi - lo;
            Fence {
                lower: lo - threshold * iqr,
                upper: hi + threshold * iqr,
            }
        })
        .collect()
}

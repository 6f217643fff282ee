//! Statistics evaluated over a single window

use anomaly_core::stats;
use anomaly_core::{Error, Result};

/// A statistic computed from the valid values of one window
///
/// `compute` receives a non-empty scratch buffer that it may reorder or
/// overwrite.
pub trait WindowStatistic {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Evaluate the statistic
    fn compute(&self, window: &mut [f64]) -> f64;
}

/// Arithmetic mean
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

impl WindowStatistic for Mean {
    fn name(&self) -> &'static str {
        "mean"
    }

    fn compute(&self, window: &mut [f64]) -> f64 {
        stats::mean(window)
    }
}

/// Median
#[derive(Debug, Clone, Copy, Default)]
pub struct Median;

impl WindowStatistic for Median {
    fn name(&self) -> &'static str {
        "median"
    }

    fn compute(&self, window: &mut [f64]) -> f64 {
        stats::median(window)
    }
}

/// Median absolute deviation around the window's own median (unscaled)
#[derive(Debug, Clone, Copy, Default)]
pub struct Mad;

impl WindowStatistic for Mad {
    fn name(&self) -> &'static str {
        "mad"
    }

    fn compute(&self, window: &mut [f64]) -> f64 {
        stats::median_absolute_deviation(window)
    }
}

/// Quantile with linear interpolation between closest ranks
#[derive(Debug, Clone, Copy)]
pub struct Quantile {
    p: f64,
}

impl Quantile {
    pub fn new(p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::invalid_quantile(p));
        }
        Ok(Self { p })
    }

    /// First quartile
    pub fn lower_quartile() -> Self {
        Self { p: 0.25 }
    }

    /// Third quartile
    pub fn upper_quartile() -> Self {
        Self { p: 0.75 }
    }

    pub fn probability(&self) -> f64 {
        self.p
    }
}

impl WindowStatistic for Quantile {
    fn name(&self) -> &'static str {
        "quantile"
    }

    fn compute(&self, window: &mut [f64]) -> f64 {
        stats::quantile(window, self.p)
    }
}

//! Removal of gross outliers against a rolling median/MAD fence

use crate::fence::mad_fences;
use crate::params::validate_threshold;
use crate::traits::{FilterOutcome, SeriesFilter};
use anomaly_core::{mask_and_fill, Result, TimeSeries};
use anomaly_window::{CenteredWindow, RollingKernel};

/// Replaces values outside `median ± threshold × MAD` by interpolation
#[derive(Debug, Clone, Copy)]
pub struct ExtremeOutlierFilter {
    kernel: RollingKernel,
    threshold: f64,
}

impl ExtremeOutlierFilter {
    pub fn new(window: CenteredWindow, threshold: f64) -> Result<Self> {
        validate_threshold("extreme_threshold", threshold)?;
        Ok(Self {
            kernel: RollingKernel::new(window),
            threshold,
        })
    }

    /// Outlier mask, one entry per position
    pub fn outliers(&self, values: &[f64]) -> Vec<bool> {
        mad_fences(values, &self.kernel, self.threshold)
            .iter()
            .zip(values)
            .map(|(fence, &value)| fence.excludes(value))
            .collect()
    }
}

impl SeriesFilter for ExtremeOutlierFilter {
    fn name(&self) -> &'static str {
        "extreme"
    }

    fn filter(&self, series: &TimeSeries) -> Result<FilterOutcome> {
        let mask = self.outliers(series.values());
        let (values, flagged) = mask_and_fill(series.values(), &mask)?;
        Ok(FilterOutcome {
            series: series.with_values(values)?,
            flagged,
            protected: Vec::new(),
        })
    }
}

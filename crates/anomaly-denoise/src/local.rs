//! Removal of local outliers against a rolling quartile fence
//!
//! Positions inside a detected transition are never flagged, so real level
//! shifts survive the pass.

use crate::fence::iqr_fences;
use crate::params::validate_threshold;
use crate::traits::{FilterOutcome, SeriesFilter};
use crate::transition::TransitionDetector;
use anomaly_core::{mask_and_fill, Error, Result, TimeSeries};
use anomaly_window::{CenteredWindow, RollingKernel};

/// Replaces values outside `[Q1 − t·IQR, Q3 + t·IQR]` outside transitions
#[derive(Debug, Clone, Copy)]
pub struct LocalAnomalyFilter {
    kernel: RollingKernel,
    threshold: f64,
    transitions: TransitionDetector,
}

impl LocalAnomalyFilter {
    pub fn new(
        window: CenteredWindow,
        threshold: f64,
        transitions: TransitionDetector,
    ) -> Result<Self> {
        validate_threshold("local_threshold", threshold)?;
        Ok(Self {
            kernel: RollingKernel::new(window),
            threshold,
            transitions,
        })
    }

    pub fn transitions(&self) -> &TransitionDetector {
        &self.transitions
    }

    /// Outlier mask given a precomputed transition mask
    pub fn outliers(&self, values: &[f64], transitions: &[bool]) -> Result<Vec<bool>> {
        if values.len() != transitions.len() {
            return Err(Error::size_mismatch(
                values.len(),
                transitions.len(),
                "transition mask",
            ));
        }

        Ok(iqr_fences(values, &self.kernel, self.threshold)
            .iter()
            .zip(values)
            .zip(transitions)
            .map(|((fence, &value), &in_transition)| !in_transition && fence.excludes(value))
            .collect())
    }
}

impl SeriesFilter for LocalAnomalyFilter {
    fn name(&self) -> &'static str {
        "local"
    }

    fn filter(&self, series: &TimeSeries) -> Result<FilterOutcome> {
        let transitions = self.transitions.detect(series.values());
        let mask = self.outliers(series.values(), &transitions)?;
        let (values, flagged) = mask_and_fill(series.values(), &mask)?;
        let protected = transitions
            .iter()
            .enumerate()
            .filter_map(|(i, &t)| t.then_some(i))
            .collect();

        Ok(FilterOutcome {
            series: series.with_values(values)?,
            flagged,
            protected,
        })
    }
}

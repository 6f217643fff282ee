//! The seam shared by the value-changing cleaning stages

use anomaly_core::{Result, TimeSeries};

/// Result of one cleaning stage
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// The series after the stage, on the same timestamps
    pub series: TimeSeries,
    /// Positions whose value the stage rejected and reconstructed
    pub flagged: Vec<usize>,
    /// Positions the stage refused to flag regardless of their value
    pub protected: Vec<usize>,
}

impl FilterOutcome {
    /// Outcome of a stage that flags nothing
    pub fn unchanged(series: TimeSeries) -> Self {
        Self {
            series,
            flagged: Vec::new(),
            protected: Vec::new(),
        }
    }
}

/// A pass over a series that may replace values but never moves timestamps
pub trait SeriesFilter {
    /// Stage name used in logs and reports
    fn name(&self) -> &'static str;

    /// Apply the stage
    fn filter(&self, series: &TimeSeries) -> Result<FilterOutcome>;
}

//! Canonical time-indexed series

use crate::error::{Error, Result};
use crate::sample::{RawBatch, Sample};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// A series with unique, ascending timestamps
///
/// `NaN` in `values` marks a missing observation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    times: Vec<i64>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from parallel time/value vectors
    ///
    /// Times must be strictly ascending.
    pub fn new(times: Vec<i64>, values: Vec<f64>) -> Result<Self> {
        if times.len() != values.len() {
            return Err(Error::size_mismatch(times.len(), values.len(), "time series values"));
        }
        if times.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidInput(
                "timestamps must be unique and strictly ascending".to_string(),
            ));
        }
        Ok(Self { times, values })
    }

    /// An empty series
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn times(&self) -> &[i64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Value at a timestamp, if present
    pub fn get(&self, time: i64) -> Option<f64> {
        self.times
            .binary_search(&time)
            .ok()
            .map(|idx| self.values[idx])
    }

    /// Iterate `(time, value)` pairs in ascending time order
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Same temporal domain, new values
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.times.len() {
            return Err(Error::size_mismatch(self.times.len(), values.len(), "replacement values"));
        }
        Ok(Self {
            times: self.times.clone(),
            values,
        })
    }

    /// Number of missing (`NaN`) positions
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// Restrict both series to the timestamps they share
    ///
    /// Returns `(times, self_values, other_values)` in ascending time order.
    pub fn intersect(&self, other: &TimeSeries) -> (Vec<i64>, Vec<f64>, Vec<f64>) {
        let mut times = Vec::new();
        let mut left = Vec::new();
        let mut right = Vec::new();

        let (mut i, mut j) = (0, 0);
        while i < self.len() && j < other.len() {
            match self.times[i].cmp(&other.times[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    times.push(self.times[i]);
                    left.push(self.values[i]);
                    right.push(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }

        (times, left, right)
    }

    /// Convert back to wire records, dropping missing positions
    pub fn to_samples(&self) -> Vec<Sample> {
        self.iter()
            .filter(|(_, value)| !value.is_nan())
            .map(|(time, value)| Sample { time, value })
            .collect()
    }
}

impl fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TimeSeries ({} points):", self.len())?;
        for (time, value) in self.iter() {
            writeln!(f, "  {time}: {value}")?;
        }
        Ok(())
    }
}

/// Normalizes raw records into a [`TimeSeries`]
///
/// Records sharing a timestamp are merged into their arithmetic mean, then the
/// result is ordered by ascending time. The merge is lossy by construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesBuilder;

impl SeriesBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a series from records in any order
    ///
    /// # Examples
    ///
    /// ```rust
    /// use anomaly_core::{Sample, SeriesBuilder};
    ///
    /// let series = SeriesBuilder::new().build(&[
    ///     Sample::new(5, 4.0),
    ///     Sample::new(1, 1.0),
    ///     Sample::new(5, 2.0),
    /// ]);
    /// assert_eq!(series.times(), &[1, 5]);
    /// assert_eq!(series.values(), &[1.0, 3.0]);
    /// ```
    pub fn build(&self, samples: &[Sample]) -> TimeSeries {
        let mut groups: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
        for sample in samples {
            let entry = groups.entry(sample.time).or_insert((0.0, 0));
            entry.0 += sample.value;
            entry.1 += 1;
        }

        if groups.len() < samples.len() {
            trace!(
                records = samples.len(),
                distinct = groups.len(),
                "merged duplicate timestamps"
            );
        }

        let mut times = Vec::with_capacity(groups.len());
        let mut values = Vec::with_capacity(groups.len());
        for (time, (sum, count)) in groups {
            times.push(time);
            values.push(if count == 1 { sum } else { sum / count as f64 });
        }

        TimeSeries { times, values }
    }

    /// Build a series from a possibly wrapped batch
    pub fn build_batch(&self, batch: &RawBatch) -> TimeSeries {
        self.build(batch.samples())
    }
}

//! The multi-pass cleaning pipeline

use crate::extreme::ExtremeOutlierFilter;
use crate::local::LocalAnomalyFilter;
use crate::params::DenoiseParameters;
use crate::smoother::SavitzkyGolaySmoother;
use crate::traits::SeriesFilter;
use crate::transition::TransitionDetector;
use anomaly_core::{RawBatch, Result, Sample, SeriesBuilder, TimeSeries};
use tracing::{debug, instrument};

/// What each pass of a [`Denoiser`] run did
#[derive(Debug, Clone, PartialEq)]
pub struct DenoiseReport {
    /// The input after duplicate merging and ordering
    pub original: TimeSeries,
    /// The cleaned series, on the same timestamps as `original`
    pub cleaned: TimeSeries,
    /// Positions replaced by the extreme pass
    pub extreme_outliers: Vec<usize>,
    /// Positions replaced by the local pass
    pub local_outliers: Vec<usize>,
    /// Positions shielded from the local pass as part of a transition
    pub transition_mask: Vec<bool>,
}

impl DenoiseReport {
    fn empty() -> Self {
        Self {
            original: TimeSeries::empty(),
            cleaned: TimeSeries::empty(),
            extreme_outliers: Vec::new(),
            local_outliers: Vec::new(),
            transition_mask: Vec::new(),
        }
    }

    /// Cleaned records, ascending by time, without missing positions
    pub fn samples(&self) -> Vec<Sample> {
        self.cleaned.to_samples()
    }

    /// Timestamps of every position replaced by either outlier pass
    pub fn replaced_times(&self) -> Vec<i64> {
        let times = self.original.times();
        let mut indices: Vec<usize> = self
            .extreme_outliers
            .iter()
            .chain(&self.local_outliers)
            .copied()
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices.into_iter().map(|i| times[i]).collect()
    }
}

/// Cleans a noisy series in three passes
///
/// 1. extreme outliers against a rolling median/MAD fence;
/// 2. local outliers against a rolling quartile fence, skipping transitions;
/// 3. Savitzky–Golay smoothing.
///
/// Removed values are reconstructed by interpolation, so the output keeps
/// every input timestamp.
///
/// # Examples
///
/// ```rust
/// use anomaly_core::Sample;
/// use anomaly_denoise::Denoiser;
///
/// let denoiser = Denoiser::with_defaults().unwrap();
/// let samples: Vec<Sample> = [10.0, 10.0, 100.0, 10.0, 10.0]
///     .iter()
///     .enumerate()
///     .map(|(t, &v)| Sample::new(t as i64, v))
///     .collect();
///
/// let cleaned = denoiser.process_samples(&samples).unwrap();
/// assert_eq!(cleaned[2], Sample::new(2, 10.0));
/// ```
#[derive(Debug, Clone)]
pub struct Denoiser {
    params: DenoiseParameters,
    builder: SeriesBuilder,
    extreme: ExtremeOutlierFilter,
    local: LocalAnomalyFilter,
    smoother: SavitzkyGolaySmoother,
}

impl Denoiser {
    /// Create a denoiser, validating `params`
    pub fn new(params: DenoiseParameters) -> Result<Self> {
        params.validate()?;

        let transitions = TransitionDetector::new(
            params.window(params.transition_window)?,
            params.transition_threshold,
        )?;
        let extreme = ExtremeOutlierFilter::new(
            params.window(params.extreme_window)?,
            params.extreme_threshold,
        )?;
        let local = LocalAnomalyFilter::new(
            params.window(params.local_window)?,
            params.local_threshold,
            transitions,
        )?;

        Ok(Self {
            params,
            builder: SeriesBuilder::new(),
            extreme,
            local,
            smoother: SavitzkyGolaySmoother::new(),
        })
    }

    /// Create a denoiser with [`DenoiseParameters::default`]
    pub fn with_defaults() -> Result<Self> {
        Self::new(DenoiseParameters::default())
    }

    pub fn parameters(&self) -> &DenoiseParameters {
        &self.params
    }

    /// Clean a possibly wrapped batch of records
    #[instrument(skip(self, batch), fields(records = batch.len()))]
    pub fn process(&self, batch: &RawBatch) -> Result<Vec<Sample>> {
        Ok(self.run(batch.samples())?.samples())
    }

    /// Clean records given in any order
    #[instrument(skip(self, samples), fields(records = samples.len()))]
    pub fn process_samples(&self, samples: &[Sample]) -> Result<Vec<Sample>> {
        Ok(self.run(samples)?.samples())
    }

    /// Clean records and report what each pass changed
    #[instrument(skip(self, samples), fields(records = samples.len()))]
    pub fn process_with_report(&self, samples: &[Sample]) -> Result<DenoiseReport> {
        self.run(samples)
    }

    /// Clean an already normalized series
    pub fn clean(&self, series: &TimeSeries) -> Result<DenoiseReport> {
        if series.is_empty() {
            debug!("empty series, nothing to clean");
            return Ok(DenoiseReport::empty());
        }

        let extreme = self.extreme.filter(series)?;
        debug!(
            stage = self.extreme.name(),
            flagged = extreme.flagged.len(),
            "pass complete"
        );

        let local = self.local.filter(&extreme.series)?;
        debug!(
            stage = self.local.name(),
            flagged = local.flagged.len(),
            protected = local.protected.len(),
            "pass complete"
        );

        let smoothed = self.smoother.filter(&local.series)?;
        debug!(
            stage = self.smoother.name(),
            window = self.smoother.window_for(series.len()),
            "pass complete"
        );

        let mut transition_mask = vec![false; series.len()];
        for &i in &local.protected {
            transition_mask[i] = true;
        }

        Ok(DenoiseReport {
            original: series.clone(),
            cleaned: smoothed.series,
            extreme_outliers: extreme.flagged,
            local_outliers: local.flagged,
            transition_mask,
        })
    }

    fn run(&self, samples: &[Sample]) -> Result<DenoiseReport> {
        if samples.is_empty() {
            debug!("no records, nothing to clean");
            return Ok(DenoiseReport::empty());
        }
        let series = self.builder.build(samples);
        self.clean(&series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DenoiserBuilder;

    fn samples(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(t, &v)| Sample::new(t as i64, v))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let denoiser = Denoiser::with_defaults().unwrap();
        assert!(denoiser.process_samples(&[]).unwrap().is_empty());
        assert!(denoiser.process(&RawBatch::Wrapped(vec![])).unwrap().is_empty());
        let report = denoiser.process_with_report(&[]).unwrap();
        assert!(report.cleaned.is_empty());
    }

    #[test]
    fn test_spike_is_interpolated() {
        let cleaned = Denoiser::with_defaults()
            .unwrap()
            .process_samples(&samples(&[10.0, 10.0, 100.0, 10.0, 10.0]))
            .unwrap();
        assert_eq!(cleaned, samples(&[10.0; 5]));
    }

    #[test]
    fn test_duplicates_merged_before_cleaning() {
        let records = vec![
            Sample::new(2, 10.0),
            Sample::new(0, 10.0),
            Sample::new(1, 9.0),
            Sample::new(1, 11.0),
        ];
        let cleaned = Denoiser::with_defaults()
            .unwrap()
            .process_samples(&records)
            .unwrap();
        assert_eq!(cleaned, samples(&[10.0, 10.0, 10.0]));
    }

    #[test]
    fn test_zero_mad_makes_extreme_fence_a_point() {
        // more than half the window sits exactly on the median
        let values = [10.0, 11.0, 10.0, 11.0, 10.0, 30.0, 10.0, 11.0, 10.0, 11.0, 10.0];
        let report = Denoiser::with_defaults()
            .unwrap()
            .process_with_report(&samples(&values))
            .unwrap();
        assert_eq!(report.extreme_outliers, vec![1, 3, 5, 7, 9]);
        assert!(report.cleaned.values().iter().all(|&v| v == 10.0));
    }

    #[test]
    fn test_report_records_each_pass() {
        let mut values: Vec<f64> = (0..30).map(|i| 10.0 + (i % 3) as f64).collect();
        values[16] = 13.5;
        let denoiser = DenoiserBuilder::new()
            .local_threshold(0.5)
            .transition_threshold(5.0)
            .build()
            .unwrap();
        let report = denoiser.process_with_report(&samples(&values)).unwrap();

        assert!(report.extreme_outliers.is_empty());
        assert_eq!(report.local_outliers, vec![16]);
        assert!(report.transition_mask.iter().all(|&m| !m));
        assert_eq!(report.transition_mask.len(), values.len());
        assert_eq!(report.replaced_times(), vec![16]);
        assert_eq!(report.original.values(), values.as_slice());
        assert_eq!(report.cleaned.times(), report.original.times());
    }

    #[test]
    fn test_single_record() {
        let cleaned = Denoiser::with_defaults()
            .unwrap()
            .process_samples(&[Sample::new(42, 3.5)])
            .unwrap();
        assert_eq!(cleaned, vec![Sample::new(42, 3.5)]);
    }
}

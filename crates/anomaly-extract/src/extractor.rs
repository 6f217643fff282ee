//! Comparison of an original series against its cleaned counterpart

use anomaly_core::{Error, RawBatch, Result, Sample, SeriesBuilder, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Extraction parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorParameters {
    /// Largest tolerated absolute deviation from the cleaned value
    pub epsilon: f64,
}

impl Default for ExtractorParameters {
    fn default() -> Self {
        Self { epsilon: 0.5 }
    }
}

impl ExtractorParameters {
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::invalid_threshold("epsilon", self.epsilon));
        }
        Ok(())
    }

    /// Parse and validate parameters from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }
}

/// Deviation of one shared timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    pub time: i64,
    pub original: f64,
    pub cleaned: f64,
}

impl Deviation {
    /// `|original − cleaned|`
    pub fn magnitude(&self) -> f64 {
        (self.original - self.cleaned).abs()
    }
}

/// Reports original observations that stray from the cleaned signal
///
/// # Examples
///
/// ```rust
/// use anomaly_core::Sample;
/// use anomaly_extract::AnomalyExtractor;
///
/// let extractor = AnomalyExtractor::with_epsilon(5.0).unwrap();
/// let original = [Sample::new(0, 10.0), Sample::new(1, 100.0)];
/// let cleaned = [Sample::new(0, 10.0), Sample::new(1, 10.0)];
///
/// let anomalies = extractor.process_pair(&original, &cleaned);
/// assert_eq!(anomalies, vec![Sample::new(1, 100.0)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnomalyExtractor {
    params: ExtractorParameters,
    builder: SeriesBuilder,
}

impl AnomalyExtractor {
    pub fn new(params: ExtractorParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            builder: SeriesBuilder::new(),
        })
    }

    pub fn with_epsilon(epsilon: f64) -> Result<Self> {
        Self::new(ExtractorParameters { epsilon })
    }

    pub fn parameters(&self) -> &ExtractorParameters {
        &self.params
    }

    /// Extract anomalies from an `[original, cleaned]` pair of batches
    ///
    /// Any other number of batches yields no anomalies.
    #[instrument(skip(self, batches), fields(batches = batches.len()))]
    pub fn process(&self, batches: &[RawBatch]) -> Result<Vec<Sample>> {
        match batches {
            [original, cleaned] => Ok(self.process_pair(original.samples(), cleaned.samples())),
            _ => {
                debug!("expected exactly two batches");
                Ok(Vec::new())
            }
        }
    }

    /// Original observations deviating from the cleaned value by more than
    /// epsilon, ascending by time
    pub fn process_pair(&self, original: &[Sample], cleaned: &[Sample]) -> Vec<Sample> {
        let anomalies: Vec<Sample> = self
            .deviations(original, cleaned)
            .into_iter()
            .filter(|d| d.magnitude() > self.params.epsilon)
            .map(|d| Sample::new(d.time, d.original))
            .collect();
        debug!(
            anomalies = anomalies.len(),
            epsilon = self.params.epsilon,
            "extraction complete"
        );
        anomalies
    }

    /// Per-timestamp comparison over the timestamps both inputs share
    ///
    /// Duplicate timestamps within either input are averaged first.
    pub fn deviations(&self, original: &[Sample], cleaned: &[Sample]) -> Vec<Deviation> {
        let original = self.builder.build(original);
        let cleaned = self.builder.build(cleaned);
        compare(&original, &cleaned)
    }
}

fn compare(original: &TimeSeries, cleaned: &TimeSeries) -> Vec<Deviation> {
    let (times, left, right) = original.intersect(cleaned);
    times
        .into_iter()
        .zip(left)
        .zip(right)
        .map(|((time, original), cleaned)| Deviation {
            time,
            original,
            cleaned,
        })
        .collect()
}

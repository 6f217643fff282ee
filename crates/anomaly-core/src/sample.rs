//! Wire-level record types
//!
//! A [`Sample`] is the `{"time": <integer>, "value": <number>}` record exchanged
//! with upstream collectors. A [`RawBatch`] is one series worth of samples as it
//! arrives from the fan-out pipeline, which sometimes wraps single-series
//! payloads one extra level deep.

use crate::error::{Error, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Logical timestamp (e.g. epoch seconds), no timezone semantics
    pub time: i64,
    /// Observed value
    pub value: f64,
}

impl Sample {
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(i64, f64)> for Sample {
    fn from((time, value): (i64, f64)) -> Self {
        Self { time, value }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{time: {}, value: {}}}", self.time, self.value)
    }
}

/// One series worth of samples, possibly wrapped one level deep
///
/// Only a single layer of wrapping is recognised. When the first element of
/// the payload is itself a sequence, that first inner sequence is the batch and
/// any further outer elements are ignored. A payload nested deeper than that is
/// rejected rather than unwrapped further.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawBatch {
    /// Plain sequence of records
    Flat(Vec<Sample>),
    /// Records that arrived as `[[records..], ..]`
    Wrapped(Vec<Sample>),
}

impl RawBatch {
    /// The samples of this batch after unwrapping
    pub fn samples(&self) -> &[Sample] {
        match self {
            RawBatch::Flat(samples) | RawBatch::Wrapped(samples) => samples,
        }
    }

    /// Consume the batch, returning its samples
    pub fn into_samples(self) -> Vec<Sample> {
        match self {
            RawBatch::Flat(samples) | RawBatch::Wrapped(samples) => samples,
        }
    }

    /// Number of records in the batch
    pub fn len(&self) -> usize {
        self.samples().len()
    }

    /// Check whether the batch carries no records
    pub fn is_empty(&self) -> bool {
        self.samples().is_empty()
    }

    /// Interpret an arbitrary JSON value as a batch
    pub fn from_value(value: Value) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(Error::InvalidInput(format!(
                    "expected a sequence of records, got {}",
                    json_kind(&other)
                )))
            }
        };

        if !matches!(items.first(), Some(Value::Array(_))) {
            let samples = serde_json::from_value(Value::Array(items))?;
            return Ok(RawBatch::Flat(samples));
        }

        let inner = items
            .into_iter()
            .next()
            .and_then(|first| match first {
                Value::Array(inner) => Some(inner),
                _ => None,
            })
            .unwrap_or_default();
        if matches!(inner.first(), Some(Value::Array(_))) {
            return Err(Error::nesting_too_deep());
        }
        let samples = serde_json::from_value(Value::Array(inner))?;
        Ok(RawBatch::Wrapped(samples))
    }
}

impl From<Vec<Sample>> for RawBatch {
    fn from(samples: Vec<Sample>) -> Self {
        RawBatch::Flat(samples)
    }
}

impl From<&[Sample]> for RawBatch {
    fn from(samples: &[Sample]) -> Self {
        RawBatch::Flat(samples.to_vec())
    }
}

impl<'de> Deserialize<'de> for RawBatch {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        RawBatch::from_value(value).map_err(de::Error::custom)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a record",
    }
}

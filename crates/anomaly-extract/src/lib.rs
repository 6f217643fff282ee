//! Anomaly extraction for cleaned time series
//!
//! Given the original observations and the cleaned series produced from them,
//! reports every original observation whose absolute deviation from the
//! cleaned value exceeds a tolerance. Only timestamps present in both inputs
//! are compared.

pub mod extractor;

pub use extractor::{AnomalyExtractor, Deviation, ExtractorParameters};

//! Core types for timeline anomaly detection
//!
//! This crate provides the pieces shared by the denoising and extraction
//! stages:
//!
//! - **Records**: [`Sample`] and [`RawBatch`], the wire-level `{time, value}`
//!   shape exchanged with upstream collectors
//! - **Series**: [`TimeSeries`] and [`SeriesBuilder`], which merge duplicate
//!   timestamps and order observations by time
//! - **Interpolation**: reconstruction of missing values, linear between valid
//!   neighbours and constant at the ends
//! - **Order statistics**: median, quantile and MAD used by the rolling fences
//!
//! # Example
//!
//! ```rust
//! use anomaly_core::{RawBatch, SeriesBuilder};
//!
//! let batch: RawBatch = serde_json::from_str(
//!     r#"[[{"time": 2, "value": 4.0}, {"time": 1, "value": 1.0}, {"time": 2, "value": 2.0}]]"#,
//! ).unwrap();
//!
//! let series = SeriesBuilder::new().build_batch(&batch);
//! assert_eq!(series.times(), &[1, 2]);
//! assert_eq!(series.values(), &[1.0, 3.0]);
//! ```

pub mod error;
pub mod interpolate;
pub mod sample;
pub mod series;
pub mod stats;

// Re-export core types
pub use error::{Error, Result};
pub use interpolate::{fill_missing, mask_and_fill};
pub use sample::{RawBatch, Sample};
pub use series::{SeriesBuilder, TimeSeries};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{RawBatch, Result, Sample, SeriesBuilder, TimeSeries};
}

//! Robust denoising and anomaly extraction for irregularly sampled time series
//!
//! Re-exports the workspace crates:
//!
//! - [`anomaly_core`]: records, series normalization, interpolation
//! - [`anomaly_window`]: centered rolling windows and statistics
//! - [`anomaly_denoise`]: the multi-pass [`Denoiser`]
//! - [`anomaly_extract`]: the [`AnomalyExtractor`]
//!
//! ```rust
//! use timeline_anomaly::{AnomalyExtractor, Denoiser, Sample};
//!
//! let original: Vec<Sample> = [10.0, 10.0, 100.0, 10.0, 10.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(t, &v)| Sample::new(t as i64, v))
//!     .collect();
//!
//! let cleaned = Denoiser::with_defaults()?.process_samples(&original)?;
//! let anomalies = AnomalyExtractor::default().process_pair(&original, &cleaned);
//! assert_eq!(anomalies, vec![Sample::new(2, 100.0)]);
//! # Ok::<(), timeline_anomaly::Error>(())
//! ```

pub use anomaly_core;
pub use anomaly_denoise;
pub use anomaly_extract;
pub use anomaly_window;

pub use anomaly_core::{Error, RawBatch, Result, Sample, SeriesBuilder, TimeSeries};
pub use anomaly_denoise::{DenoiseParameters, DenoiseReport, Denoiser, DenoiserBuilder};
pub use anomaly_extract::{AnomalyExtractor, ExtractorParameters};
pub use anomaly_window::WindowBoundary;

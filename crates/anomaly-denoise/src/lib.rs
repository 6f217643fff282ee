//! Robust multi-pass denoising of noisy time series
//!
//! Raw observations are merged per timestamp, then cleaned in passes:
//!
//! - **Extreme pass**: values outside a rolling `median ± t × MAD` fence are
//!   removed and reconstructed by interpolation
//! - **Transition detection**: rapid level changes are located from the
//!   smoothed absolute first difference
//! - **Local pass**: values outside a rolling quartile fence are removed,
//!   except inside transitions
//! - **Smoothing**: a Savitzky–Golay cubic fit with a length-dependent window
//!
//! The output keeps every input timestamp.
//!
//! # Example
//!
//! ```rust
//! use anomaly_core::RawBatch;
//! use anomaly_denoise::DenoiserBuilder;
//!
//! let batch: RawBatch = serde_json::from_str(
//!     r#"[{"time": 0, "value": 10.0}, {"time": 1, "value": 10.0},
//!         {"time": 2, "value": 100.0}, {"time": 3, "value": 10.0},
//!         {"time": 4, "value": 10.0}]"#,
//! ).unwrap();
//!
//! let denoiser = DenoiserBuilder::new().build().unwrap();
//! let cleaned = denoiser.process(&batch).unwrap();
//! assert!(cleaned.iter().all(|s| s.value == 10.0));
//! ```

pub mod denoiser;
pub mod extreme;
pub mod fence;
pub mod local;
pub mod params;
pub mod smoother;
pub mod traits;
pub mod transition;

pub use denoiser::{DenoiseReport, Denoiser};
pub use extreme::ExtremeOutlierFilter;
pub use fence::Fence;
pub use local::LocalAnomalyFilter;
pub use params::{DenoiseParameters, DenoiserBuilder};
pub use smoother::{SavitzkyGolaySmoother, MAX_SMOOTHING_WINDOW, SMOOTHING_POLYORDER};
pub use traits::{FilterOutcome, SeriesFilter};
pub use transition::{TransitionDetector, TRANSITION_DILATION_RADIUS};

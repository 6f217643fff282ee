//! Centered rolling windows for series cleaning
//!
//! All cleaning filters look at a series through a fixed-width window centered
//! on each position. This crate holds that geometry ([`CenteredWindow`]), the
//! statistics evaluated inside one window ([`WindowStatistic`]) and the
//! [`RollingKernel`] that scans a whole series.
//!
//! Missing values (`NaN`) are skipped; a window with no valid value yields
//! `NaN`.
//!
//! ```rust
//! use anomaly_window::{rolling_median, CenteredWindow};
//!
//! let window = CenteredWindow::new(3).unwrap();
//! let medians = rolling_median(&[1.0, 50.0, 2.0, 3.0], window);
//! assert_eq!(medians, vec![25.5, 2.0, 3.0, 2.5]);
//! ```

pub mod kernel;
pub mod statistic;
pub mod window;

pub use kernel::{rolling_mad, rolling_mean, rolling_median, rolling_quantile, RollingKernel};
pub use statistic::{Mad, Mean, Median, Quantile, WindowStatistic};
pub use window::{CenteredWindow, WindowBoundary};

//! Detection of rapid level changes
//!
//! A genuine regime shift looks like a run of local outliers to the quartile
//! fence. The transition mask marks those regions so the local pass leaves
//! them alone.

use crate::params::validate_threshold;
use anomaly_core::{stats, Result};
use anomaly_window::{CenteredWindow, Mean, RollingKernel};
use tracing::trace;

/// Neighbours marked on each side of a provisionally volatile position
pub const TRANSITION_DILATION_RADIUS: usize = 1;

/// Flags positions inside or adjacent to a rapid level change
#[derive(Debug, Clone, Copy)]
pub struct TransitionDetector {
    kernel: RollingKernel,
    threshold: f64,
}

impl TransitionDetector {
    /// Create a detector smoothing step sizes over `window`
    ///
    /// A position is volatile when its smoothed step size exceeds
    /// `threshold` times the series-wide average smoothed step size.
    pub fn new(window: CenteredWindow, threshold: f64) -> Result<Self> {
        validate_threshold("transition_threshold", threshold)?;
        Ok(Self {
            kernel: RollingKernel::new(window),
            threshold,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Rolling mean of absolute first differences
    ///
    /// The difference at position 0 is undefined and skipped by every window
    /// that covers it.
    pub fn step_activity(&self, values: &[f64]) -> Vec<f64> {
        let steps: Vec<f64> = (0..values.len())
            .map(|i| {
                if i == 0 {
                    f64::NAN
                } else {
                    (values[i] - values[i - 1]).abs()
                }
            })
            .collect();
        self.kernel.apply(&steps, &Mean)
    }

    /// Transition mask, one entry per position
    ///
    /// # Examples
    ///
    /// ```rust
    /// use anomaly_denoise::TransitionDetector;
    /// use anomaly_window::CenteredWindow;
    ///
    /// let detector = TransitionDetector::new(CenteredWindow::new(5).unwrap(), 0.8).unwrap();
    /// let step = [0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 10.0];
    /// let mask = detector.detect(&step);
    /// assert_eq!(
    ///     mask,
    ///     vec![false, false, true, true, true, true, true, true, true, false]
    /// );
    /// ```
    pub fn detect(&self, values: &[f64]) -> Vec<bool> {
        let activity = self.step_activity(values);
        let defined: Vec<f64> = activity.iter().copied().filter(|v| !v.is_nan()).collect();
        let average = stats::mean(&defined);
        let cutoff = self.threshold * average;
        trace!(average, cutoff, "transition cutoff");

        let volatile: Vec<bool> = activity.iter().map(|&a| a > cutoff).collect();
        dilate(&volatile, TRANSITION_DILATION_RADIUS)
    }
}

/// Mark every position within `radius` of a marked position
fn dilate(mask: &[bool], radius: usize) -> Vec<bool> {
    let n = mask.len();
    let mut out = vec![false; n];
    for i in (0..n).filter(|&i| mask[i]) {
        let lo = i.saturating_sub(radius);
        let hi = (i + radius).min(n - 1);
        out[lo..=hi].iter_mut().for_each(|m| *m = true);
    }
    out
}

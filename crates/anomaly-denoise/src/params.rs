//! Denoiser configuration

use crate::denoiser::Denoiser;
use anomaly_core::{Error, Result};
use anomaly_window::{CenteredWindow, WindowBoundary};
use serde::{Deserialize, Serialize};

/// Tuning parameters for the cleaning passes
///
/// Window widths are in samples. Thresholds scale the robust spread (MAD for
/// the extreme pass, IQR for the local pass) or, for transitions, the mean
/// smoothed step size. Missing JSON fields take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DenoiseParameters {
    /// Width of the rolling median/MAD window for the extreme pass
    pub extreme_window: usize,
    /// MAD multiplier for the extreme pass
    pub extreme_threshold: f64,
    /// Width of the rolling quartile window for the local pass
    pub local_window: usize,
    /// IQR multiplier for the local pass
    pub local_threshold: f64,
    /// Width of the rolling mean over absolute first differences
    pub transition_window: usize,
    /// Multiplier over the average smoothed step size
    pub transition_threshold: f64,
    /// Window behaviour at the series ends
    pub boundary: WindowBoundary,
}

impl Default for DenoiseParameters {
    fn default() -> Self {
        Self {
            extreme_window: 60,
            extreme_threshold: 3.0,
            local_window: 15,
            local_threshold: 2.0,
            transition_window: 5,
            transition_threshold: 0.8,
            boundary: WindowBoundary::Truncate,
        }
    }
}

impl DenoiseParameters {
    /// Check every window is positive and every threshold finite and
    /// non-negative
    pub fn validate(&self) -> Result<()> {
        for (name, width) in [
            ("extreme_window", self.extreme_window),
            ("local_window", self.local_window),
            ("transition_window", self.transition_window),
        ] {
            if width == 0 {
                return Err(Error::invalid_window(name, width));
            }
        }

        for (name, value) in [
            ("extreme_threshold", self.extreme_threshold),
            ("local_threshold", self.local_threshold),
            ("transition_threshold", self.transition_threshold),
        ] {
            validate_threshold(name, value)?;
        }

        Ok(())
    }

    /// Parse and validate parameters from JSON
    ///
    /// # Examples
    ///
    /// ```rust
    /// use anomaly_denoise::DenoiseParameters;
    ///
    /// let params = DenoiseParameters::from_json(r#"{"local_window": 21}"#).unwrap();
    /// assert_eq!(params.local_window, 21);
    /// assert_eq!(params.extreme_window, 60);
    ///
    /// assert!(DenoiseParameters::from_json(r#"{"local_window": 0}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub(crate) fn window(&self, width: usize) -> Result<CenteredWindow> {
        Ok(CenteredWindow::new(width)?.with_boundary(self.boundary))
    }
}

pub(crate) fn validate_threshold(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid_threshold(name, value));
    }
    Ok(())
}

/// Builder for configuring and creating a [`Denoiser`]
///
/// Starts from [`DenoiseParameters::default`]; values are validated by
/// [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct DenoiserBuilder {
    params: DenoiseParameters,
}

impl DenoiserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every parameter at once
    pub fn parameters(mut self, params: DenoiseParameters) -> Self {
        self.params = params;
        self
    }

    /// Sets the width of the extreme-outlier window.
    pub fn extreme_window(mut self, width: usize) -> Self {
        self.params.extreme_window = width;
        self
    }

    /// Sets the MAD multiplier of the extreme-outlier fence.
    pub fn extreme_threshold(mut self, threshold: f64) -> Self {
        self.params.extreme_threshold = threshold;
        self
    }

    /// Sets the width of the local quartile window.
    pub fn local_window(mut self, width: usize) -> Self {
        self.params.local_window = width;
        self
    }

    /// Sets the IQR multiplier of the local fence.
    ///
    /// Smaller values remove more points; 1.5 is the classic Tukey fence.
    pub fn local_threshold(mut self, threshold: f64) -> Self {
        self.params.local_threshold = threshold;
        self
    }

    /// Sets the width of the transition smoothing window.
    pub fn transition_window(mut self, width: usize) -> Self {
        self.params.transition_window = width;
        self
    }

    /// Sets the transition sensitivity.
    ///
    /// Lower values protect more of the series from the local pass.
    pub fn transition_threshold(mut self, threshold: f64) -> Self {
        self.params.transition_threshold = threshold;
        self
    }

    /// Sets the window behaviour at the series ends.
    pub fn boundary(mut self, boundary: WindowBoundary) -> Self {
        self.params.boundary = boundary;
        self
    }

    /// Builds the configured denoiser.
    pub fn build(self) -> Result<Denoiser> {
        Denoiser::new(self.params)
    }
}

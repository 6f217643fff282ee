//! Centered window geometry

use anomaly_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// How a centered window behaves where it would run past the series ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowBoundary {
    /// Clip the window to the available points; boundary windows become
    /// asymmetric
    #[default]
    Truncate,
    /// Use the largest window that stays symmetric around the position
    Shrink,
}

/// A fixed-width window centered on each position
///
/// For width `w` the window at `i` spans `i - w/2 ..= i + (w-1)/2`, so even
/// widths reach one point further back than forward. Near the ends the
/// [`WindowBoundary`] decides what is scanned; at least one point is always
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenteredWindow {
    width: usize,
    boundary: WindowBoundary,
}

impl CenteredWindow {
    /// Create a truncating window of the given width
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 {
            return Err(Error::invalid_window("window width", 0));
        }
        Ok(Self {
            width,
            boundary: WindowBoundary::Truncate,
        })
    }

    /// Set the boundary policy
    pub fn with_boundary(mut self, boundary: WindowBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn boundary(&self) -> WindowBoundary {
        self.boundary
    }

    /// Points scanned before the center
    pub fn left_span(&self) -> usize {
        self.width / 2
    }

    /// Points scanned after the center
    pub fn right_span(&self) -> usize {
        (self.width - 1) / 2
    }

    /// Index range scanned for position `index` in a series of `len` points
    pub fn bounds(&self, index: usize, len: usize) -> Range<usize> {
        debug_assert!(index < len);
        let left = self.left_span();
        let right = self.right_span();
        let fits = index >= left && index + right < len;

        match self.boundary {
            WindowBoundary::Truncate => {
                index.saturating_sub(left)..(index + right + 1).min(len)
            }
            WindowBoundary::Shrink if fits => (index - left)..(index + right + 1),
            WindowBoundary::Shrink => {
                let radius = left.min(index).min(len - 1 - index);
                (index - radius)..(index + radius + 1)
            }
        }
    }
}

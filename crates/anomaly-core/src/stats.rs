//! Order statistics over small slices
//!
//! These are the building blocks of the rolling fences. Callers are expected to
//! pass only valid (non-`NaN`) values; an empty slice yields `NaN`.

use statrs::statistics::Statistics;

/// Sort data in place, ascending
///
/// `NaN` values are placed at the end.
pub fn sort_in_place(data: &mut [f64]) {
    data.sort_unstable_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => a.total_cmp(b),
    });
}

/// Calculate the mean of a slice
///
/// Returns `NaN` for empty slices.
///
/// # Examples
///
/// ```rust
/// use anomaly_core::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert!(mean(&[]).is_nan());
/// ```
pub fn mean(data: &[f64]) -> f64 {
    Statistics::mean(data.iter())
}

/// Quantile of already sorted data using linear interpolation between
/// closest ranks (`h = (n - 1) * p`)
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Quantile of unsorted data; `data` is reordered
///
/// # Examples
///
/// ```rust
/// use anomaly_core::stats::quantile;
///
/// let mut data = vec![4.0, 1.0, 3.0, 2.0];
/// assert_eq!(quantile(&mut data, 0.25), 1.75);
/// ```
pub fn quantile(data: &mut [f64], p: f64) -> f64 {
    sort_in_place(data);
    quantile_sorted(data, p)
}

/// Median of unsorted data; `data` is reordered
pub fn median(data: &mut [f64]) -> f64 {
    quantile(data, 0.5)
}

/// Median absolute deviation from the sample's own median
///
/// Unscaled: no consistency factor is applied.
pub fn median_absolute_deviation(data: &mut [f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let center = median(data);
    for x in data.iter_mut() {
        *x = (*x - center).abs();
    }
    median(data)
}

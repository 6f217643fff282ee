//! Reconstruction of missing values
//!
//! Missing positions are marked with `NaN`. Samples are treated as equally
//! spaced: interpolation runs over positions, not timestamps. Downstream
//! anomaly thresholds depend on these exact reconstructed values.

use crate::error::{Error, Result};

/// Fill every `NaN` in place
///
/// - a run between two valid values is filled by linear interpolation;
/// - a run touching either end repeats the nearest valid value;
/// - a slice with no valid value is left untouched.
///
/// Returns the number of positions that were filled.
///
/// # Examples
///
/// ```rust
/// use anomaly_core::interpolate::fill_missing;
///
/// let mut values = vec![f64::NAN, 2.0, f64::NAN, 4.0, f64::NAN];
/// fill_missing(&mut values);
/// assert_eq!(values, vec![2.0, 2.0, 3.0, 4.0, 4.0]);
/// ```
pub fn fill_missing(values: &mut [f64]) -> usize {
    let Some(first_valid) = values.iter().position(|v| !v.is_nan()) else {
        return 0;
    };
    let mut filled = 0;

    let lead = values[first_valid];
    for v in &mut values[..first_valid] {
        *v = lead;
        filled += 1;
    }

    let mut last_valid = first_valid;
    for i in (first_valid + 1)..values.len() {
        if values[i].is_nan() {
            continue;
        }
        let gap = i - last_valid;
        if gap > 1 {
            let start = values[last_valid];
            let step = (values[i] - start) / gap as f64;
            for k in 1..gap {
                values[last_valid + k] = start + step * k as f64;
                filled += 1;
            }
        }
        last_valid = i;
    }

    let tail = values[last_valid];
    for v in &mut values[last_valid + 1..] {
        *v = tail;
        filled += 1;
    }

    filled
}

/// Mark masked positions as missing, then reconstruct them
///
/// Returns the reconstructed values and the indices that were masked.
pub fn mask_and_fill(values: &[f64], mask: &[bool]) -> Result<(Vec<f64>, Vec<usize>)> {
    if values.len() != mask.len() {
        return Err(Error::size_mismatch(values.len(), mask.len(), "outlier mask"));
    }

    let mut cleaned = values.to_vec();
    let mut flagged = Vec::new();
    for (i, (value, &masked)) in cleaned.iter_mut().zip(mask).enumerate() {
        if masked {
            *value = f64::NAN;
            flagged.push(i);
        }
    }
    fill_missing(&mut cleaned);
    Ok((cleaned, flagged))
}

//! # Chart Sampling
//!
//! Helpers for producing evenly spaced sample positions. Every chart series
//! in calc_core (cost curves, break-even lines, regression lines, constraint
//! lines) is built on [`linspace`].

use crate::errors::{require_finite, CalcError, CalcResult};

/// Evenly spaced samples over `[start, end]`, both ends included.
///
/// The last sample is exactly `end` so that callers can rely on hitting the
/// boundary of a chart window.
///
/// # Errors
///
/// `InvalidParameter` when `steps < 2` or either bound is non-finite.
///
/// # Example
///
/// ```rust
/// use calc_core::sampling::linspace;
///
/// let xs = linspace(0.0, 1.0, 5).unwrap();
/// assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(start: f64, end: f64, steps: usize) -> CalcResult<Vec<f64>> {
    require_finite("start", start)?;
    require_finite("end", end)?;
    if steps < 2 {
        return Err(CalcError::invalid_parameter(
            "steps",
            steps.to_string(),
            "At least 2 samples are needed to draw a series",
        ));
    }

    let last = steps - 1;
    let step = (end - start) / last as f64;
    let samples = (0..steps)
        .map(|i| if i == last { end } else { start + step * i as f64 })
        .collect();
    Ok(samples)
}

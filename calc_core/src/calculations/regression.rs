//! # Simple Linear Regression
//!
//! Least-squares fit of `Y = a + bX` to paired samples, with Pearson's
//! correlation coefficient and the coefficient of determination.
//!
//! ## Formulas
//!
//! ```text
//! b = Σ(X - X̄)(Y - Ȳ) / Σ(X - X̄)²
//! a = Ȳ - bX̄
//! r = Σ(X - X̄)(Y - Ȳ) / sqrt(Σ(X - X̄)² · Σ(Y - Ȳ)²)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::regression::{calculate, RegressionInput};
//!
//! let input = RegressionInput {
//!     xs: vec![1.0, 2.0, 3.0, 4.0, 5.0],
//!     ys: vec![2.0, 4.0, 6.0, 8.0, 10.0],
//!     predict_x: Some(10.0),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.fit.slope - 2.0).abs() < 1e-9);
//! assert!((result.prediction.unwrap().y - 20.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::formulas::line_value;
use crate::errors::{require_finite, CalcError, CalcResult};
use crate::sampling::linspace;

/// Fewest samples accepted
pub const MIN_SAMPLES: usize = 3;

/// Most samples accepted
pub const MAX_SAMPLES: usize = 20;

/// Input parameters for a regression.
///
/// ## JSON Example
///
/// ```json
/// {
///   "xs": [1.0, 2.0, 3.0, 4.0, 5.0],
///   "ys": [2.0, 4.0, 6.0, 8.0, 10.0],
///   "predict_x": 10.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionInput {
    /// Independent variable samples
    pub xs: Vec<f64>,

    /// Dependent variable samples, paired with `xs`
    pub ys: Vec<f64>,

    /// Optional X to forecast Y at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predict_x: Option<f64>,
}

impl RegressionInput {
    /// Build an input from `(x, y)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)], predict_x: Option<f64>) -> Self {
        let (xs, ys) = pairs.iter().copied().unzip();
        Self { xs, ys, predict_x }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validate_samples(&self.xs, &self.ys)?;
        if let Some(x) = self.predict_x {
            require_finite("predict_x", x)?;
        }
        Ok(())
    }
}

fn validate_samples(xs: &[f64], ys: &[f64]) -> CalcResult<()> {
    if xs.len() != ys.len() {
        return Err(CalcError::invalid_parameter(
            "ys",
            format!("{} values", ys.len()),
            format!("Expected one y value per x value ({})", xs.len()),
        ));
    }
    if xs.len() < MIN_SAMPLES || xs.len() > MAX_SAMPLES {
        return Err(CalcError::invalid_parameter(
            "xs",
            format!("{} samples", xs.len()),
            format!("Between {} and {} samples are required", MIN_SAMPLES, MAX_SAMPLES),
        ));
    }
    for (i, (x, y)) in xs.iter().zip(ys).enumerate() {
        require_finite(&format!("xs[{}]", i), *x)?;
        require_finite(&format!("ys[{}]", i), *y)?;
    }
    Ok(())
}

/// Fitted line and goodness of fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionFit {
    /// a in Y = a + bX
    pub intercept: f64,
    /// b in Y = a + bX
    pub slope: f64,
    /// Pearson correlation coefficient r
    pub r: f64,
    /// Coefficient of determination r²
    pub r_squared: f64,
    /// Number of samples used
    pub n: usize,
}

impl RegressionFit {
    /// Y on the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        predict(self.intercept, self.slope, x)
    }

    /// Plain-text equation, e.g. `Y = 0.00 + 2.00X`
    pub fn equation(&self) -> String {
        format!("Y = {:.2} + {:.2}X", self.intercept, self.slope)
    }
}

/// A forecast point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub x: f64,
    pub y: f64,
}

/// Results from a regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub fit: RegressionFit,

    /// Present when `predict_x` was given
    pub prediction: Option<Prediction>,
}

/// One sample of the fitted line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
}

/// Least-squares fit of `Y = a + bX`.
///
/// # Errors
///
/// * `InvalidParameter` - length mismatch, sample count outside 3..=20, non-finite values
/// * `DegenerateInput` - every x is equal, or every y is equal (r undefined)
pub fn fit(xs: &[f64], ys: &[f64]) -> CalcResult<RegressionFit> {
    validate_samples(xs, ys)?;

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    // Centred sums keep the precision of data with a large common offset
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if is_constant(xs) || sxx <= 0.0 {
        return Err(CalcError::degenerate_input(
            "All x values are equal, the slope is undefined",
        ));
    }
    if is_constant(ys) || syy <= 0.0 {
        return Err(CalcError::degenerate_input(
            "All y values are equal, the correlation coefficient is undefined",
        ));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // Clamp rounding noise so perfect fits report exactly |r| <= 1
    let r = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);

    Ok(RegressionFit {
        intercept,
        slope,
        r,
        r_squared: r * r,
        n: xs.len(),
    })
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Y on the line `a + bX`.
pub fn predict(intercept: f64, slope: f64, x: f64) -> f64 {
    line_value(intercept, slope, x)
}

/// Fit the samples and forecast at `predict_x` when given.
pub fn calculate(input: &RegressionInput) -> CalcResult<RegressionResult> {
    input.validate()?;

    let fit = fit(&input.xs, &input.ys)?;
    let prediction = input.predict_x.map(|x| Prediction {
        x,
        y: fit.predict(x),
    });

    Ok(RegressionResult { fit, prediction })
}

/// Sample the fitted line over `[x_min, x_max]` for charting.
///
/// The fit is passed in explicitly; charting never depends on an earlier
/// call having run.
pub fn sample_fit_line(
    fit: &RegressionFit,
    x_min: f64,
    x_max: f64,
    steps: usize,
) -> CalcResult<Vec<LinePoint>> {
    if x_max.is_nan() || x_max <= x_min {
        return Err(CalcError::invalid_parameter(
            "x_max",
            x_max.to_string(),
            "Upper x bound must exceed the lower bound",
        ));
    }
    let points = linspace(x_min, x_max, steps)?
        .into_iter()
        .map(|x| LinePoint {
            x,
            y: fit.predict(x),
        })
        .collect();
    Ok(points)
}

/// Smallest and largest x, the range the input samples span.
pub fn x_range(xs: &[f64]) -> Option<(f64, f64)> {
    let first = *xs.first()?;
    Some(
        xs.iter()
            .fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_line() {
        let fit = fit(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
        assert!(fit.intercept.abs() < 1e-9);
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.r - 1.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
        assert!((fit.predict(10.0) - 20.0).abs() < 1e-9);
        assert_eq!(fit.n, 5);
    }

    #[test]
    fn test_noisy_data() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.1, 3.9, 6.1, 7.9, 10.1];
        let fit = fit(&xs, &ys).unwrap();
        assert!((fit.slope - 2.0).abs() < 0.1);
        assert!((fit.intercept - 0.1).abs() < 0.2);
        assert!(fit.r_squared > 0.99 && fit.r_squared < 1.0);
    }

    #[test]
    fn test_negative_correlation() {
        let fit = fit(&[1.0, 2.0, 3.0], &[9.0, 6.0, 3.0]).unwrap();
        assert!((fit.slope + 3.0).abs() < 1e-9);
        assert!((fit.r + 1.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_least_squares_minimizes_residuals() {
        let xs = [1.0, 2.0, 4.0, 7.0];
        let ys = [3.0, 2.5, 6.0, 9.5];
        let best = fit(&xs, &ys).unwrap();
        let sse = |a: f64, b: f64| -> f64 {
            xs.iter()
                .zip(&ys)
                .map(|(x, y)| (y - (a + b * x)).powi(2))
                .sum()
        };
        let base = sse(best.intercept, best.slope);
        for (da, db) in [(0.1, 0.0), (-0.1, 0.0), (0.0, 0.05), (0.0, -0.05)] {
            assert!(base < sse(best.intercept + da, best.slope + db));
        }
    }

    #[test]
    fn test_all_x_equal_is_degenerate() {
        match fit(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]) {
            Err(CalcError::DegenerateInput { reason }) => assert!(reason.contains("x values")),
            other => panic!("Expected DegenerateInput, got {:?}", other),
        }
    }

    #[test]
    fn test_all_y_equal_is_degenerate() {
        assert!(matches!(
            fit(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]),
            Err(CalcError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_large_x_offset_is_not_degenerate() {
        // Timestamps or prices: big common offset, small spread
        let fit = fit(&[1e6, 1e6 + 1.0, 1e6 + 2.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!((fit.slope - 1.0).abs() < 1e-9);
        assert!((fit.intercept + 999_999.0).abs() < 1e-6);
        assert!((fit.r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_y_offset_is_not_degenerate() {
        let fit = fit(&[1.0, 2.0, 3.0], &[5e6, 5e6 + 1.0, 5e6 + 2.0]).unwrap();
        assert!((fit.slope - 1.0).abs() < 1e-9);
        assert!((fit.intercept - 4_999_999.0).abs() < 1e-6);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_count_limits() {
        assert!(matches!(
            fit(&[1.0, 2.0], &[1.0, 2.0]),
            Err(CalcError::InvalidParameter { .. })
        ));
        let xs: Vec<f64> = (0..21).map(f64::from).collect();
        assert!(fit(&xs, &xs).is_err());
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            fit(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(CalcError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_calculate_with_prediction() {
        let input = RegressionInput::from_pairs(
            &[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0), (4.0, 8.0), (5.0, 10.0)],
            Some(10.0),
        );
        let result = calculate(&input).unwrap();
        let prediction = result.prediction.unwrap();
        assert_eq!(prediction.x, 10.0);
        assert!((prediction.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_without_prediction() {
        let input = RegressionInput {
            xs: vec![1.0, 2.0, 3.0],
            ys: vec![1.0, 3.0, 2.0],
            predict_x: None,
        };
        assert!(calculate(&input).unwrap().prediction.is_none());
    }

    #[test]
    fn test_sample_fit_line() {
        let fit = fit(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
        let (lo, hi) = x_range(&[3.0, 1.0, 5.0, 2.0]).unwrap();
        assert_eq!((lo, hi), (1.0, 5.0));
        let line = sample_fit_line(&fit, lo, hi, 100).unwrap();
        assert_eq!(line.len(), 100);
        assert!((line[0].y - 2.0).abs() < 1e-9);
        assert!((line[99].y - 10.0).abs() < 1e-9);
        assert!(sample_fit_line(&fit, 5.0, 1.0, 100).is_err());
    }

    #[test]
    fn test_equation_text() {
        let fit = fit(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
        assert_eq!(fit.equation().replace("-0.00", "0.00"), "Y = 0.00 + 2.00X");
    }

    #[test]
    fn test_x_range_empty() {
        assert!(x_range(&[]).is_none());
    }
}

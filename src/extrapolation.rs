//! Zero-noise estimators.
//!
//! Each estimator fits `(scale_factor, value)` samples with a model and
//! reports the model's value in the zero-noise limit. All of them are pure
//! functions of their inputs.

use crate::core::errors::ExtrapolationError;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::fmt;


/// Extrapolation model used to reach the zero-noise limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    Linear,
    Polynomial(usize),
    Exponential,
    /// Polynomial of degree `samples - 1` through every point.
    Richardson,
}

impl Extrapolation {
    pub fn name(&self) -> &'static str {
        match self {
            Extrapolation::Linear => "linear",
            Extrapolation::Polynomial(_) => "polynomial",
            Extrapolation::Exponential => "exponential",
            Extrapolation::Richardson => "richardson",
        }
    }

    pub fn extrapolate(&self, x: &[f64], y: &[f64]) -> Result<f64, ExtrapolationError> {
        match *self {
            Extrapolation::Linear => linear_extrapolation(x, y),
            Extrapolation::Polynomial(order) => polynomial_extrapolation(x, y, order),
            Extrapolation::Exponential => exponential_extrapolation(x, y),
            Extrapolation::Richardson => richardson_extrapolation(x, y),
        }
    }
}

impl fmt::Display for Extrapolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extrapolation::Polynomial(order) => write!(f, "polynomial({order})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Least-squares line through the samples, evaluated at `x = 0`.
pub fn linear_extrapolation(x: &[f64], y: &[f64]) -> Result<f64, ExtrapolationError> {
    polynomial_extrapolation(x, y, 1)
}

/// Least-squares polynomial of degree `order`, evaluated at `x = 0`.
///
/// # Errors
///
/// - `LengthMismatch` if `x` and `y` differ in length.
/// - `NonFiniteSample` if any `x`, `y` or `x^order` is NaN or infinite.
/// - `UnderdeterminedFit` if there are fewer than `order + 1` distinct `x`.
pub fn polynomial_extrapolation(
    x: &[f64],
    y: &[f64],
    order: usize,
) -> Result<f64, ExtrapolationError> {
    let coeffs = polyfit(x, y, order)?;
    Ok(coeffs[0])
}

/// Fits `y = A exp(-B x)` and returns `A`.
///
/// The fit is a line through `(x, ln y)`; its intercept is `ln A`.
///
/// # Errors
///
/// `NonPositiveValue` if any `y <= 0`, plus the errors of
/// [`polynomial_extrapolation`].
pub fn exponential_extrapolation(x: &[f64], y: &[f64]) -> Result<f64, ExtrapolationError> {
    check_finite(y)?;
    let log_y = y
        .iter()
        .map(|&v| {
            if v > 0.0 {
                Ok(v.ln())
            } else {
                Err(ExtrapolationError::NonPositiveValue(v))
            }
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let coeffs = polyfit(x, &log_y, 1)?;
    Ok(coeffs[0].exp())
}

/// Interpolating polynomial through all samples, evaluated at `x = 0`.
pub fn richardson_extrapolation(x: &[f64], y: &[f64]) -> Result<f64, ExtrapolationError> {
    let order = x.len().saturating_sub(1);
    polynomial_extrapolation(x, y, order)
}

/// Least-squares polynomial coefficients, lowest degree first.
fn polyfit(x: &[f64], y: &[f64], order: usize) -> Result<Vec<f64>, ExtrapolationError> {
    if x.len() != y.len() {
        return Err(ExtrapolationError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    check_finite(x)?;
    check_finite(y)?;

    let distinct = count_distinct(x);
    if distinct <= order {
        return Err(ExtrapolationError::UnderdeterminedFit { order, distinct });
    }

    let top_powers: Vec<f64> = x.iter().map(|v| v.powi(order as i32)).collect();
    check_finite(&top_powers)?;

    // Vandermonde matrix, columns x^0 .. x^order, each scaled to a peak of 1
    let mut vandermonde = DMatrix::from_fn(x.len(), order + 1, |i, j| x[i].powi(j as i32));
    let scale: Vec<f64> = vandermonde
        .column_iter()
        .map(|col| {
            let peak = col.amax();
            if peak > 0.0 { peak } else { 1.0 }
        })
        .collect();
    for (mut col, &norm) in vandermonde.column_iter_mut().zip(&scale) {
        col /= norm;
    }
    let rhs = DVector::from_column_slice(y);

    let svd = vandermonde.svd(true, true);
    let cutoff = svd.singular_values.max() * x.len() as f64 * f64::EPSILON;
    let solution = svd
        .solve(&rhs, cutoff)
        .map_err(ExtrapolationError::SolveFailed)?;

    Ok(solution
        .iter()
        .zip(&scale)
        .map(|(coeff, norm)| coeff / norm)
        .collect())
}

fn check_finite(values: &[f64]) -> Result<(), ExtrapolationError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&bad) => Err(ExtrapolationError::NonFiniteSample(bad)),
        None => Ok(()),
    }
}

fn count_distinct(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

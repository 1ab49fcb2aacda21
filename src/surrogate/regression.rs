//! Heteroscedastic Gaussian-process marginal likelihood.
//!
//! Purpose
//! -------
//! Evaluate the log marginal likelihood of a heteroscedastic GP regression
//! with fixed kernel hyperparameters: output channels share the kernel,
//! each channel carries its own per-row noise-variance diagonal, and the
//! total is the sum of per-channel marginals. This is the likelihood seam
//! the surrogate-coupled posterior evaluator calls with an augmented
//! training set; hyperparameters are never re-optimized here.
//!
//! Key behaviors
//! -------------
//! - Validates training shapes and finiteness once, then factorizes
//!   `K + diag(noise_j)` per channel via Cholesky.
//! - A non-positive-definite covariance surfaces as
//!   [`SurrogateError::NotPositiveDefinite`] instead of panicking.
//!
//! Conventions
//! -----------
//! - For each channel `j`, with `L Lᵀ = K + diag(noise_j)` and
//!   `α = (K + diag(noise_j))⁻¹ y_j`:
//!   `ln p(y_j) = -0.5 y_jᵀ α - Σ_i ln L_ii - 0.5 n ln(2π)`.
//! - Noise entries are variances (not standard deviations) and may be a
//!   machine-epsilon floor but never negative.
use crate::surrogate::errors::{SurrogateError, SurrogateResult};
use crate::surrogate::kernel::Kernel;
use nalgebra::DVector;
use ndarray::Array2;

/// Log marginal likelihood of a heteroscedastic GP with fixed kernel.
///
/// # Arguments
/// - `kernel`: validated covariance function; `kernel.input_dim()` must
///   equal `x.ncols()`.
/// - `x`: training inputs, `(n, nx)`.
/// - `y`: training outputs, `(n, ny)`.
/// - `noise_var`: per-row, per-channel noise variances, same shape as `y`.
///
/// # Errors
/// - [`SurrogateError::EmptyTrainingSet`] for zero rows.
/// - [`SurrogateError::TrainingRowMismatch`] /
///   [`SurrogateError::NoiseShapeMismatch`] /
///   [`SurrogateError::InputDimMismatch`] for shape violations.
/// - [`SurrogateError::NonFiniteTrainingValue`] /
///   [`SurrogateError::InvalidNoiseVariance`] for bad values, reporting the
///   first offending entry.
/// - [`SurrogateError::NotPositiveDefinite`] if any channel's covariance
///   cannot be factorized.
pub fn log_marginal_likelihood(
    kernel: &Kernel, x: &Array2<f64>, y: &Array2<f64>, noise_var: &Array2<f64>,
) -> SurrogateResult<f64> {
    validate_training_set(kernel, x, y, noise_var)?;

    let n = x.nrows();
    let ny = y.ncols();
    let ln_2pi = (2.0 * std::f64::consts::PI).ln();
    let base = kernel.covariance(x)?;

    let mut total = 0.0;
    for j in 0..ny {
        let mut k = base.clone();
        for i in 0..n {
            k[(i, i)] += noise_var[(i, j)];
        }
        let chol = k.cholesky().ok_or(SurrogateError::NotPositiveDefinite { dim: n })?;

        let y_j = DVector::from_iterator(n, y.column(j).iter().copied());
        let alpha = chol.solve(&y_j);

        let mut log_det_half = 0.0;
        let l = chol.l();
        for i in 0..n {
            log_det_half += l[(i, i)].ln();
        }

        total += -0.5 * y_j.dot(&alpha) - log_det_half - 0.5 * (n as f64) * ln_2pi;
    }
    Ok(total)
}

/// Shape and value checks shared by the marginal likelihood and snapshot
/// construction.
pub(crate) fn validate_training_set(
    kernel: &Kernel, x: &Array2<f64>, y: &Array2<f64>, noise_var: &Array2<f64>,
) -> SurrogateResult<()> {
    if x.nrows() == 0 {
        return Err(SurrogateError::EmptyTrainingSet);
    }
    if x.ncols() != kernel.input_dim() {
        return Err(SurrogateError::InputDimMismatch {
            expected: kernel.input_dim(),
            found: x.ncols(),
        });
    }
    if y.nrows() != x.nrows() {
        return Err(SurrogateError::TrainingRowMismatch { x_rows: x.nrows(), y_rows: y.nrows() });
    }
    if noise_var.dim() != y.dim() {
        return Err(SurrogateError::NoiseShapeMismatch { expected: y.dim(), found: noise_var.dim() });
    }
    for ((row, col), &value) in x.indexed_iter() {
        if !value.is_finite() {
            return Err(SurrogateError::NonFiniteTrainingValue { array: "x", row, col, value });
        }
    }
    for ((row, col), &value) in y.indexed_iter() {
        if !value.is_finite() {
            return Err(SurrogateError::NonFiniteTrainingValue { array: "y", row, col, value });
        }
    }
    for ((row, col), &value) in noise_var.indexed_iter() {
        if !value.is_finite() || value < 0.0 {
            return Err(SurrogateError::InvalidNoiseVariance { row, col, value });
        }
    }
    Ok(())
}

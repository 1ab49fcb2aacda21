//! Numerical derivative of the inverse transform, used for the
//! change-of-variables (Jacobian) correction in transformed log-priors.
//!
//! The correction term is `ln|d(revert)/dx|` evaluated at a converted-space
//! coordinate; the derivative is approximated by a central finite
//! difference with a fixed step. The magnitude is taken by the caller so
//! decreasing transforms remain valid.
use crate::transforms::conrev::ConRev;

/// Fixed step size for the central difference of `revert`.
pub const JACOBIAN_STEP: f64 = 1e-6;

/// Central-difference derivative of `conrev.revert` at `x`.
///
/// Uses the fixed step [`JACOBIAN_STEP`]; the result is signed, so callers
/// computing a log-Jacobian must take the absolute value first.
pub fn revert_derivative(conrev: &dyn ConRev, x: f64) -> f64 {
    (conrev.revert(x + JACOBIAN_STEP) - conrev.revert(x - JACOBIAN_STEP)) / (2.0 * JACOBIAN_STEP)
}

//! Adapter that exposes a user `LogPosterior` as an `argmin` problem.
//!
//! We convert a *maximization* of a log-posterior `ln p(θ|y)` into a
//! *minimization* problem by defining the cost as `c(θ) = -ln p(θ|y)`.
//!
//! Sign and finiteness policy: a log-posterior of `-∞` is a legitimate
//! zero-density region (e.g. a candidate outside a prior's support) and
//! maps to a `+∞` cost the swarm simply never selects as best. `NaN` and
//! `+∞` posteriors indicate a broken objective and are rejected as errors.
use crate::optimization::{
    errors::OptError,
    map_optimizer::{
        traits::LogPosterior,
        types::{Cost, Theta},
    },
};
use argmin::core::{CostFunction, Error};

/// Bridges a user `LogPosterior` to `argmin`'s `CostFunction`.
///
/// - `CostFunction::cost` returns `-ln p(θ|y)` (negative log-posterior).
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogPosterior> {
    pub f: &'a F,
}

impl<'a, F: LogPosterior> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ln p(θ|y)`.
    ///
    /// - Calls the user's `value(θ)` and rejects `NaN` or `+∞` results.
    /// - `-∞` passes through as an infinite cost.
    ///
    /// # Errors
    /// Propagates any `OptError` from the user's `value` via `?`; evaluation
    /// failures are fatal to the run.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta)?;
        if output.is_nan() || output == f64::INFINITY {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<'a, F: LogPosterior> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `LogPosterior`.
    pub fn new(f: &'a F) -> Self {
        Self { f }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The sign flip between log-posterior and cost.
    // - The finiteness policy: -inf allowed, NaN and +inf rejected.
    // - Propagation of user evaluation errors.
    // -------------------------------------------------------------------------

    struct Toy;

    impl LogPosterior for Toy {
        fn value(&self, theta: &Theta) -> OptResult<Cost> {
            match theta[0] {
                v if v == 0.0 => Ok(-2.5),
                v if v == 1.0 => Ok(f64::NEG_INFINITY),
                v if v == 2.0 => Ok(f64::NAN),
                v if v == 3.0 => Ok(f64::INFINITY),
                _ => Err(OptError::PosteriorEvaluation { text: "boom".to_string() }),
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the adapter negates finite values and lets -inf through as an
    // infinite cost.
    //
    // Given
    // -----
    // - A toy objective returning -2.5 at 0 and -inf at 1.
    //
    // Expect
    // ------
    // - Cost 2.5 and +inf respectively.
    fn cost_flips_sign_and_allows_zero_density() {
        let adapter = ArgMinAdapter::new(&Toy);
        assert!((adapter.cost(&array![0.0]).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(adapter.cost(&array![1.0]).unwrap(), f64::INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Ensure NaN and +inf posteriors are rejected as `NonFiniteCost` and a
    // user error propagates.
    //
    // Given
    // -----
    // - The toy objective's NaN, +inf, and error branches.
    //
    // Expect
    // ------
    // - All three return `Err`; the mapped `OptError` variants match after
    //   round-tripping through `argmin::core::Error`.
    fn cost_rejects_broken_objectives() {
        let adapter = ArgMinAdapter::new(&Toy);
        for input in [array![2.0], array![3.0]] {
            let err: OptError = adapter.cost(&input).unwrap_err().into();
            assert!(matches!(err, OptError::NonFiniteCost { .. }), "got {err:?}");
        }
        let err: OptError = adapter.cost(&array![9.0]).unwrap_err().into();
        assert_eq!(err, OptError::PosteriorEvaluation { text: "boom".to_string() });
    }
}

//! Direct-model MAP estimation.
//!
//! Purpose
//! -------
//! Combine a prior set with a closed-form Gaussian likelihood over direct
//! forward-model evaluations, and drive a bounded global search of the
//! negative log-posterior to a maximum-a-posteriori point estimate.
//!
//! Key behaviors
//! -------------
//! - [`ForwardModel`] is the external vector-evaluation collaborator: one
//!   combined input row in, `ny` outputs out. Every observation row must
//!   evaluate successfully — a single failure fails the whole likelihood
//!   call, with no partial credit.
//! - [`MapEstimator::log_likelihood`] substitutes the candidate into the
//!   trailing columns of each observation row on a per-call copy, then
//!   evaluates
//!   `-obvs*ny*0.5*ln(2π) - Σ ln(noise) - Σ 0.5*(f - y)²/noise²`.
//! - [`MapEstimator::opt`] searches inside each prior's central interval
//!   at mass [`BOUND_MASS`] (wide enough to cover the meaningful support,
//!   short of the numerically pathological tails) and returns a structured
//!   [`MapEstimate`] rather than printing.
//!
//! Invariants & assumptions
//! ------------------------
//! - `nx_model >= 1` and `ny >= 1`, enforced at construction.
//! - Observations are validated wholesale by the observation store before
//!   any evaluation; state transitions are
//!   `Unconfigured → Observations-Set → Optimized`, and `opt` is
//!   idempotent (re-running overwrites the stored estimate).
//!
//! Conventions
//! -----------
//! - Candidate vectors cover the model dimensions only; the direct variant
//!   works entirely in natural coordinates, so the estimate's transformed
//!   and natural optima coincide.
use crate::calibration::errors::{CalibError, CalibResult};
use crate::calibration::observations::ObservationSet;
use crate::calibration::priors::{PriorSet, UnivariatePrior};
use crate::optimization::errors::{OptError, OptResult};
use crate::optimization::map_optimizer::{
    maximize_posterior, LogPosterior, MapOptions, SearchBounds, Theta,
};
use ndarray::{Array1, Array2};

/// Central probability mass used to derive search bounds from priors.
///
/// Kept just under unity so bounds stay inside the meaningful support while
/// avoiding the numerically pathological extreme tails.
pub const BOUND_MASS: f64 = 0.999_999_999_999_999;

/// External forward model evaluated once per observation row.
///
/// Implementations receive the full combined input vector
/// (`nx_exp + nx_model` entries: fixed experimental inputs followed by the
/// candidate model parameters) and return the `ny` model outputs. Errors
/// are surfaced verbatim in [`CalibError::ModelEvaluationFailed`].
pub trait ForwardModel {
    fn evaluate(
        &self, x: &Array1<f64>,
    ) -> Result<Array1<f64>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Structured result of a MAP optimization run.
///
/// - `bounds`: the search box actually used.
/// - `xc_opt`: optimum in the optimizer's coordinate space.
/// - `x_opt`: optimum reverted to natural coordinates (identical to
///   `xc_opt` for the direct variant).
/// - `log_posterior`: attained log-posterior value at the optimum.
/// - `converged` / `iterations`: solver diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEstimate {
    pub bounds: SearchBounds,
    pub xc_opt: Array1<f64>,
    pub x_opt: Array1<f64>,
    pub log_posterior: f64,
    pub converged: bool,
    pub iterations: usize,
}

/// Direct-model MAP estimator.
///
/// Owns the forward model, the prior set, and (once set) the observation
/// store; queryable and re-runnable after optimization.
#[derive(Debug)]
pub struct MapEstimator<M: ForwardModel> {
    nx_exp: usize,
    nx_model: usize,
    ny: usize,
    model: M,
    priors: PriorSet,
    observations: Option<ObservationSet>,
    estimate: Option<MapEstimate>,
}

impl<M: ForwardModel> MapEstimator<M> {
    /// Construct a validated estimator.
    ///
    /// `priors` may cover the model dimensions only (experimental
    /// dimensions are padded with standard-normal placeholders) or all
    /// `nx_exp + nx_model` dimensions.
    ///
    /// # Errors
    /// - [`CalibError::InvalidModelDimensions`] if `nx_model == 0`.
    /// - [`CalibError::InvalidOutputDimensions`] if `ny == 0`.
    /// - [`CalibError::PriorLengthMismatch`] for an unusable prior list.
    pub fn new(
        nx_exp: usize, nx_model: usize, ny: usize, model: M,
        priors: Vec<Box<dyn UnivariatePrior>>,
    ) -> CalibResult<Self> {
        if nx_model == 0 {
            return Err(CalibError::InvalidModelDimensions {
                nx_model,
                reason: "At least one calibratable model input is required.",
            });
        }
        if ny == 0 {
            return Err(CalibError::InvalidOutputDimensions {
                ny,
                reason: "At least one output channel is required.",
            });
        }
        let priors = PriorSet::new(nx_exp, nx_model, priors)?;
        Ok(Self { nx_exp, nx_model, ny, model, priors, observations: None, estimate: None })
    }

    /// Number of experimental input dimensions.
    pub fn nx_exp(&self) -> usize {
        self.nx_exp
    }

    /// Number of calibratable model dimensions.
    pub fn nx_model(&self) -> usize {
        self.nx_model
    }

    /// Total input dimension (`nx_exp + nx_model`).
    pub fn nx(&self) -> usize {
        self.nx_exp + self.nx_model
    }

    /// Number of output channels.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Prior set over all input dimensions.
    pub fn priors(&self) -> &PriorSet {
        &self.priors
    }

    /// Observation store, once set.
    pub fn observations(&self) -> Option<&ObservationSet> {
        self.observations.as_ref()
    }

    /// Most recent optimization result, once `opt` has run.
    pub fn estimate(&self) -> Option<&MapEstimate> {
        self.estimate.as_ref()
    }

    /// Set the experimental observations.
    ///
    /// Validates and stores outputs, optional noise scales, and optional
    /// fixed experimental inputs. On failure, previously stored
    /// observations are left untouched.
    ///
    /// # Errors
    /// Propagates the observation store's validation errors (see
    /// [`ObservationSet::new`]).
    pub fn set_observations(
        &mut self, y: Array2<f64>, y_noise: Option<Array2<f64>>, x_exp: Option<Array2<f64>>,
    ) -> CalibResult<()> {
        let obs = ObservationSet::new(y, y_noise, x_exp, self.nx_exp, self.nx_model, self.ny)?;
        self.observations = Some(obs);
        Ok(())
    }

    /// Natural-space log-prior of a candidate (model dimensions only).
    ///
    /// # Errors
    /// Returns [`CalibError::CandidateLengthMismatch`] for a wrong-length
    /// candidate.
    pub fn log_prior(&self, x: &Array1<f64>) -> CalibResult<f64> {
        self.priors.log_prior(x)
    }

    /// Gaussian log-likelihood of a candidate over all observations.
    ///
    /// Substitutes the candidate into every observation row, evaluates the
    /// forward model for each row, and combines the residuals in closed
    /// form. Any row failure fails the whole call.
    ///
    /// # Errors
    /// - [`CalibError::ObservationsNotSet`] before `set_observations`.
    /// - [`CalibError::CandidateLengthMismatch`] for a wrong-length
    ///   candidate.
    /// - [`CalibError::ModelEvaluationFailed`] /
    ///   [`CalibError::ModelOutputLengthMismatch`] naming the offending
    ///   row.
    pub fn log_likelihood(&self, x: &Array1<f64>) -> CalibResult<f64> {
        let obs = self.observations.as_ref().ok_or(CalibError::ObservationsNotSet)?;
        if x.len() != self.nx_model {
            return Err(CalibError::CandidateLengthMismatch {
                expected: self.nx_model,
                found: x.len(),
            });
        }

        let xs = obs.inputs_with(x);
        let mut fvals = Array2::zeros((obs.obvs(), self.ny));
        for (row, input) in xs.rows().into_iter().enumerate() {
            let output = self
                .model
                .evaluate(&input.to_owned())
                .map_err(|e| CalibError::ModelEvaluationFailed { row, text: e.to_string() })?;
            if output.len() != self.ny {
                return Err(CalibError::ModelOutputLengthMismatch {
                    row,
                    expected: self.ny,
                    found: output.len(),
                });
            }
            fvals.row_mut(row).assign(&output);
        }

        let obvs = obs.obvs() as f64;
        let ny = self.ny as f64;
        let ln_2pi = (2.0 * std::f64::consts::PI).ln();
        let noise = obs.noise();
        let residual = &fvals - obs.outputs();

        let mut ll = -obvs * ny * 0.5 * ln_2pi;
        ll -= noise.mapv(f64::ln).sum();
        ll -= (0.5 * &residual * &residual / (noise * noise)).sum();
        Ok(ll)
    }

    /// Log-posterior: log-likelihood plus natural-space log-prior.
    ///
    /// # Errors
    /// Propagates the likelihood and prior errors.
    pub fn log_posterior(&self, x: &Array1<f64>) -> CalibResult<f64> {
        Ok(self.log_likelihood(x)? + self.log_prior(x)?)
    }

    /// Find the MAP estimate by bounded global search.
    ///
    /// Bounds are each model prior's central interval at [`BOUND_MASS`].
    /// The result is stored on the estimator and returned; re-invoking
    /// overwrites the stored estimate.
    ///
    /// # Errors
    /// - [`CalibError::ObservationsNotSet`] before `set_observations`.
    /// - [`CalibError::Optimization`] wrapping any optimizer-layer failure,
    ///   including posterior evaluation errors raised mid-search.
    pub fn opt(&mut self, opts: &MapOptions) -> CalibResult<MapEstimate> {
        if self.observations.is_none() {
            return Err(CalibError::ObservationsNotSet);
        }

        let mut lower = Array1::zeros(self.nx_model);
        let mut upper = Array1::zeros(self.nx_model);
        for i in 0..self.nx_model {
            let (lo, hi) = self.priors.model_interval(i, BOUND_MASS);
            lower[i] = lo;
            upper[i] = hi;
        }
        let bounds = SearchBounds::new(lower, upper)?;

        let outcome = {
            let objective = DirectObjective { estimator: self };
            maximize_posterior(&objective, &bounds, opts)?
        };

        let estimate = MapEstimate {
            bounds,
            xc_opt: outcome.theta_hat.clone(),
            x_opt: outcome.theta_hat,
            log_posterior: outcome.value,
            converged: outcome.converged,
            iterations: outcome.iterations,
        };
        self.estimate = Some(estimate.clone());
        Ok(estimate)
    }
}

/// Internal objective view: the estimator's log-posterior as a
/// `LogPosterior` for the optimizer layer.
struct DirectObjective<'a, M: ForwardModel> {
    estimator: &'a MapEstimator<M>,
}

impl<M: ForwardModel> LogPosterior for DirectObjective<'_, M> {
    fn value(&self, theta: &Theta) -> OptResult<f64> {
        self.estimator
            .log_posterior(theta)
            .map_err(|e| OptError::PosteriorEvaluation { text: e.to_string() })
    }

    fn check(&self) -> OptResult<()> {
        match self.estimator.observations {
            Some(_) => Ok(()),
            None => Err(OptError::PosteriorEvaluation {
                text: CalibError::ObservationsNotSet.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::priors::UnivariatePrior;
    use ndarray::array;
    use statrs::distribution::Normal;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Constructor validation of dimension counts.
    // - The closed-form likelihood identity for a single observation.
    // - Whole-call failure when any observation row fails.
    // - log_posterior = log_likelihood + log_prior.
    // - The bounds policy and idempotence of `opt`.
    // -------------------------------------------------------------------------

    /// Forward model returning the model-parameter block unchanged
    /// (nx_exp = 0, ny = nx_model).
    struct PassThrough;

    impl ForwardModel for PassThrough {
        fn evaluate(
            &self, x: &Array1<f64>,
        ) -> Result<Array1<f64>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(x.clone())
        }
    }

    /// Forward model that fails on any row whose first input exceeds the
    /// threshold.
    struct FailsAbove(f64);

    impl ForwardModel for FailsAbove {
        fn evaluate(
            &self, x: &Array1<f64>,
        ) -> Result<Array1<f64>, Box<dyn std::error::Error + Send + Sync>> {
            if x[0] > self.0 {
                return Err(format!("solver diverged at x = {}", x[0]).into());
            }
            Ok(array![x[0]])
        }
    }

    fn normal_priors(n: usize) -> Vec<Box<dyn UnivariatePrior>> {
        (0..n).map(|_| Box::new(Normal::new(0.0, 1.0).unwrap()) as Box<dyn UnivariatePrior>).collect()
    }

    #[test]
    // Purpose
    // -------
    // Verify constructor validation: zero model dimensions and zero output
    // channels are configuration errors.
    //
    // Given
    // -----
    // - `nx_model = 0`, then `ny = 0`.
    //
    // Expect
    // ------
    // - `InvalidModelDimensions` and `InvalidOutputDimensions`.
    fn new_rejects_degenerate_dimensions() {
        assert!(matches!(
            MapEstimator::new(0, 0, 1, PassThrough, normal_priors(0)),
            Err(CalibError::InvalidModelDimensions { .. })
        ));
        assert!(matches!(
            MapEstimator::new(0, 1, 0, PassThrough, normal_priors(1)),
            Err(CalibError::InvalidOutputDimensions { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify the closed-form check: for obvs = ny = 1 and a model returning
    // exactly y, the log-likelihood is `-0.5 ln(2π) - ln(y_noise)`.
    //
    // Given
    // -----
    // - PassThrough model, y = [[0.4]], y_noise = [[0.3]], candidate 0.4.
    //
    // Expect
    // ------
    // - Agreement to within 1e-12.
    fn log_likelihood_matches_closed_form_single_observation() {
        let mut est = MapEstimator::new(0, 1, 1, PassThrough, normal_priors(1)).unwrap();
        est.set_observations(array![[0.4]], Some(array![[0.3]]), None).unwrap();

        let ll = est.log_likelihood(&array![0.4]).unwrap();
        let expected = -0.5 * (2.0 * std::f64::consts::PI).ln() - 0.3_f64.ln();
        assert!((ll - expected).abs() < 1e-12, "{ll} vs {expected}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure a failing forward-model row fails the whole likelihood call
    // and names the row, rather than averaging over successful rows.
    //
    // Given
    // -----
    // - `FailsAbove(15.0)` with x_exp rows [10] and [20]; the second row
    //   exceeds the threshold.
    //
    // Expect
    // ------
    // - `ModelEvaluationFailed { row: 1, .. }`.
    fn likelihood_fails_whole_call_on_row_failure() {
        let mut est = MapEstimator::new(1, 1, 1, FailsAbove(15.0), normal_priors(1)).unwrap();
        est.set_observations(array![[1.0], [2.0]], None, Some(array![[10.0], [20.0]])).unwrap();

        let err = est.log_likelihood(&array![0.0]).unwrap_err();
        assert!(matches!(err, CalibError::ModelEvaluationFailed { row: 1, .. }), "got {err:?}");
    }

    #[test]
    // Purpose
    // -------
    // Verify likelihood evaluation requires observations and the posterior
    // is the sum of likelihood and prior.
    //
    // Given
    // -----
    // - An estimator before and after `set_observations`.
    //
    // Expect
    // ------
    // - `ObservationsNotSet` first; afterwards
    //   `log_posterior == log_likelihood + log_prior` to 1e-12.
    fn posterior_is_sum_of_parts_and_requires_observations() {
        let mut est = MapEstimator::new(0, 1, 1, PassThrough, normal_priors(1)).unwrap();
        assert_eq!(est.log_likelihood(&array![0.0]).unwrap_err(), CalibError::ObservationsNotSet);

        est.set_observations(array![[0.1]], Some(array![[0.5]]), None).unwrap();
        let x = array![0.2];
        let sum = est.log_likelihood(&x).unwrap() + est.log_prior(&x).unwrap();
        assert!((est.log_posterior(&x).unwrap() - sum).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify the bounds policy and idempotence of `opt`: the optimum lies
    // within each prior's central interval, and re-running lands within
    // optimizer tolerance of the first result.
    //
    // Given
    // -----
    // - PassThrough with a single observation y = 0.5, noise 0.1, and an
    //   N(0, 1) prior; the posterior mode is near 0.495.
    //
    // Expect
    // ------
    // - Both runs produce estimates inside the bounds, with natural and
    //   transformed optima equal, close to the analytic mode, and within
    //   0.05 of each other.
    fn opt_respects_bounds_and_is_idempotent() {
        let mut est = MapEstimator::new(0, 1, 1, PassThrough, normal_priors(1)).unwrap();
        est.set_observations(array![[0.5]], Some(array![[0.1]]), None).unwrap();

        let opts = MapOptions::new(30, 150, false).unwrap();
        let first = est.opt(&opts).unwrap();
        let second = est.opt(&opts).unwrap();

        for estimate in [&first, &second] {
            assert!(estimate.bounds.contains(&estimate.xc_opt));
            assert_eq!(estimate.x_opt, estimate.xc_opt);
            // Posterior mode: y/noise² / (1/noise² + 1) = 0.5/0.01 / 101.
            assert!((estimate.x_opt[0] - 0.495).abs() < 0.05, "{:?}", estimate.x_opt);
        }
        assert!((first.x_opt[0] - second.x_opt[0]).abs() < 0.05);
        assert_eq!(est.estimate().unwrap(), &second);
    }
}

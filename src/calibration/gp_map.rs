//! Surrogate-coupled MAP estimation.
//!
//! Purpose
//! -------
//! Estimate the posterior mode when the likelihood comes from a pre-fit
//! Gaussian-process surrogate instead of direct model evaluation. The
//! evaluator works in the surrogate's converted coordinate space: the
//! log-prior carries a per-dimension change-of-variables correction, the
//! log-likelihood is the marginal likelihood of the snapshot's training set
//! augmented with the observation batch, and the search bounds come from
//! the snapshot's trained data range rather than the priors.
//!
//! Key behaviors
//! -------------
//! - [`GpMapEstimator::attach_surrogate`] deep-copies a [`GpSnapshot`]
//!   wholesale after checking its dimensions against the evaluator, so the
//!   evaluator and the original surrogate never alias state.
//! - [`GpMapEstimator::log_likelihood`] appends the transformed
//!   observation rows (fixed inputs plus the converted-space candidate,
//!   converted outputs, converted noise squared into variances) to the
//!   snapshot's training arrays and evaluates the heteroscedastic marginal
//!   likelihood under the snapshot's kernel hyperparameters. The
//!   hyperparameters are never re-optimized inside this call; only the
//!   augmented rows' own noise column varies.
//! - [`GpMapEstimator::opt`] bounds the search by the snapshot's training
//!   min/max along each model dimension, since extrapolation outside the
//!   trained region is unreliable regardless of what the prior would
//!   permit, and reverts the converted-space optimum through each
//!   dimension's inverse transform for the natural-space estimate.
//!
//! Invariants & assumptions
//! ------------------------
//! - Priors cover every input dimension (no placeholder padding); the
//!   transform lists match the input and output dimensions exactly.
//! - Candidate vectors live in converted space; reversion happens only
//!   when reporting the optimum.
//! - Augmentation builds per-call arrays; the snapshot itself is immutable,
//!   so likelihood calls are repeatable and order-independent.
use crate::calibration::errors::{CalibError, CalibResult};
use crate::calibration::map::MapEstimate;
use crate::calibration::observations::{ObservationSet, TransformedObservations};
use crate::calibration::priors::{PriorSet, UnivariatePrior};
use crate::optimization::errors::{OptError, OptResult};
use crate::optimization::map_optimizer::{
    maximize_posterior, LogPosterior, MapOptions, SearchBounds, Theta,
};
use crate::surrogate::{log_marginal_likelihood, GpSnapshot};
use crate::transforms::ConRev;
use ndarray::{s, Array1, Array2};

/// Surrogate-coupled MAP estimator.
///
/// Owns the prior set, per-dimension transform lists, the attached
/// surrogate snapshot, and the observation store plus its transformed
/// mirror.
pub struct GpMapEstimator {
    nx_exp: usize,
    nx_model: usize,
    ny: usize,
    priors: PriorSet,
    xconrevs: Vec<Box<dyn ConRev>>,
    yconrevs: Vec<Box<dyn ConRev>>,
    surrogate: Option<GpSnapshot>,
    observations: Option<ObservationSet>,
    transformed: Option<TransformedObservations>,
    estimate: Option<MapEstimate>,
}

impl GpMapEstimator {
    /// Construct a validated estimator.
    ///
    /// Unlike the direct variant, the prior list must cover every input
    /// dimension: the surrogate's converted space mixes experimental and
    /// model coordinates, so implicit placeholder padding would hide a
    /// configuration mistake.
    ///
    /// # Errors
    /// - [`CalibError::InvalidModelDimensions`] /
    ///   [`CalibError::InvalidOutputDimensions`] for degenerate counts.
    /// - [`CalibError::PriorLengthMismatchFull`] if the prior list does not
    ///   cover all `nx_exp + nx_model` dimensions.
    /// - [`CalibError::TransformLengthMismatch`] naming `xconrevs` or
    ///   `yconrevs` when a transform list has the wrong length.
    pub fn new(
        nx_exp: usize, nx_model: usize, ny: usize, priors: Vec<Box<dyn UnivariatePrior>>,
        xconrevs: Vec<Box<dyn ConRev>>, yconrevs: Vec<Box<dyn ConRev>>,
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
        let nx = nx_exp + nx_model;
        if priors.len() != nx {
            return Err(CalibError::PriorLengthMismatchFull { expected: nx, found: priors.len() });
        }
        if xconrevs.len() != nx {
            return Err(CalibError::TransformLengthMismatch {
                argument: "xconrevs",
                expected: nx,
                found: xconrevs.len(),
            });
        }
        if yconrevs.len() != ny {
            return Err(CalibError::TransformLengthMismatch {
                argument: "yconrevs",
                expected: ny,
                found: yconrevs.len(),
            });
        }
        let priors = PriorSet::new(nx_exp, nx_model, priors)?;
        Ok(Self {
            nx_exp,
            nx_model,
            ny,
            priors,
            xconrevs,
            yconrevs,
            surrogate: None,
            observations: None,
            transformed: None,
            estimate: None,
        })
    }

    /// Total input dimension (`nx_exp + nx_model`).
    pub fn nx(&self) -> usize {
        self.nx_exp + self.nx_model
    }

    /// Number of output channels.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Attached surrogate snapshot, once set.
    pub fn surrogate(&self) -> Option<&GpSnapshot> {
        self.surrogate.as_ref()
    }

    /// Most recent optimization result, once `opt` has run.
    pub fn estimate(&self) -> Option<&MapEstimate> {
        self.estimate.as_ref()
    }

    /// Attach a pre-fit surrogate snapshot.
    ///
    /// The snapshot's trained state is copied by value in one piece; no
    /// field-by-field extraction, so later evaluations cannot alias or
    /// mutate the caller's surrogate. If observations are already set, the
    /// transformed mirror is rebuilt so the evaluator is immediately
    /// ready.
    ///
    /// # Errors
    /// - [`CalibError::SurrogateInputMismatch`] if `gp.nx() != nx_exp +
    ///   nx_model`.
    /// - [`CalibError::SurrogateOutputMismatch`] if `gp.ny() != ny`.
    pub fn attach_surrogate(&mut self, gp: &GpSnapshot) -> CalibResult<()> {
        if gp.nx() != self.nx() {
            return Err(CalibError::SurrogateInputMismatch {
                expected: self.nx(),
                found: gp.nx(),
            });
        }
        if gp.ny() != self.ny {
            return Err(CalibError::SurrogateOutputMismatch {
                expected: self.ny,
                found: gp.ny(),
            });
        }
        self.surrogate = Some(gp.clone());
        if let Some(obs) = &self.observations {
            self.transformed =
                Some(TransformedObservations::new(obs, &self.xconrevs, &self.yconrevs));
        }
        Ok(())
    }

    /// Set the experimental observations and build the transformed mirror.
    ///
    /// Both the store and its mirror are built before either is assigned,
    /// so a validation failure leaves prior state untouched.
    ///
    /// # Errors
    /// Propagates the observation store's validation errors (see
    /// [`ObservationSet::new`]).
    pub fn set_observations(
        &mut self, y: Array2<f64>, y_noise: Option<Array2<f64>>, x_exp: Option<Array2<f64>>,
    ) -> CalibResult<()> {
        let obs = ObservationSet::new(y, y_noise, x_exp, self.nx_exp, self.nx_model, self.ny)?;
        let mirror = TransformedObservations::new(&obs, &self.xconrevs, &self.yconrevs);
        self.observations = Some(obs);
        self.transformed = Some(mirror);
        Ok(())
    }

    /// Converted-space log-prior with change-of-variables correction.
    ///
    /// Evaluates each model prior at the reverted coordinate and adds
    /// `ln|d(revert)/dx|`, accumulated over all model dimensions.
    ///
    /// # Errors
    /// Returns [`CalibError::CandidateLengthMismatch`] for a wrong-length
    /// candidate.
    pub fn log_prior(&self, x: &Array1<f64>) -> CalibResult<f64> {
        self.priors.log_prior_transformed(x, &self.xconrevs)
    }

    /// Surrogate log-likelihood of a converted-space candidate.
    ///
    /// Augments the snapshot's training set with the observation batch and
    /// returns the heteroscedastic log marginal likelihood under the
    /// snapshot's fixed kernel hyperparameters.
    ///
    /// # Errors
    /// - [`CalibError::SurrogateNotAttached`] /
    ///   [`CalibError::ObservationsNotSet`] before the evaluator is ready.
    /// - [`CalibError::CandidateLengthMismatch`] for a wrong-length
    ///   candidate.
    /// - [`CalibError::SurrogateEvaluation`] wrapping covariance
    ///   factorization failures.
    pub fn log_likelihood(&self, x: &Array1<f64>) -> CalibResult<f64> {
        let gp = self.surrogate.as_ref().ok_or(CalibError::SurrogateNotAttached)?;
        let mirror = self.transformed.as_ref().ok_or(CalibError::ObservationsNotSet)?;
        if x.len() != self.nx_model {
            return Err(CalibError::CandidateLengthMismatch {
                expected: self.nx_model,
                found: x.len(),
            });
        }

        let (xc_aug, yc_aug, noise_aug) = self.augment(gp, mirror, x);
        let lml = log_marginal_likelihood(gp.kernel(), &xc_aug, &yc_aug, &noise_aug)?;
        Ok(lml)
    }

    /// Log-posterior: surrogate log-likelihood plus transformed log-prior.
    ///
    /// # Errors
    /// Propagates the likelihood and prior errors.
    pub fn log_posterior(&self, x: &Array1<f64>) -> CalibResult<f64> {
        Ok(self.log_likelihood(x)? + self.log_prior(x)?)
    }

    /// Find the MAP estimate by bounded global search in converted space.
    ///
    /// Bounds are the snapshot's training min/max along each model
    /// dimension. The converted-space optimum is reverted per dimension for
    /// the natural-space estimate; both are stored and returned.
    /// Re-invoking overwrites the stored estimate.
    ///
    /// # Errors
    /// - [`CalibError::SurrogateNotAttached`] /
    ///   [`CalibError::ObservationsNotSet`] before the evaluator is ready.
    /// - [`CalibError::Optimization`] wrapping any optimizer-layer failure.
    pub fn opt(&mut self, opts: &MapOptions) -> CalibResult<MapEstimate> {
        let gp = self.surrogate.as_ref().ok_or(CalibError::SurrogateNotAttached)?;
        if self.observations.is_none() {
            return Err(CalibError::ObservationsNotSet);
        }

        let mut lower = Array1::zeros(self.nx_model);
        let mut upper = Array1::zeros(self.nx_model);
        for i in 0..self.nx_model {
            let (lo, hi) = gp.training_range(self.nx_exp + i);
            lower[i] = lo;
            upper[i] = hi;
        }
        let bounds = SearchBounds::new(lower, upper)?;

        let outcome = {
            let objective = SurrogateObjective { estimator: self };
            maximize_posterior(&objective, &bounds, opts)?
        };

        let xc_opt = outcome.theta_hat;
        let mut x_opt = Array1::zeros(self.nx_model);
        for i in 0..self.nx_model {
            x_opt[i] = self.xconrevs[self.nx_exp + i].revert(xc_opt[i]);
        }

        let estimate = MapEstimate {
            bounds,
            xc_opt,
            x_opt,
            log_posterior: outcome.value,
            converged: outcome.converged,
            iterations: outcome.iterations,
        };
        self.estimate = Some(estimate.clone());
        Ok(estimate)
    }

    /// Build the augmented training arrays for one likelihood evaluation.
    ///
    /// Top block: the snapshot's training data verbatim. Bottom block: the
    /// transformed observation batch with the candidate written into the
    /// model columns, converted outputs, and converted noise scales
    /// squared into variances.
    fn augment(
        &self, gp: &GpSnapshot, mirror: &TransformedObservations, x: &Array1<f64>,
    ) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
        let n_train = gp.n_train();
        let obvs = mirror.xc_obv.nrows();
        let nx = self.nx();

        let mut xc_aug = Array2::zeros((n_train + obvs, nx));
        xc_aug.slice_mut(s![..n_train, ..]).assign(gp.training_inputs());
        xc_aug.slice_mut(s![n_train.., ..]).assign(&mirror.xc_obv);
        for mut row in xc_aug.slice_mut(s![n_train.., self.nx_exp..]).rows_mut() {
            row.assign(x);
        }

        let mut yc_aug = Array2::zeros((n_train + obvs, self.ny));
        yc_aug.slice_mut(s![..n_train, ..]).assign(gp.training_outputs());
        yc_aug.slice_mut(s![n_train.., ..]).assign(&mirror.yc_obv);

        let mut noise_aug = Array2::zeros((n_train + obvs, self.ny));
        noise_aug.slice_mut(s![..n_train, ..]).assign(gp.noise_variances());
        noise_aug
            .slice_mut(s![n_train.., ..])
            .assign(&mirror.yc_noise.mapv(|v| v * v));

        (xc_aug, yc_aug, noise_aug)
    }
}

impl std::fmt::Debug for GpMapEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpMapEstimator")
            .field("nx_exp", &self.nx_exp)
            .field("nx_model", &self.nx_model)
            .field("ny", &self.ny)
            .field("surrogate", &self.surrogate.is_some())
            .field("observations", &self.observations.is_some())
            .finish()
    }
}

/// Internal objective view: the estimator's log-posterior as a
/// `LogPosterior` for the optimizer layer.
struct SurrogateObjective<'a> {
    estimator: &'a GpMapEstimator,
}

impl LogPosterior for SurrogateObjective<'_> {
    fn value(&self, theta: &Theta) -> OptResult<f64> {
        self.estimator
            .log_posterior(theta)
            .map_err(|e| OptError::PosteriorEvaluation { text: e.to_string() })
    }

    fn check(&self) -> OptResult<()> {
        if self.estimator.surrogate.is_none() {
            return Err(OptError::PosteriorEvaluation {
                text: CalibError::SurrogateNotAttached.to_string(),
            });
        }
        if self.estimator.observations.is_none() {
            return Err(OptError::PosteriorEvaluation {
                text: CalibError::ObservationsNotSet.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surrogate::{Kernel, KernelFamily};
    use crate::transforms::Identity;
    use ndarray::array;
    use statrs::distribution::Normal;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Constructor and attachment validation (prior/transform lengths,
    //   snapshot dimension checks).
    // - Augmentation semantics of the surrogate likelihood (agreement with
    //   a hand-built augmented marginal).
    // - State errors before the evaluator is ready.
    // - The trained-range bounds policy and reversion of the optimum.
    // -------------------------------------------------------------------------

    fn normal_priors(n: usize) -> Vec<Box<dyn UnivariatePrior>> {
        (0..n).map(|_| Box::new(Normal::new(0.0, 1.0).unwrap()) as Box<dyn UnivariatePrior>).collect()
    }

    fn identity_transforms(n: usize) -> Vec<Box<dyn ConRev>> {
        (0..n).map(|_| Box::new(Identity) as Box<dyn ConRev>).collect()
    }

    fn make_snapshot() -> GpSnapshot {
        let kernel = Kernel::new(KernelFamily::Rbf, 1.0, array![1.0]).unwrap();
        let xc = array![[-1.0], [0.0], [0.5], [1.0]];
        let yc = array![[0.9], [0.0], [0.3], [1.1]];
        let noise = array![[0.01], [0.01], [0.01], [0.01]];
        GpSnapshot::new(kernel, xc, yc, Some(noise)).unwrap()
    }

    fn ready_estimator() -> GpMapEstimator {
        let mut est =
            GpMapEstimator::new(0, 1, 1, normal_priors(1), identity_transforms(1), identity_transforms(1))
                .unwrap();
        est.attach_surrogate(&make_snapshot()).unwrap();
        est.set_observations(array![[0.2]], Some(array![[0.1]]), None).unwrap();
        est
    }

    #[test]
    // Purpose
    // -------
    // Verify the surrogate-coupled constructor demands full-length priors
    // and matching transform lists.
    //
    // Given
    // -----
    // - nx_exp = 1, nx_model = 1 (nx = 2) with a model-only prior list,
    //   then a short xconrevs, then a short yconrevs.
    //
    // Expect
    // ------
    // - `PriorLengthMismatchFull` and `TransformLengthMismatch` naming the
    //   offending list.
    fn new_validates_prior_and_transform_lengths() {
        let err = GpMapEstimator::new(
            1,
            1,
            1,
            normal_priors(1),
            identity_transforms(2),
            identity_transforms(1),
        )
        .unwrap_err();
        assert_eq!(err, CalibError::PriorLengthMismatchFull { expected: 2, found: 1 });

        let err = GpMapEstimator::new(
            1,
            1,
            1,
            normal_priors(2),
            identity_transforms(1),
            identity_transforms(1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CalibError::TransformLengthMismatch { argument: "xconrevs", expected: 2, found: 1 }
        );

        let err = GpMapEstimator::new(
            1,
            1,
            2,
            normal_priors(2),
            identity_transforms(2),
            identity_transforms(1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CalibError::TransformLengthMismatch { argument: "yconrevs", expected: 2, found: 1 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify `attach_surrogate` rejects snapshots whose dimensions do not
    // match the evaluator.
    //
    // Given
    // -----
    // - A 1-input snapshot attached to a 2-input evaluator.
    //
    // Expect
    // ------
    // - `SurrogateInputMismatch { expected: 2, found: 1 }` and no snapshot
    //   stored.
    fn attach_surrogate_rejects_dimension_mismatch() {
        let mut est = GpMapEstimator::new(
            1,
            1,
            1,
            normal_priors(2),
            identity_transforms(2),
            identity_transforms(1),
        )
        .unwrap();
        let err = est.attach_surrogate(&make_snapshot()).unwrap_err();
        assert_eq!(err, CalibError::SurrogateInputMismatch { expected: 2, found: 1 });
        assert!(est.surrogate().is_none());
    }

    #[test]
    // Purpose
    // -------
    // Ensure likelihood evaluation reports missing state in the documented
    // order: surrogate first, then observations.
    //
    // Given
    // -----
    // - A freshly constructed evaluator, then one with only a snapshot.
    //
    // Expect
    // ------
    // - `SurrogateNotAttached`, then `ObservationsNotSet`.
    fn likelihood_requires_surrogate_then_observations() {
        let mut est =
            GpMapEstimator::new(0, 1, 1, normal_priors(1), identity_transforms(1), identity_transforms(1))
                .unwrap();
        assert_eq!(est.log_likelihood(&array![0.0]).unwrap_err(), CalibError::SurrogateNotAttached);

        est.attach_surrogate(&make_snapshot()).unwrap();
        assert_eq!(est.log_likelihood(&array![0.0]).unwrap_err(), CalibError::ObservationsNotSet);
    }

    #[test]
    // Purpose
    // -------
    // Verify the augmented likelihood equals a hand-built marginal over
    // the stacked training-plus-observation arrays with the candidate in
    // the model column and squared noise in the appended rows.
    //
    // Given
    // -----
    // - The ready evaluator (identity transforms) and candidate 0.3.
    //
    // Expect
    // ------
    // - `log_likelihood` agrees with `log_marginal_likelihood` on the
    //   manually stacked arrays to 1e-12.
    fn likelihood_matches_hand_built_augmentation() {
        let est = ready_estimator();
        let ll = est.log_likelihood(&array![0.3]).unwrap();

        let gp = make_snapshot();
        let xc = array![[-1.0], [0.0], [0.5], [1.0], [0.3]];
        let yc = array![[0.9], [0.0], [0.3], [1.1], [0.2]];
        let noise = array![[0.01], [0.01], [0.01], [0.01], [0.01]];
        let expected = log_marginal_likelihood(gp.kernel(), &xc, &yc, &noise).unwrap();

        assert!((ll - expected).abs() < 1e-12, "{ll} vs {expected}");
    }

    #[test]
    // Purpose
    // -------
    // Verify `opt` bounds the search by the snapshot's training range and
    // reverts the optimum (identity transforms make both spaces equal).
    //
    // Given
    // -----
    // - The ready evaluator; training inputs span [-1, 1].
    //
    // Expect
    // ------
    // - Bounds equal the training range, the optimum lies inside, and
    //   `x_opt == xc_opt` under identity transforms.
    fn opt_uses_training_range_bounds_and_reverts() {
        let mut est = ready_estimator();
        let opts = MapOptions::new(20, 80, false).unwrap();
        let estimate = est.opt(&opts).unwrap();

        assert_eq!(estimate.bounds.lower, array![-1.0]);
        assert_eq!(estimate.bounds.upper, array![1.0]);
        assert!(estimate.bounds.contains(&estimate.xc_opt));
        assert_eq!(estimate.x_opt, estimate.xc_opt);
        assert!(est.estimate().is_some());
    }
}

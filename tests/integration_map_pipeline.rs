//! Integration tests for MAP calibration pipelines.
//!
//! Purpose
//! -------
//! - Validate the end-to-end direct-model pipeline: from validated
//!   observations, through prior/likelihood/posterior evaluation, to a
//!   bounded global MAP search with prior-interval bounds.
//! - Validate the surrogate-coupled pipeline: snapshot attachment,
//!   augmented marginal-likelihood evaluation, trained-range bounds, and
//!   reversion of the optimum through the inverse transforms.
//!
//! Coverage
//! --------
//! - `calibration::map::MapEstimator`:
//!   - Construction, observation validation passthrough, posterior
//!     composition, and `opt` against a linear forward model.
//! - `calibration::gp_map::GpMapEstimator`:
//!   - Attachment checks, conditioning of the augmented likelihood on the
//!     observed output, and converted → natural reversion under a `Log`
//!     transform.
//! - `calibration::mcmc::McmcSampler`:
//!   - Delegation of the posterior surface used by future chains.
//! - `optimization::map_optimizer`:
//!   - Use of `MapOptions` and swarm diagnostics via the structured
//!     estimate.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (kernels,
//!   bounds validation, transform round-trips) — these are covered by
//!   unit tests in their modules.
//! - Surrogate training quality; snapshots here are small hand-built
//!   grids, not fitted models.
use ndarray::{array, Array1, Array2};
use rust_calibration::{
    calibration::{
        errors::CalibError,
        gp_map::GpMapEstimator,
        map::{ForwardModel, MapEstimator},
        mcmc::McmcSampler,
        priors::UnivariatePrior,
    },
    optimization::map_optimizer::MapOptions,
    surrogate::{GpSnapshot, Kernel, KernelFamily},
    transforms::{ConRev, Identity, Log},
};
use statrs::distribution::Normal;

/// Linear response `y = a + b * x_exp` with calibratable intercept and
/// slope (nx_exp = 1, nx_model = 2, ny = 1).
struct LinearResponse;

impl ForwardModel for LinearResponse {
    fn evaluate(
        &self, x: &Array1<f64>,
    ) -> Result<Array1<f64>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(array![x[1] + x[2] * x[0]])
    }
}

/// Purpose
/// -------
/// Build observations of the linear response at fixed design points from
/// known true parameters, with a shared noise scale.
///
/// Parameters
/// ----------
/// - `intercept`, `slope`: true parameter values generating the outputs.
/// - `noise`: noise standard deviation recorded for every observation.
///
/// Returns
/// -------
/// - `(y, y_noise, x_exp)` arrays for `set_observations`, five rows with
///   design points spread over [-2, 2]. Outputs are exact (no sampling),
///   so the posterior mode sits at the generating parameters up to the
///   prior pull.
fn linear_observations(intercept: f64, slope: f64, noise: f64) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
    let design = [-2.0, -1.0, 0.0, 1.0, 2.0];
    let mut y = Array2::zeros((design.len(), 1));
    for (i, &x) in design.iter().enumerate() {
        y[(i, 0)] = intercept + slope * x;
    }
    let y_noise = Array2::from_elem((design.len(), 1), noise);
    let x_exp = Array2::from_shape_vec((design.len(), 1), design.to_vec()).unwrap();
    (y, y_noise, x_exp)
}

fn wide_normal_priors(n: usize) -> Vec<Box<dyn UnivariatePrior>> {
    (0..n).map(|_| Box::new(Normal::new(0.0, 2.0).unwrap()) as Box<dyn UnivariatePrior>).collect()
}

/// Purpose
/// -------
/// Hand-build a snapshot of the additive surface `y = x_exp + x_model` on
/// a 3×3 converted-space grid, with a shared RBF kernel and small noise.
///
/// Returns
/// -------
/// - A `GpSnapshot` with nx = 2, ny = 1, training inputs spanning
///   [-1, 1] in both dimensions.
fn additive_snapshot() -> GpSnapshot {
    let grid = [-1.0, 0.0, 1.0];
    let mut xc = Array2::zeros((9, 2));
    let mut yc = Array2::zeros((9, 1));
    for (row, (&e, &m)) in grid.iter().flat_map(|e| grid.iter().map(move |m| (e, m))).enumerate() {
        xc[(row, 0)] = e;
        xc[(row, 1)] = m;
        yc[(row, 0)] = e + m;
    }
    let kernel = Kernel::new(KernelFamily::Rbf, 1.0, array![1.0, 1.0]).unwrap();
    let noise = Array2::from_elem((9, 1), 1e-4);
    GpSnapshot::new(kernel, xc, yc, Some(noise)).unwrap()
}

#[test]
// Purpose
// -------
// Run the full direct-model pipeline and check the MAP estimate recovers
// the generating parameters within optimizer tolerance, inside the
// prior-interval bounds, with the structured estimate stored on the
// evaluator.
//
// Given
// -----
// - Exact linear observations from (intercept, slope) = (1.5, -0.7) with
//   noise 0.05 and wide N(0, 2) priors.
// - A 40-particle swarm capped at 300 iterations.
//
// Expect
// ------
// - Both parameters within 0.1 of the truth, the optimum inside the
//   bounds, natural and converted optima equal, and `estimate()`
//   returning the same result.
fn direct_pipeline_recovers_linear_parameters() {
    let mut est = MapEstimator::new(1, 2, 1, LinearResponse, wide_normal_priors(2)).unwrap();
    let (y, y_noise, x_exp) = linear_observations(1.5, -0.7, 0.05);
    est.set_observations(y, Some(y_noise), Some(x_exp)).unwrap();

    let opts = MapOptions::new(40, 300, false).unwrap();
    let estimate = est.opt(&opts).unwrap();

    assert!((estimate.x_opt[0] - 1.5).abs() < 0.1, "intercept {:?}", estimate.x_opt);
    assert!((estimate.x_opt[1] + 0.7).abs() < 0.1, "slope {:?}", estimate.x_opt);
    assert!(estimate.bounds.contains(&estimate.xc_opt));
    assert_eq!(estimate.x_opt, estimate.xc_opt);
    assert!(estimate.log_posterior.is_finite());
    assert_eq!(est.estimate().unwrap(), &estimate);
}

#[test]
// Purpose
// -------
// Confirm observation validation surfaces through the estimator with the
// offending argument named, leaving the evaluator unusable for
// likelihood calls until valid data arrives.
//
// Given
// -----
// - A linear estimator fed an `x_exp` with the wrong row count.
//
// Expect
// ------
// - `ExpInputShapeMismatch` from `set_observations` and
//   `ObservationsNotSet` from a subsequent likelihood call.
fn direct_pipeline_rejects_malformed_observations() {
    let mut est = MapEstimator::new(1, 2, 1, LinearResponse, wide_normal_priors(2)).unwrap();
    let err = est
        .set_observations(array![[1.0], [2.0]], None, Some(array![[0.0]]))
        .unwrap_err();
    assert_eq!(err, CalibError::ExpInputShapeMismatch { expected: (2, 1), found: (1, 1) });
    assert_eq!(
        est.log_likelihood(&array![0.0, 0.0]).unwrap_err(),
        CalibError::ObservationsNotSet
    );
}

#[test]
// Purpose
// -------
// Run the surrogate-coupled pipeline on the additive surface and check
// that conditioning on an observed output moves the posterior toward the
// matching model parameter, with the search confined to the trained
// range.
//
// Given
// -----
// - The additive snapshot (y = x_exp + x_model), identity transforms, an
//   observation y = 0.8 at x_exp = 0.0, and wide priors.
//
// Expect
// ------
// - `log_posterior(0.8) > log_posterior(-0.8)`, bounds equal to the
//   trained range [-1, 1], and the optimum inside them.
fn surrogate_pipeline_conditions_on_observation() {
    let mut est = GpMapEstimator::new(
        1,
        1,
        1,
        wide_normal_priors(2),
        vec![Box::new(Identity) as Box<dyn ConRev>, Box::new(Identity)],
        vec![Box::new(Identity) as Box<dyn ConRev>],
    )
    .unwrap();
    est.attach_surrogate(&additive_snapshot()).unwrap();
    est.set_observations(array![[0.8]], Some(array![[0.05]]), Some(array![[0.0]])).unwrap();

    let near = est.log_posterior(&array![0.8]).unwrap();
    let far = est.log_posterior(&array![-0.8]).unwrap();
    assert!(near > far, "posterior should favor the matching parameter: {near} vs {far}");

    let opts = MapOptions::new(30, 120, false).unwrap();
    let estimate = est.opt(&opts).unwrap();
    assert_eq!(estimate.bounds.lower, array![-1.0]);
    assert_eq!(estimate.bounds.upper, array![1.0]);
    assert!(estimate.bounds.contains(&estimate.xc_opt));
}

#[test]
// Purpose
// -------
// Verify the converted → natural reversion of the surrogate-coupled
// optimum under a `Log` model-parameter transform.
//
// Given
// -----
// - A 1-D snapshot over converted space [-1, 1] (natural space
//   [1/e, e]) for the identity surface, a `Log` transform on the model
//   dimension, and an observation of 0.5.
//
// Expect
// ------
// - `x_opt == exp(xc_opt)` for the reported estimate, with the converted
//   optimum inside the trained range.
fn surrogate_pipeline_reverts_log_transform() {
    let grid = array![[-1.0], [-0.5], [0.0], [0.5], [1.0]];
    let targets = grid.clone();
    let kernel = Kernel::new(KernelFamily::Matern52, 1.0, array![1.0]).unwrap();
    let snapshot = GpSnapshot::new(kernel, grid, targets, Some(Array2::from_elem((5, 1), 1e-4)))
        .unwrap();

    let mut est = GpMapEstimator::new(
        0,
        1,
        1,
        wide_normal_priors(1),
        vec![Box::new(Log) as Box<dyn ConRev>],
        vec![Box::new(Identity) as Box<dyn ConRev>],
    )
    .unwrap();
    est.attach_surrogate(&snapshot).unwrap();
    est.set_observations(array![[0.5]], Some(array![[0.05]]), None).unwrap();

    let opts = MapOptions::new(30, 120, false).unwrap();
    let estimate = est.opt(&opts).unwrap();

    assert!(estimate.bounds.contains(&estimate.xc_opt));
    assert!((estimate.x_opt[0] - estimate.xc_opt[0].exp()).abs() < 1e-12);
}

#[test]
// Purpose
// -------
// Smoke-test the sampling scaffolding: the sampler exposes the wrapped
// evaluator's posterior surface unchanged.
//
// Given
// -----
// - A ready direct-model estimator wrapped in `McmcSampler`.
//
// Expect
// ------
// - `sampler.log_posterior` agrees with the evaluator's own value.
fn mcmc_scaffolding_delegates_posterior() {
    let mut est = MapEstimator::new(1, 2, 1, LinearResponse, wide_normal_priors(2)).unwrap();
    let (y, y_noise, x_exp) = linear_observations(1.5, -0.7, 0.05);
    est.set_observations(y, Some(y_noise), Some(x_exp)).unwrap();

    let direct = est.log_posterior(&array![1.0, -0.5]).unwrap();
    let sampler = McmcSampler::new(est);
    let delegated = sampler.log_posterior(&array![1.0, -0.5]).unwrap();
    assert!((direct - delegated).abs() < 1e-12);
}

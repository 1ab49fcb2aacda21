//! calibration — priors, observations, and posterior evaluators.
//!
//! Purpose
//! -------
//! Provide the Bayesian calibration core: combine a per-dimension prior
//! set with a likelihood (direct forward-model evaluation or a GP
//! surrogate's marginal likelihood) into a log-posterior, and drive a
//! bounded global search of its negative to a maximum-a-posteriori point
//! estimate.
//!
//! Key behaviors
//! -------------
//! - [`priors::PriorSet`] sums per-dimension log-densities, with an
//!   optional change-of-variables correction for evaluators working in a
//!   transformed coordinate space.
//! - [`observations::ObservationSet`] validates experimental data once and
//!   supplies per-evaluation candidate substitution without shared-state
//!   mutation; [`observations::TransformedObservations`] mirrors the batch
//!   into converted coordinates.
//! - [`map::MapEstimator`] is the direct-model variant: closed-form
//!   Gaussian likelihood, prior-interval search bounds.
//! - [`gp_map::GpMapEstimator`] is the surrogate-coupled variant:
//!   augmented-training-set marginal likelihood under frozen
//!   hyperparameters, trained-range search bounds, reversion of the
//!   optimum to natural coordinates.
//! - [`mcmc::McmcSampler`] is scaffolding for posterior sampling on top of
//!   an evaluator; chains themselves are out of scope.
//!
//! Invariants & assumptions
//! ------------------------
//! - Evaluator lifecycle: construction → observations set → optimized;
//!   likelihood and `opt` calls fail fast with state errors until their
//!   prerequisites are met, and `opt` is idempotent.
//! - Configuration errors (dimension counts, prior/transform lengths,
//!   snapshot mismatches) are raised at construction or attachment time;
//!   evaluators are never partially constructed.
//! - Evaluation failures are total: one failing observation row fails the
//!   whole likelihood call, and an evaluation failure mid-search aborts
//!   the optimization run.
//!
//! Conventions
//! -----------
//! - Candidate vectors cover the model-parameter dimensions only.
//! - All fallible entrypoints return `CalibResult<T>`; optimizer and
//!   surrogate failures arrive wrapped in [`errors::CalibError`] variants.
//!
//! Testing notes
//! -------------
//! - Unit tests live at the bottom of each submodule and cover the core
//!   contract properties: exact prior summation and permutation
//!   invariance, Jacobian normalization, observation round-trips and
//!   named-argument rejections, the closed-form likelihood identity,
//!   whole-call failure propagation, bounds policies, and `opt`
//!   idempotence.
//! - The end-to-end pipeline is exercised in
//!   `tests/integration_map_pipeline.rs`.

pub mod errors;
pub mod gp_map;
pub mod map;
pub mod mcmc;
pub mod observations;
pub mod priors;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_calibration::calibration::prelude::*;
//
// to import the main calibration surface in a single line.

pub mod prelude {
    pub use super::errors::{CalibError, CalibResult};
    pub use super::gp_map::GpMapEstimator;
    pub use super::map::{ForwardModel, MapEstimate, MapEstimator, BOUND_MASS};
    pub use super::observations::{ObservationSet, TransformedObservations};
    pub use super::priors::{PriorSet, UnivariatePrior};
}

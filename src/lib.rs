//! rust_calibration — Bayesian MAP calibration of parametric models.
//!
//! Purpose
//! -------
//! Calibrate the unknown parameters of a model against noisy experimental
//! observations: combine per-dimension priors with a likelihood (direct
//! forward-model evaluation or a pre-fit Gaussian-process surrogate) and
//! find the posterior mode by bounded, derivative-free global search.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules (`calibration`, `surrogate`, `transforms`,
//!   `optimization`) as the public crate surface.
//! - The direct variant ([`calibration::map::MapEstimator`]) evaluates a
//!   closed-form Gaussian likelihood over all observation rows and bounds
//!   the search inside each prior's central probability interval.
//! - The surrogate-coupled variant
//!   ([`calibration::gp_map::GpMapEstimator`]) works in the surrogate's
//!   converted coordinate space: Jacobian-corrected priors, an
//!   augmented-training-set marginal likelihood under frozen kernel
//!   hyperparameters, and search bounds from the trained data range.
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration mistakes fail at construction or attachment time;
//!   malformed observation data fails in `set_observations` without
//!   partial mutation; evaluation failures are total and abort the
//!   affected call or search.
//! - Surrogate training, data I/O, and sampling-chain implementation are
//!   external concerns: surrogates arrive as pre-fit snapshots, and the
//!   MCMC module is scaffolding only.
//!
//! Conventions
//! -----------
//! - Vectors and matrices are `ndarray` containers over `f64` throughout.
//! - Fallible entrypoints return per-area result aliases (`CalibResult`,
//!   `SurrogateResult`, `OptResult`, `TransformResult`); errors are plain
//!   enums with context-carrying variants.
//! - Optimization runs quietly by default; the `obs_slog` cargo feature
//!   plus the `verbose` option attach a terminal progress observer.
//!
//! Downstream usage
//! ----------------
//! - Construct an estimator with dimension counts and priors, call
//!   `set_observations`, then `opt` for a structured
//!   [`calibration::map::MapEstimate`]; query `log_prior`,
//!   `log_likelihood`, and `log_posterior` directly for custom drivers.
//! - For surrogate-coupled runs, build a
//!   [`surrogate::GpSnapshot`] from trained-state arrays (or receive one
//!   from a training pipeline) and attach it before evaluation.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner
//!   modules; `tests/integration_map_pipeline.rs` exercises both evaluator
//!   variants end-to-end.

pub mod calibration;
pub mod optimization;
pub mod surrogate;
pub mod transforms;

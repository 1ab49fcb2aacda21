//! surrogate — pre-fit Gaussian-process state and marginal likelihoods.
//!
//! Purpose
//! -------
//! Represent everything a calibration run consumes from a surrogate model:
//! a validated covariance [`kernel::Kernel`] from a closed family
//! enumeration, an immutable [`snapshot::GpSnapshot`] of trained state, and
//! the heteroscedastic log marginal likelihood used to score candidate
//! parameters against an augmented training set.
//!
//! Key behaviors
//! -------------
//! - Kernel families are a closed enum with `FromStr`; unknown names fail
//!   at construction, never at first use.
//! - Snapshots are deep-copied wholesale on attachment and never mutated;
//!   augmented likelihood evaluations build per-call covariance copies.
//! - Hyperparameters are fixed inputs here — training and hyperparameter
//!   optimization belong to whatever produced the snapshot.
//!
//! Downstream usage
//! ----------------
//! - `calibration::gp_map` attaches a snapshot, augments its training set
//!   with observation rows, and calls
//!   [`regression::log_marginal_likelihood`] per candidate.
//! - The snapshot's [`snapshot::GpSnapshot::training_range`] drives the MAP
//!   optimizer's anti-extrapolation bounds.
//!
//! Testing notes
//! -------------
//! - Unit tests cover closed-form marginals, channel additivity, shape
//!   validation, the singular-covariance error path, and predictive
//!   interpolation at training points.

pub mod errors;
pub mod kernel;
pub mod regression;
pub mod snapshot;

pub use self::errors::{SurrogateError, SurrogateResult};
pub use self::kernel::{Kernel, KernelFamily};
pub use self::regression::log_marginal_likelihood;
pub use self::snapshot::{GpSnapshot, Prediction};

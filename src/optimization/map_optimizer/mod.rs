//! map_optimizer — bounded, derivative-free posterior maximization.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **maximizing
//! log-posteriors** `ln p(θ|y)` over a bounded box. Callers implement a
//! single trait, [`LogPosterior`], and invoke [`maximize_posterior`] to run
//! a particle-swarm global search with a configurable swarm size and
//! iteration cap.
//!
//! Key behaviors
//! -------------
//! - Convert user-supplied log-posteriors into Argmin-compatible cost
//!   functions `c(θ) = -ln p(θ|y)` via [`adapter::ArgMinAdapter`].
//! - Expose a single, user-facing entrypoint [`maximize_posterior`] that:
//!   - runs the objective's pre-flight hook,
//!   - executes the bounded swarm via [`run::run_swarm`], and
//!   - normalizes results into a [`MapOutcome`].
//! - Centralize configuration ([`MapOptions`], [`SearchBounds`]) and
//!   validation logic ([`validation`]) so downstream code can assume sane,
//!   finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** a log-posterior by minimizing a
//!   cost `c(θ) = -ln p(θ|y)`; user code implements the log-posterior,
//!   **never** the cost directly.
//! - [`LogPosterior::value`] must treat invalid inputs as recoverable
//!   [`crate::optimization::errors::OptError`] values, not panics; any such
//!   error aborts the whole run (evaluation failures are fatal, never
//!   resampled).
//! - A `-∞` log-posterior is a legal zero-density value, not an error.
//! - The search is derivative-free; no gradient surface exists anywhere in
//!   this layer.
//!
//! Conventions
//! -----------
//! - Parameters live in whichever coordinate space the calling evaluator
//!   works in, as [`Theta`] (`Array1<f64>`); bounds are expressed in the
//!   same space.
//! - Errors bubble up as `OptResult<T>` / `OptError`; this module and its
//!   children never intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - Posterior evaluators implement [`LogPosterior`] for an internal
//!   objective view, then call [`maximize_posterior`] with:
//!   - validated [`SearchBounds`] from their bounds policy, and
//!   - a [`MapOptions`] configuration.
//! - Higher-level code interacts only with the re-exported surface:
//!   [`maximize_posterior`], [`LogPosterior`], [`MapOptions`],
//!   [`SearchBounds`], [`MapOutcome`], plus numeric aliases from
//!   [`types`].
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover sign conventions and finiteness policy
//!   in [`adapter`], bounds/options/outcome validation in [`validation`]
//!   and [`traits`], and end-to-end swarm behavior on toy posteriors in
//!   [`api`].
//! - Integration tests exercise [`maximize_posterior`] implicitly through
//!   the calibration evaluators' `opt` methods.

pub mod adapter;
pub mod api;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize_posterior;
pub use self::traits::{LogPosterior, MapOptions, MapOutcome, SearchBounds};
pub use self::types::{Cost, FnEvalMap, Theta, DEFAULT_MAX_ITERS, DEFAULT_PARTICLES};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_calibration::optimization::map_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize_posterior;
    pub use super::traits::{LogPosterior, MapOptions, MapOutcome, SearchBounds};
    pub use super::types::{Cost, Theta};
}

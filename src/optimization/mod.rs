//! optimization — bounded global MAP search and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for posterior maximization,
//! combining an Argmin-backed bounded particle swarm and a single
//! error/result surface. Callers implement a log-posterior, choose a swarm
//! configuration, and obtain a point estimate and diagnostics without
//! touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-posteriors** over a
//!   bounded box (`map_optimizer`), including swarm configuration and the
//!   normalized outcome type.
//! - Normalize configuration issues, numerical failures, and backend
//!   solver errors into a single enum (`errors::OptError`) with a common
//!   result alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - The search region is an explicit, validated box; evaluators choose it
//!   to keep the swarm inside meaningful prior support or inside a
//!   surrogate's trained data range.
//! - Objective implementations treat domain violations as recoverable
//!   errors surfaced through the optimization layer, never as panics; any
//!   evaluation error is fatal to the run.
//!
//! Conventions
//! -----------
//! - All solvers conceptually maximize a log-posterior by minimizing an
//!   internal cost `c(θ) = -ln p(θ|y)`; user-facing APIs and outcomes are
//!   expressed in terms of the log-posterior.
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - This module and its submodules avoid I/O; the optional `obs_slog`
//!   observer feature is the only progress-reporting surface.
//!
//! Downstream usage
//! ----------------
//! - Calibration evaluators implement `LogPosterior` for internal objective
//!   views and call `maximize_posterior` with their bounds policy and a
//!   `MapOptions` to obtain a `MapOutcome`.
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns: adapter sign
//!   and finiteness policy, bounds/options validation, and swarm behavior
//!   on toy posteriors.
//! - Integration tests exercise end-to-end MAP workflows through the
//!   calibration layer.

pub mod errors;
pub mod map_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_calibration::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::map_optimizer::prelude::*;
}

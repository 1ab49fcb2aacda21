//! map_optimizer::types — shared numeric aliases and swarm defaults.
//!
//! Purpose
//! -------
//! Centralize the core numeric types used by the MAP optimizer so the rest
//! of the optimization code stays agnostic to `ndarray` and Argmin
//! generics. The concrete particle-swarm solver is constructed inside
//! [`super::run`]; only its parameter/cost shapes are fixed here.
//!
//! Conventions
//! -----------
//! - `Theta` is the candidate model-parameter vector in whichever
//!   coordinate space the calling evaluator works in (natural for the
//!   direct variant, converted for the surrogate-coupled one).
//! - `Cost` is a scalar `f64`; higher layers own the sign convention
//!   between cost and log-posterior.
use ndarray::Array1;
use std::collections::HashMap;

/// Candidate parameter vector for posterior maximization.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical parameter type
/// throughout the optimizer.
pub type Theta = Array1<f64>;

/// Scalar objective value used by the optimizer.
///
/// In this crate, this is the cost `c(θ) = -ln p(θ | y)` derived from a
/// log-posterior.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default swarm size for bounded global search.
pub const DEFAULT_PARTICLES: usize = 40;

/// Default iteration cap for the swarm.
pub const DEFAULT_MAX_ITERS: u64 = 300;

//! High-level entry point for maximizing a user-provided `LogPosterior`.
//!
//! This runs the user's pre-flight `check`, wraps the objective in an
//! `ArgMinAdapter` (which *minimizes* `-ln p(θ|y)`), and delegates the
//! bounded global search to `run_swarm`.
use crate::optimization::{
    errors::OptResult,
    map_optimizer::{
        adapter::ArgMinAdapter,
        run::run_swarm,
        traits::{LogPosterior, MapOptions, MapOutcome, SearchBounds},
    },
};

/// Maximize a log-posterior over a bounded box with a particle swarm.
///
/// # Behavior
/// - Runs the objective's pre-flight hook via `f.check()`.
/// - Wraps `f` in an `ArgMinAdapter` that exposes a *minimization* problem
///   `c(θ) = -ln p(θ|y)` to `argmin`.
/// - Calls `run_swarm`, which configures the executor (swarm size,
///   iteration cap, optional observers) and returns a [`MapOutcome`].
///
/// # Parameters
/// - `f`: Your posterior evaluator implementing [`LogPosterior`].
/// - `bounds`: Validated box constraints for the search.
/// - `opts`: Optimizer options (swarm size, iteration cap, verbosity).
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates runtime errors from `run_swarm` (objective failures are
///   fatal to the run; there is no resampling).
///
/// # Returns
/// A [`MapOutcome`] containing `theta_hat`, the best log-posterior value,
/// termination status, iteration count, and function evaluation counts.
pub fn maximize_posterior<F: LogPosterior>(
    f: &F, bounds: &SearchBounds, opts: &MapOptions,
) -> OptResult<MapOutcome> {
    f.check()?;
    let problem = ArgMinAdapter::new(f);
    run_swarm(bounds, opts, problem)
}

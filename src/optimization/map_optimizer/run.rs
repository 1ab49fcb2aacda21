//! Execution helper that runs the bounded particle swarm on a posterior
//! problem and returns a crate-friendly [`MapOutcome`].
use crate::optimization::{
    errors::OptResult,
    map_optimizer::{
        adapter::ArgMinAdapter,
        traits::{LogPosterior, MapOptions, MapOutcome, SearchBounds},
    },
};
use argmin::core::{Executor, State};
use argmin::solver::particleswarm::ParticleSwarm;

/// Run a bounded particle-swarm optimization for a posterior problem.
///
/// This is the shared runner behind `maximize_posterior`. It wires up:
/// - the user objective via [`ArgMinAdapter`],
/// - a `ParticleSwarm` solver over the validated `bounds`,
/// - the iteration cap from `opts`,
/// - optional observers (behind the `obs_slog` feature),
///   then executes the solver and converts the result into [`MapOutcome`].
///
/// # Arguments
/// - `bounds`: validated box constraints; particles are initialized inside
///   and confined to this region.
/// - `opts`: optimizer options (swarm size, iteration cap, verbosity).
/// - `problem`: an [`ArgMinAdapter`] wrapping the user's objective.
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a
/// terminal slog observer is attached with `ObserverMode::Always`.
///
/// # Returns
/// A [`MapOutcome`] containing the best parameter found, the best
/// log-posterior value, termination status, iteration count, and
/// function-evaluation counts.
///
/// # Errors
/// - Propagates any `argmin` runtime error (observer failures, solver
///   errors, objective failures) via the crate's
///   `From<argmin::core::Error>` conversion.
/// - Propagates any validation errors encountered when constructing
///   [`MapOutcome`].
pub fn run_swarm<'a, F>(
    bounds: &SearchBounds, opts: &MapOptions, problem: ArgMinAdapter<'a, F>,
) -> OptResult<MapOutcome>
where
    F: LogPosterior,
{
    let solver = ParticleSwarm::new((bounds.lower.clone(), bounds.upper.clone()), opts.particles);
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.max_iters(opts.max_iters));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let result = optimizer.run()?;
    let state = result.state();
    let iterations = state.get_iter();
    let function_counts = state.get_func_counts().clone();
    let termination = state.get_termination_status().clone();
    let best = state.get_best_param().map(|particle| particle.position.clone());
    MapOutcome::new(best, -state.get_best_cost(), termination, iterations, function_counts)
}

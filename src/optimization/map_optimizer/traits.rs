//! Public API surface for MAP (posterior) maximization.
//!
//! - [`LogPosterior`]: trait posterior evaluators implement.
//! - [`SearchBounds`]: validated box constraints for the global search.
//! - [`MapOptions`]: configuration for the bounded swarm.
//! - [`MapOutcome`]: normalized result returned by the high-level
//!   `maximize_posterior` API.
//!
//! Convention: we *maximize* a log-posterior `ln p(θ|y)` by minimizing the
//! cost `c(θ) = -ln p(θ|y)`. A log-posterior of `-∞` (zero prior density) is
//! a legal value and maps to an infinite cost; `NaN` and `+∞` are rejected
//! by the adapter.
use crate::optimization::{
    errors::{OptError, OptResult},
    map_optimizer::{
        types::{Cost, FnEvalMap, Theta, DEFAULT_MAX_ITERS, DEFAULT_PARTICLES},
        validation::{
            validate_bounds, validate_theta_hat, validate_value, verify_max_iters,
            verify_particles,
        },
    },
};
use argmin::core::TerminationStatus;

/// User-implemented log-posterior interface.
///
/// You maximize `ln p(θ|y)`; internally we minimize the cost
/// `c(θ) = -ln p(θ|y)`.
///
/// Required:
/// - `value(&Theta) -> OptResult<Cost>`: evaluate the log-posterior.
///   - Errors: return a descriptive `OptError` for evaluation failures;
///     these abort the whole run (no resampling).
///
/// Optional:
/// - `check() -> OptResult<()>`: pre-flight hook run once before
///   optimization, for rejecting unusable evaluator state (e.g. missing
///   observations) before the swarm starts spending evaluations.
pub trait LogPosterior {
    // Required methods
    fn value(&self, theta: &Theta) -> OptResult<Cost>;

    // Optional methods
    fn check(&self) -> OptResult<()> {
        Ok(())
    }
}

/// Validated box constraints for the bounded global search.
///
/// - `lower` / `upper`: per-dimension bounds in the coordinate space the
///   objective is evaluated in.
///
/// Both vectors are validated at construction: equal, non-zero length,
/// finite entries, and `lower < upper` per dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBounds {
    pub lower: Theta,
    pub upper: Theta,
}

impl SearchBounds {
    /// Construct validated search bounds.
    ///
    /// # Errors
    /// - [`OptError::EmptyBounds`] / [`OptError::BoundsDimMismatch`] /
    ///   [`OptError::InvalidBound`] per [`validate_bounds`].
    pub fn new(lower: Theta, upper: Theta) -> OptResult<Self> {
        validate_bounds(&lower, &upper)?;
        Ok(Self { lower, upper })
    }

    /// Number of bounded dimensions.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// True if no dimensions are bounded (unreachable for validated bounds).
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// True if `theta` lies within the box (inclusive).
    pub fn contains(&self, theta: &Theta) -> bool {
        theta.len() == self.len()
            && theta
                .iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .all(|(&t, (&lo, &hi))| t >= lo && t <= hi)
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `particles: usize` — swarm size for the bounded global search.
/// - `max_iters: u64` — hard cap on swarm iterations.
/// - `verbose: bool` — if `true`, attaches an observer (behind the
///   `obs_slog` feature) and prints progress.
///
/// Default:
/// - `particles`: [`DEFAULT_PARTICLES`]
/// - `max_iters`: [`DEFAULT_MAX_ITERS`]
/// - `verbose`: `false`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    pub particles: usize,
    pub max_iters: u64,
    pub verbose: bool,
}

impl MapOptions {
    /// Create a validated set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidParticleCount`] for fewer than two particles.
    /// - [`OptError::InvalidMaxIters`] for a zero iteration cap.
    pub fn new(particles: usize, max_iters: u64, verbose: bool) -> OptResult<Self> {
        verify_particles(particles)?;
        verify_max_iters(max_iters)?;
        Ok(Self { particles, max_iters, verbose })
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self { particles: DEFAULT_PARTICLES, max_iters: DEFAULT_MAX_ITERS, verbose: false }
    }
}

/// Canonical result returned by `maximize_posterior`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-posterior** value (not the cost).
/// - `converged`: `true` if the solver reported a terminating status other
///   than `NotTerminated`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of swarm iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl MapOutcome {
    /// Build a validated [`MapOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, converged: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let status: String;
        let converged = match converged {
            TerminationStatus::NotTerminated => {
                status = "Not terminated".to_string();
                false
            }
            _ => {
                status = format!("{converged:?}");
                true
            }
        };
        let iterations = iterations as usize;
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals })
    }
}

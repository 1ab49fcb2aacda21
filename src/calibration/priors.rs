//! Prior distributions over calibration inputs.
//!
//! Purpose
//! -------
//! Represent the ordered per-dimension prior set used by both posterior
//! evaluator variants: log-density sums over the model-parameter
//! dimensions in natural space, and the change-of-variables variant for
//! evaluators working in a transformed coordinate space.
//!
//! Key behaviors
//! -------------
//! - [`UnivariatePrior`] is the distribution seam: log-density plus a
//!   central-probability-mass interval query. Any statrs distribution
//!   implementing `Continuous` and `ContinuousCDF` satisfies it for free.
//! - [`PriorSet::new`] accepts model-dimension-only prior lists and pads
//!   the experimental dimensions with standard-normal placeholders, or a
//!   full-length list; anything else is a configuration error naming the
//!   expected lengths.
//! - [`PriorSet::log_prior`] is the exact sum of per-dimension
//!   log-densities; a zero-density coordinate contributes `-∞` and
//!   propagates through the sum without raising.
//! - [`PriorSet::log_prior_transformed`] evaluates each prior at the
//!   reverted coordinate and adds `ln|d(revert)/dx|`, accumulated over all
//!   model dimensions.
//!
//! Invariants & assumptions
//! ------------------------
//! - The stored list always has length `nx_exp + nx_model` after
//!   construction.
//! - Placeholder priors on experimental dimensions are never consulted by
//!   the likelihood; they exist so indexing by absolute dimension stays
//!   uniform.
//!
//! Conventions
//! -----------
//! - Candidate vectors passed to the log-prior methods cover the model
//!   dimensions only (length `nx_model`); the experimental block is fixed
//!   per observation and carries no prior mass in the posterior.
use crate::calibration::errors::{CalibError, CalibResult};
use crate::transforms::{revert_derivative, ConRev};
use ndarray::Array1;
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Univariate prior distribution over one input dimension.
///
/// - `log_density(x)`: natural-log density at `x`; `-∞` outside support.
/// - `central_interval(mass)`: interval containing the central `mass`
///   probability, via the inverse CDF at the symmetric tail quantiles.
pub trait UnivariatePrior {
    fn log_density(&self, x: f64) -> f64;
    fn central_interval(&self, mass: f64) -> (f64, f64);
}

impl<D> UnivariatePrior for D
where
    D: Continuous<f64, f64> + ContinuousCDF<f64, f64>,
{
    fn log_density(&self, x: f64) -> f64 {
        self.ln_pdf(x)
    }

    fn central_interval(&self, mass: f64) -> (f64, f64) {
        let tail = 0.5 * (1.0 - mass);
        (self.inverse_cdf(tail), self.inverse_cdf(1.0 - tail))
    }
}

/// Ordered per-dimension prior collection.
///
/// One prior per input dimension: the leading `nx_exp` entries cover the
/// experimental dimensions (standard-normal placeholders when the user
/// supplies model priors only) and the trailing `nx_model` entries cover
/// the calibratable parameters.
pub struct PriorSet {
    nx_exp: usize,
    nx_model: usize,
    priors: Vec<Box<dyn UnivariatePrior>>,
}

impl PriorSet {
    /// Construct a validated prior set.
    ///
    /// Accepts a list of length `nx_model` (front-padded with standard
    /// normals for the experimental dimensions) or of full length
    /// `nx_exp + nx_model`.
    ///
    /// # Errors
    /// Returns [`CalibError::PriorLengthMismatch`] for any other length,
    /// naming both accepted lengths.
    pub fn new(
        nx_exp: usize, nx_model: usize, mut priors: Vec<Box<dyn UnivariatePrior>>,
    ) -> CalibResult<Self> {
        if priors.len() == nx_model {
            for _ in 0..nx_exp {
                priors.insert(0, Box::new(standard_normal()));
            }
        } else if priors.len() != nx_exp + nx_model {
            return Err(CalibError::PriorLengthMismatch {
                expected_model: nx_model,
                expected_full: nx_exp + nx_model,
                found: priors.len(),
            });
        }
        Ok(Self { nx_exp, nx_model, priors })
    }

    /// Total number of priors (`nx_exp + nx_model`).
    pub fn len(&self) -> usize {
        self.priors.len()
    }

    /// True if the set is empty (only possible for `nx_exp = nx_model = 0`,
    /// which constructors reject upstream).
    pub fn is_empty(&self) -> bool {
        self.priors.is_empty()
    }

    /// Prior over model dimension `i` (0-based within the model block).
    pub fn model_prior(&self, i: usize) -> &dyn UnivariatePrior {
        self.priors[self.nx_exp + i].as_ref()
    }

    /// Central-probability interval of model dimension `i` at `mass`.
    pub fn model_interval(&self, i: usize, mass: f64) -> (f64, f64) {
        self.model_prior(i).central_interval(mass)
    }

    /// Natural-space log-prior over the model dimensions.
    ///
    /// Exact sum of per-dimension log-densities at the candidate
    /// coordinates; `-∞` contributions propagate through the sum.
    ///
    /// # Errors
    /// Returns [`CalibError::CandidateLengthMismatch`] if `x` does not have
    /// length `nx_model`.
    pub fn log_prior(&self, x: &Array1<f64>) -> CalibResult<f64> {
        if x.len() != self.nx_model {
            return Err(CalibError::CandidateLengthMismatch {
                expected: self.nx_model,
                found: x.len(),
            });
        }
        let mut logp = 0.0;
        for i in 0..self.nx_model {
            logp += self.model_prior(i).log_density(x[i]);
        }
        Ok(logp)
    }

    /// Transformed-space log-prior over the model dimensions.
    ///
    /// Each prior is evaluated at the reverted (inverse-transformed)
    /// coordinate, plus the change-of-variables correction
    /// `ln|d(revert)/dx|` from a fixed-step central difference. All
    /// `nx_model` contributions are accumulated.
    ///
    /// # Errors
    /// Returns [`CalibError::CandidateLengthMismatch`] if `x` does not have
    /// length `nx_model`. `xconrevs` must have full length
    /// `nx_exp + nx_model`; evaluator constructors validate this.
    pub fn log_prior_transformed(
        &self, x: &Array1<f64>, xconrevs: &[Box<dyn ConRev>],
    ) -> CalibResult<f64> {
        if x.len() != self.nx_model {
            return Err(CalibError::CandidateLengthMismatch {
                expected: self.nx_model,
                found: x.len(),
            });
        }
        let mut logp = 0.0;
        for i in 0..self.nx_model {
            let conrev = xconrevs[self.nx_exp + i].as_ref();
            let natural = conrev.revert(x[i]);
            let jacobian = revert_derivative(conrev, x[i]).abs();
            logp += jacobian.ln() + self.model_prior(i).log_density(natural);
        }
        Ok(logp)
    }
}

impl std::fmt::Debug for PriorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorSet")
            .field("nx_exp", &self.nx_exp)
            .field("nx_model", &self.nx_model)
            .field("len", &self.priors.len())
            .finish()
    }
}

// Infallible for these constants.
fn standard_normal() -> Normal {
    Normal::new(0.0, 1.0).unwrap()
}

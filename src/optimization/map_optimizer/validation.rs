//! Validation helpers for MAP optimization.
//!
//! This module centralizes the consistency checks used across the
//! optimizer interface:
//!
//! - **Bounds checks**: [`validate_bounds`] enforces non-empty, equal-length
//!   bound vectors with finite entries and `lower < upper` per dimension.
//! - **Option checks**: [`verify_particles`], [`verify_max_iters`] ensure
//!   the swarm configuration is usable before a run starts.
//! - **Outcome checks**: [`validate_theta_hat`] and [`validate_value`]
//!   guard the best parameter vector and objective value reported by the
//!   solver.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`OptError`] variants, making higher-level code more uniform and easier
//! to debug.
use crate::optimization::{
    errors::{OptError, OptResult},
    map_optimizer::types::Theta,
};

/// Validate a pair of bound vectors for bounded global search.
///
/// Checks:
/// - at least one dimension,
/// - equal lengths,
/// - every entry finite,
/// - `lower[i] < upper[i]` for all `i`.
///
/// # Errors
/// - [`OptError::EmptyBounds`] for zero dimensions.
/// - [`OptError::BoundsDimMismatch`] for unequal lengths.
/// - [`OptError::InvalidBound`] with the index and offending pair for
///   non-finite or inverted bounds.
pub fn validate_bounds(lower: &Theta, upper: &Theta) -> OptResult<()> {
    if lower.is_empty() && upper.is_empty() {
        return Err(OptError::EmptyBounds);
    }
    if lower.len() != upper.len() {
        return Err(OptError::BoundsDimMismatch { lower: lower.len(), upper: upper.len() });
    }
    for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(OptError::InvalidBound {
                index,
                lower: lo,
                upper: hi,
                reason: "Bounds must be finite.",
            });
        }
        if lo >= hi {
            return Err(OptError::InvalidBound {
                index,
                lower: lo,
                upper: hi,
                reason: "Lower bound must be strictly below upper bound.",
            });
        }
    }
    Ok(())
}

/// Validate the swarm size.
///
/// # Errors
/// Returns [`OptError::InvalidParticleCount`] for fewer than two particles;
/// a swarm needs at least one neighbor to exchange information with.
pub fn verify_particles(count: usize) -> OptResult<()> {
    if count < 2 {
        return Err(OptError::InvalidParticleCount {
            count,
            reason: "Swarm size must be at least two particles.",
        });
    }
    Ok(())
}

/// Validate the iteration cap.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIters`] for a zero cap.
pub fn verify_max_iters(max_iters: u64) -> OptResult<()> {
    if max_iters == 0 {
        return Err(OptError::InvalidMaxIters {
            max_iters,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// Accepts only a present vector with all **finite** entries.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that the best log-posterior value is finite.
///
/// Negative values are fine as long as they are finite; a non-finite best
/// value means the swarm never found a point of positive posterior density.
///
/// # Errors
/// Returns [`OptError::NonFiniteValue`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteValue { value });
    }
    Ok(())
}

//! Per-dimension coordinate transforms (convert/revert pairs).
//!
//! Purpose
//! -------
//! Define the [`ConRev`] seam between "natural" coordinates (where priors
//! and observations live) and "converted" coordinates (where a surrogate
//! model trains and predicts), plus the standard scalar transforms used to
//! normalize or stabilize surrogate training.
//!
//! Key behaviors
//! -------------
//! - [`ConRev::convert`] maps natural → converted space; [`ConRev::revert`]
//!   is its inverse.
//! - [`Identity`], [`Affine`], and [`Log`] cover the common cases: no-op,
//!   linear rescaling, and strictly-positive data compressed onto ℝ.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every transform is invertible on its documented domain:
//!   `revert(convert(x)) == x` up to floating-point rounding.
//! - Inputs outside a transform's domain (e.g. `x <= 0` for [`Log`])
//!   produce non-finite outputs rather than panicking; downstream density
//!   and cost validation surfaces these as evaluation errors.
//!
//! Conventions
//! -----------
//! - Transforms are scalar and applied per dimension; vector-valued data is
//!   transformed column-by-column by the observation store.
//! - Trait objects (`Box<dyn ConRev>`) are the unit of configuration, one
//!   per input or output dimension.
use crate::transforms::errors::{TransformError, TransformResult};

/// Invertible scalar coordinate transform.
///
/// `convert` maps a natural-space value into the converted (model-internal)
/// space; `revert` maps back. Implementations must be mutually inverse on
/// their domain.
pub trait ConRev {
    fn convert(&self, x: f64) -> f64;
    fn revert(&self, x: f64) -> f64;
}

/// No-op transform: converted space equals natural space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity;

impl ConRev for Identity {
    fn convert(&self, x: f64) -> f64 {
        x
    }

    fn revert(&self, x: f64) -> f64 {
        x
    }
}

/// Linear rescaling `x ↦ scale * x + shift`.
///
/// The scale must be finite and non-zero so the map stays invertible;
/// both are validated at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    scale: f64,
    shift: f64,
}

impl Affine {
    /// Construct a validated affine transform.
    ///
    /// # Errors
    /// - [`TransformError::InvalidScale`] if `scale` is non-finite or zero.
    /// - [`TransformError::InvalidShift`] if `shift` is non-finite.
    pub fn new(scale: f64, shift: f64) -> TransformResult<Self> {
        if !scale.is_finite() {
            return Err(TransformError::InvalidScale { value: scale, reason: "Scale must be finite." });
        }
        if scale == 0.0 {
            return Err(TransformError::InvalidScale {
                value: scale,
                reason: "Scale must be non-zero.",
            });
        }
        if !shift.is_finite() {
            return Err(TransformError::InvalidShift { value: shift });
        }
        Ok(Self { scale, shift })
    }
}

impl ConRev for Affine {
    fn convert(&self, x: f64) -> f64 {
        self.scale * x + self.shift
    }

    fn revert(&self, x: f64) -> f64 {
        (x - self.shift) / self.scale
    }
}

/// Natural-logarithm transform for strictly positive data.
///
/// `convert(x) = ln(x)` maps `(0, ∞) → ℝ`; `revert(x) = exp(x)`. Calling
/// `convert` on a non-positive value yields `NaN`/`-∞`, which downstream
/// validation rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Log;

impl ConRev for Log {
    fn convert(&self, x: f64) -> f64 {
        x.ln()
    }

    fn revert(&self, x: f64) -> f64 {
        x.exp()
    }
}

//! transforms — invertible per-dimension coordinate maps and their Jacobians.
//!
//! Purpose
//! -------
//! Provide the convert/revert seam between natural coordinates and the
//! converted space a surrogate model operates in, together with the
//! numerical inverse-map derivative needed for change-of-variables
//! corrections in transformed log-densities.
//!
//! Key behaviors
//! -------------
//! - [`conrev::ConRev`] defines the invertible scalar transform contract;
//!   [`conrev::Identity`], [`conrev::Affine`], and [`conrev::Log`] are the
//!   provided implementations.
//! - [`jacobian::revert_derivative`] approximates `d(revert)/dx` by a
//!   central difference with the fixed step [`jacobian::JACOBIAN_STEP`].
//! - [`errors::TransformError`] reports invalid transform parameters at
//!   construction time.
//!
//! Downstream usage
//! ----------------
//! - The calibration layer applies transforms column-wise when mirroring
//!   observations into converted space and per-dimension when reverting an
//!   optimizer result to natural coordinates.
//! - The prior layer combines `revert` and `revert_derivative` to evaluate
//!   transformed log-priors.

pub mod conrev;
pub mod errors;
pub mod jacobian;

pub use self::conrev::{Affine, ConRev, Identity, Log};
pub use self::errors::{TransformError, TransformResult};
pub use self::jacobian::{revert_derivative, JACOBIAN_STEP};

//! Immutable snapshot of a pre-fit Gaussian-process surrogate.
//!
//! Purpose
//! -------
//! Hold the trained state a calibration run needs from a surrogate model —
//! converted-space training inputs/outputs, per-row noise variances, and
//! fixed kernel hyperparameters — as a single value type. Attachment
//! deep-copies the snapshot wholesale, so the evaluator and the original
//! surrogate can never alias each other's state.
//!
//! Key behaviors
//! -------------
//! - [`GpSnapshot::new`] validates the training arrays once; downstream
//!   code assumes the invariants and re-validates nothing.
//! - [`GpSnapshot::predict`] returns the predictive mean/variance per
//!   output channel at a converted-space query point.
//! - [`GpSnapshot::training_range`] exposes the per-dimension min/max of
//!   the training inputs, which the MAP optimizer uses as search bounds to
//!   avoid extrapolating outside the trained region.
//!
//! Invariants & assumptions
//! ------------------------
//! - `xc` is `(n, nx)` with `nx == kernel.input_dim()`, `yc` is `(n, ny)`,
//!   `noise_var` matches `yc`, all entries finite, `n >= 1`.
//! - The snapshot is immutable after construction; likelihood evaluation
//!   that augments the training set works on per-call copies.
//!
//! Conventions
//! -----------
//! - All stored data lives in the surrogate's converted coordinate space;
//!   mapping to and from natural space is the calibration layer's job.
use crate::surrogate::errors::{SurrogateError, SurrogateResult};
use crate::surrogate::kernel::Kernel;
use crate::surrogate::regression::validate_training_set;
use nalgebra::DVector;
use ndarray::{Array1, Array2, ArrayView1};

/// Predictive mean and variance per output channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub mean: Array1<f64>,
    pub variance: Array1<f64>,
}

/// Pre-fit surrogate state: kernel hyperparameters plus training data.
///
/// Cloning this type is the sanctioned deep copy; there is no partial or
/// field-by-field extraction surface.
#[derive(Debug, Clone, PartialEq)]
pub struct GpSnapshot {
    kernel: Kernel,
    xc: Array2<f64>,
    yc: Array2<f64>,
    noise_var: Array2<f64>,
}

impl GpSnapshot {
    /// Construct a validated snapshot from trained-state arrays.
    ///
    /// `noise_var` may be `None` for a noiseless surrogate, in which case a
    /// machine-epsilon floor is installed so covariance factorization and
    /// log-density evaluation stay non-degenerate.
    ///
    /// # Errors
    /// Propagates the shape/value errors of the shared training-set
    /// validation (see [`crate::surrogate::regression`]).
    pub fn new(
        kernel: Kernel, xc: Array2<f64>, yc: Array2<f64>, noise_var: Option<Array2<f64>>,
    ) -> SurrogateResult<Self> {
        let noise_var = noise_var.unwrap_or_else(|| Array2::from_elem(yc.dim(), f64::EPSILON));
        validate_training_set(&kernel, &xc, &yc, &noise_var)?;
        Ok(Self { kernel, xc, yc, noise_var })
    }

    /// Kernel with the fixed, trained hyperparameters.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Number of input dimensions.
    pub fn nx(&self) -> usize {
        self.xc.ncols()
    }

    /// Number of output channels.
    pub fn ny(&self) -> usize {
        self.yc.ncols()
    }

    /// Number of training rows.
    pub fn n_train(&self) -> usize {
        self.xc.nrows()
    }

    /// Converted-space training inputs, `(n, nx)`.
    pub fn training_inputs(&self) -> &Array2<f64> {
        &self.xc
    }

    /// Converted-space training outputs, `(n, ny)`.
    pub fn training_outputs(&self) -> &Array2<f64> {
        &self.yc
    }

    /// Per-row, per-channel noise variances, same shape as the outputs.
    pub fn noise_variances(&self) -> &Array2<f64> {
        &self.noise_var
    }

    /// Min/max of the training inputs along dimension `dim`.
    ///
    /// # Panics
    /// Never panics for `dim < nx`; callers index within the validated
    /// input dimension.
    pub fn training_range(&self, dim: usize) -> (f64, f64) {
        let col = self.xc.column(dim);
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in col.iter() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        (lo, hi)
    }

    /// Predictive mean and variance at a converted-space query point.
    ///
    /// Each channel is conditioned on the shared kernel with its own noise
    /// diagonal; the reported variance is the latent predictive variance
    /// `k(x*, x*) - k*ᵀ (K + diag(noise_j))⁻¹ k*`.
    ///
    /// # Errors
    /// - [`SurrogateError::InputDimMismatch`] if `query.len() != nx`.
    /// - [`SurrogateError::NotPositiveDefinite`] if a channel's covariance
    ///   cannot be factorized.
    pub fn predict(&self, query: ArrayView1<'_, f64>) -> SurrogateResult<Prediction> {
        let n = self.n_train();
        let ny = self.ny();
        let base = self.kernel.covariance(&self.xc)?;
        let k_star = self.kernel.cross_covariance(&self.xc, query)?;
        let k_ss = self.kernel.variance();

        let mut mean = Array1::zeros(ny);
        let mut variance = Array1::zeros(ny);
        for j in 0..ny {
            let mut k = base.clone();
            for i in 0..n {
                k[(i, i)] += self.noise_var[(i, j)];
            }
            let chol = k.cholesky().ok_or(SurrogateError::NotPositiveDefinite { dim: n })?;
            let y_j = DVector::from_iterator(n, self.yc.column(j).iter().copied());
            let alpha = chol.solve(&y_j);
            let v = chol.solve(&k_star);
            mean[j] = k_star.dot(&alpha);
            variance[j] = (k_ss - k_star.dot(&v)).max(0.0);
        }
        Ok(Prediction { mean, variance })
    }
}

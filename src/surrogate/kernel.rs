//! Covariance kernels for the Gaussian-process surrogate.
//!
//! Purpose
//! -------
//! Provide a closed enumeration of stationary covariance families and a
//! validated [`Kernel`] value (family + signal variance + ARD lengthscales)
//! used by the snapshot and the heteroscedastic marginal likelihood.
//!
//! Key behaviors
//! -------------
//! - [`KernelFamily`] parses case-insensitive family names and rejects
//!   unknown ones at construction time, so a bad configuration fails before
//!   any likelihood evaluation.
//! - [`Kernel::evaluate`] computes `k(a, b)` from the ARD-scaled Euclidean
//!   distance; [`Kernel::covariance`] and [`Kernel::cross_covariance`]
//!   assemble the dense matrices consumed by the Cholesky solver.
//!
//! Invariants & assumptions
//! ------------------------
//! - Signal variance and every lengthscale are finite and strictly
//!   positive; the lengthscale count equals the input dimension.
//! - All families are stationary: `k(a, a) == variance` exactly.
//!
//! Conventions
//! -----------
//! - The scaled distance is `r = sqrt(Σ ((a_i - b_i) / l_i)^2)`.
//! - Dense covariance output uses `nalgebra` types, since the downstream
//!   factorization does; training inputs arrive as `ndarray` arrays.
use crate::surrogate::errors::{SurrogateError, SurrogateResult};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1};
use std::str::FromStr;

/// Closed set of supported covariance families.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"RBF"`, `"Exponential"`, `"Matern32"`, `"Matern52"`). Unknown names
/// return [`SurrogateError::UnknownKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelFamily {
    Rbf,
    Exponential,
    Matern32,
    Matern52,
}

impl Default for KernelFamily {
    fn default() -> Self {
        KernelFamily::Rbf
    }
}

impl FromStr for KernelFamily {
    type Err = SurrogateError;

    /// Parse a kernel family from a string (case-insensitive).
    ///
    /// Any unrecognized value returns [`SurrogateError::UnknownKernel`] with
    /// the list of valid options.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rbf" => Ok(KernelFamily::Rbf),
            "exponential" => Ok(KernelFamily::Exponential),
            "matern32" => Ok(KernelFamily::Matern32),
            "matern52" => Ok(KernelFamily::Matern52),
            _ => Err(SurrogateError::UnknownKernel {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'RBF', 'Exponential', \
                         'Matern32' or 'Matern52'.",
            }),
        }
    }
}

/// Stationary covariance function with ARD lengthscales.
///
/// Fields are validated once in [`Kernel::new`]; evaluation assumes they
/// hold and performs no further checks on hyperparameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    family: KernelFamily,
    variance: f64,
    lengthscales: Array1<f64>,
}

impl Kernel {
    /// Construct a validated kernel.
    ///
    /// # Errors
    /// - [`SurrogateError::InvalidSignalVariance`] if `variance` is
    ///   non-finite or ≤ 0.
    /// - [`SurrogateError::InvalidLengthscale`] if any lengthscale is
    ///   non-finite or ≤ 0, reporting the first offending index.
    /// - [`SurrogateError::LengthscaleDimMismatch`] if `lengthscales` is
    ///   empty.
    pub fn new(
        family: KernelFamily, variance: f64, lengthscales: Array1<f64>,
    ) -> SurrogateResult<Self> {
        if !variance.is_finite() || variance <= 0.0 {
            return Err(SurrogateError::InvalidSignalVariance { value: variance });
        }
        if lengthscales.is_empty() {
            return Err(SurrogateError::LengthscaleDimMismatch { expected: 1, found: 0 });
        }
        for (index, &value) in lengthscales.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(SurrogateError::InvalidLengthscale { index, value });
            }
        }
        Ok(Self { family, variance, lengthscales })
    }

    /// Covariance family of this kernel.
    pub fn family(&self) -> KernelFamily {
        self.family
    }

    /// Signal variance `σ²`.
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Number of input dimensions (equals the lengthscale count).
    pub fn input_dim(&self) -> usize {
        self.lengthscales.len()
    }

    /// Evaluate `k(a, b)` for two input points.
    ///
    /// Both points must have length [`Kernel::input_dim`]; this is enforced
    /// by the callers that assemble covariance matrices.
    pub fn evaluate(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        let mut r2 = 0.0;
        for i in 0..self.lengthscales.len() {
            let d = (a[i] - b[i]) / self.lengthscales[i];
            r2 += d * d;
        }
        let r = r2.sqrt();
        match self.family {
            KernelFamily::Rbf => self.variance * (-0.5 * r2).exp(),
            KernelFamily::Exponential => self.variance * (-r).exp(),
            KernelFamily::Matern32 => {
                let s = 3.0_f64.sqrt() * r;
                self.variance * (1.0 + s) * (-s).exp()
            }
            KernelFamily::Matern52 => {
                let s = 5.0_f64.sqrt() * r;
                self.variance * (1.0 + s + 5.0 * r2 / 3.0) * (-s).exp()
            }
        }
    }

    /// Dense symmetric covariance matrix over the rows of `x`.
    ///
    /// # Errors
    /// Returns [`SurrogateError::InputDimMismatch`] if `x` has a different
    /// column count than the kernel's input dimension.
    pub fn covariance(&self, x: &Array2<f64>) -> SurrogateResult<DMatrix<f64>> {
        if x.ncols() != self.input_dim() {
            return Err(SurrogateError::InputDimMismatch {
                expected: self.input_dim(),
                found: x.ncols(),
            });
        }
        let n = x.nrows();
        let mut k = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            for j in 0..=i {
                let v = self.evaluate(x.row(i), x.row(j));
                k[(i, j)] = v;
                k[(j, i)] = v;
            }
        }
        Ok(k)
    }

    /// Covariance vector between a query point and the rows of `x`.
    ///
    /// # Errors
    /// Returns [`SurrogateError::InputDimMismatch`] if the query or `x`
    /// dimension disagrees with the kernel.
    pub fn cross_covariance(
        &self, x: &Array2<f64>, query: ArrayView1<'_, f64>,
    ) -> SurrogateResult<DVector<f64>> {
        if x.ncols() != self.input_dim() {
            return Err(SurrogateError::InputDimMismatch {
                expected: self.input_dim(),
                found: x.ncols(),
            });
        }
        if query.len() != self.input_dim() {
            return Err(SurrogateError::InputDimMismatch {
                expected: self.input_dim(),
                found: query.len(),
            });
        }
        let n = x.nrows();
        let mut k = DVector::<f64>::zeros(n);
        for i in 0..n {
            k[i] = self.evaluate(x.row(i), query);
        }
        Ok(k)
    }
}

//! Observation containers for posterior evaluation.
//!
//! Purpose
//! -------
//! Provide the validated observation store shared by both posterior
//! evaluator variants: observed outputs, per-output noise scales, fixed
//! experimental inputs placed in the leading columns of a combined input
//! matrix, and the transformed mirror the surrogate-coupled evaluator
//! needs.
//!
//! Key behaviors
//! -------------
//! - [`ObservationSet::new`] enforces the shape contract in one pass and
//!   reports the offending argument with its expected shape; the set is
//!   built whole or not at all, so failed validation leaves no partial
//!   state behind.
//! - Default noise, when unspecified, is a machine-epsilon floor rather
//!   than zero, keeping log-density evaluation non-degenerate.
//! - [`ObservationSet::inputs_with`] substitutes a candidate parameter
//!   vector into the trailing columns on a per-call copy, so repeated
//!   likelihood evaluations never mutate shared state and remain
//!   order-independent.
//! - [`TransformedObservations`] mirrors fixed inputs, outputs, and noise
//!   scales through per-dimension forward transforms.
//!
//! Invariants & assumptions
//! ------------------------
//! - `y_obv` and `y_noise` are `(obvs, ny)` with `obvs >= 1`, all finite,
//!   noise strictly positive.
//! - `x_obv` is `(obvs, nx_exp + nx_model)`; the trailing model columns
//!   are placeholders (zeros) until `inputs_with` fills a copy.
//!
//! Conventions
//! -----------
//! - Noise values are standard deviations; consumers needing variances
//!   square them at the point of use.
use crate::calibration::errors::{CalibError, CalibResult};
use crate::transforms::ConRev;
use ndarray::{s, Array1, Array2};

/// Validated experimental observations plus the combined input matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    x_obv: Array2<f64>,
    y_obv: Array2<f64>,
    y_noise: Array2<f64>,
    nx_exp: usize,
}

impl ObservationSet {
    /// Construct a validated observation set.
    ///
    /// Parameters
    /// ----------
    /// - `y`: observed outputs, `(obvs, ny)`.
    /// - `y_noise`: optional per-output noise standard deviations, same
    ///   shape as `y`; defaults to a `f64::EPSILON` floor.
    /// - `x_exp`: fixed experimental inputs, `(obvs, nx_exp)`; required
    ///   unless `nx_exp == 0`.
    /// - `nx_exp`, `nx_model`, `ny`: evaluator dimensions.
    ///
    /// # Errors
    /// - [`CalibError::YColumnMismatch`] / [`CalibError::EmptyObservations`]
    ///   for a malformed `y`.
    /// - [`CalibError::NoiseShapeMismatch`] /
    ///   [`CalibError::NonPositiveNoise`] for a malformed `y_noise`.
    /// - [`CalibError::MissingExpInputs`] /
    ///   [`CalibError::ExpInputShapeMismatch`] for a malformed `x_exp`.
    /// - [`CalibError::NonFiniteObservation`] naming the argument and the
    ///   first offending entry.
    pub fn new(
        y: Array2<f64>, y_noise: Option<Array2<f64>>, x_exp: Option<Array2<f64>>, nx_exp: usize,
        nx_model: usize, ny: usize,
    ) -> CalibResult<Self> {
        if y.ncols() != ny {
            return Err(CalibError::YColumnMismatch { expected: ny, found: y.dim() });
        }
        if y.nrows() == 0 {
            return Err(CalibError::EmptyObservations);
        }
        validate_finite("y", &y)?;
        let obvs = y.nrows();

        let y_noise = match y_noise {
            None => Array2::from_elem((obvs, ny), f64::EPSILON),
            Some(noise) => {
                if noise.dim() != y.dim() {
                    return Err(CalibError::NoiseShapeMismatch {
                        expected: y.dim(),
                        found: noise.dim(),
                    });
                }
                for ((row, col), &value) in noise.indexed_iter() {
                    if !value.is_finite() {
                        return Err(CalibError::NonFiniteObservation {
                            argument: "y_noise",
                            row,
                            col,
                            value,
                        });
                    }
                    if value <= 0.0 {
                        return Err(CalibError::NonPositiveNoise { row, col, value });
                    }
                }
                noise
            }
        };

        let mut x_obv = Array2::zeros((obvs, nx_exp + nx_model));
        match x_exp {
            None => {
                if nx_exp != 0 {
                    return Err(CalibError::MissingExpInputs { nx_exp });
                }
            }
            Some(x_exp) => {
                if x_exp.dim() != (obvs, nx_exp) {
                    return Err(CalibError::ExpInputShapeMismatch {
                        expected: (obvs, nx_exp),
                        found: x_exp.dim(),
                    });
                }
                validate_finite("x_exp", &x_exp)?;
                x_obv.slice_mut(s![.., ..nx_exp]).assign(&x_exp);
            }
        }

        Ok(Self { x_obv, y_obv: y, y_noise, nx_exp })
    }

    /// Number of observation rows.
    pub fn obvs(&self) -> usize {
        self.y_obv.nrows()
    }

    /// Number of output channels.
    pub fn ny(&self) -> usize {
        self.y_obv.ncols()
    }

    /// Observed outputs, `(obvs, ny)`.
    pub fn outputs(&self) -> &Array2<f64> {
        &self.y_obv
    }

    /// Per-output noise standard deviations, `(obvs, ny)`.
    pub fn noise(&self) -> &Array2<f64> {
        &self.y_noise
    }

    /// Combined input matrix with placeholder model columns.
    pub fn inputs(&self) -> &Array2<f64> {
        &self.x_obv
    }

    /// Combined input matrix with the candidate substituted into the
    /// trailing model columns of every row.
    ///
    /// Works on a fresh copy each call; the stored matrix is never
    /// mutated, so evaluations are repeatable and order-independent.
    pub fn inputs_with(&self, candidate: &Array1<f64>) -> Array2<f64> {
        let mut xs = self.x_obv.clone();
        for mut row in xs.rows_mut() {
            row.slice_mut(s![self.nx_exp..]).assign(candidate);
        }
        xs
    }
}

/// Forward-transformed mirror of an observation set.
///
/// Maintained by the surrogate-coupled evaluator: the surrogate's training
/// data and predictive machinery operate in converted coordinates, so the
/// observation batch is mirrored through the same per-dimension transforms
/// once per `set_observations` call.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedObservations {
    pub xc_obv: Array2<f64>,
    pub yc_obv: Array2<f64>,
    pub yc_noise: Array2<f64>,
}

impl TransformedObservations {
    /// Mirror `obs` through the per-dimension forward transforms.
    ///
    /// Only the experimental input columns are converted; the trailing
    /// model columns are placeholders overwritten per evaluation with a
    /// candidate that already lives in converted space.
    pub fn new(
        obs: &ObservationSet, xconrevs: &[Box<dyn ConRev>], yconrevs: &[Box<dyn ConRev>],
    ) -> Self {
        let mut xc_obv = obs.inputs().clone();
        for i in 0..obs.nx_exp {
            xc_obv.column_mut(i).mapv_inplace(|v| xconrevs[i].convert(v));
        }
        let mut yc_obv = obs.outputs().clone();
        let mut yc_noise = obs.noise().clone();
        for j in 0..obs.ny() {
            yc_obv.column_mut(j).mapv_inplace(|v| yconrevs[j].convert(v));
            yc_noise.column_mut(j).mapv_inplace(|v| yconrevs[j].convert(v));
        }
        Self { xc_obv, yc_obv, yc_noise }
    }
}

fn validate_finite(argument: &'static str, array: &Array2<f64>) -> CalibResult<()> {
    for ((row, col), &value) in array.indexed_iter() {
        if !value.is_finite() {
            return Err(CalibError::NonFiniteObservation { argument, row, col, value });
        }
    }
    Ok(())
}

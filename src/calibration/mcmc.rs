//! Posterior-sampling scaffolding.
//!
//! Composes a posterior evaluator behind the sampler-facing surface a
//! Markov-chain implementation will drive: a log-posterior callable plus
//! the evaluator's dimension metadata. Chain construction (proposals,
//! adaptation, convergence diagnostics) is out of scope and not provided
//! here; [`McmcSampler`] exists so downstream code can already program
//! against the sampling seam.
use crate::calibration::errors::CalibResult;
use crate::calibration::map::{ForwardModel, MapEstimator};
use ndarray::Array1;

/// Sampler scaffolding over a direct-model posterior evaluator.
#[derive(Debug)]
pub struct McmcSampler<M: ForwardModel> {
    estimator: MapEstimator<M>,
}

impl<M: ForwardModel> McmcSampler<M> {
    /// Wrap a configured posterior evaluator.
    pub fn new(estimator: MapEstimator<M>) -> Self {
        Self { estimator }
    }

    /// The wrapped posterior evaluator.
    pub fn estimator(&self) -> &MapEstimator<M> {
        &self.estimator
    }

    /// Mutable access, e.g. for `set_observations` before sampling.
    pub fn estimator_mut(&mut self) -> &mut MapEstimator<M> {
        &mut self.estimator
    }

    /// Recover the evaluator.
    pub fn into_estimator(self) -> MapEstimator<M> {
        self.estimator
    }

    /// Log-posterior of a candidate, delegated to the evaluator.
    ///
    /// # Errors
    /// Propagates the evaluator's state and evaluation errors.
    pub fn log_posterior(&self, x: &Array1<f64>) -> CalibResult<f64> {
        self.estimator.log_posterior(x)
    }
}

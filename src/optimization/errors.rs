use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Search bounds ----
    /// Bounds must cover at least one dimension.
    EmptyBounds,

    /// Lower and upper bound vectors must share a length.
    BoundsDimMismatch {
        lower: usize,
        upper: usize,
    },

    /// Each bound pair must be finite with lower strictly below upper.
    InvalidBound {
        index: usize,
        lower: f64,
        upper: f64,
        reason: &'static str,
    },

    // ---- MapOptions ----
    /// Swarm size must be at least two particles.
    InvalidParticleCount {
        count: usize,
        reason: &'static str,
    },

    /// Maximum iterations must be positive.
    InvalidMaxIters {
        max_iters: u64,
        reason: &'static str,
    },

    // ---- Objective ----
    /// Posterior evaluation failed inside the objective.
    PosteriorEvaluation {
        text: String,
    },

    /// Objective returned a value unusable as a cost (NaN or +inf posterior).
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing.
    MissingThetaHat,

    /// Best objective value must be finite.
    NonFiniteValue {
        value: f64,
    },

    // ---- Argmin ----
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Search bounds ----
            OptError::EmptyBounds => {
                write!(f, "Search bounds must cover at least one dimension")
            }
            OptError::BoundsDimMismatch { lower, upper } => {
                write!(f, "Bounds dimension mismatch: lower has {lower}, upper has {upper}")
            }
            OptError::InvalidBound { index, lower, upper, reason } => {
                write!(f, "Invalid bound at index {index}: [{lower}, {upper}]: {reason}")
            }

            // ---- MapOptions ----
            OptError::InvalidParticleCount { count, reason } => {
                write!(f, "Invalid particle count {count}: {reason}")
            }
            OptError::InvalidMaxIters { max_iters, reason } => {
                write!(f, "Invalid maximum iterations {max_iters}: {reason}")
            }

            // ---- Objective ----
            OptError::PosteriorEvaluation { text } => {
                write!(f, "Posterior evaluation failed: {text}")
            }
            OptError::NonFiniteCost { value } => {
                write!(f, "Objective value unusable as a cost: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }
            OptError::NonFiniteValue { value } => {
                write!(f, "Non-finite best objective value: {value}")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast::<OptError>() {
            Ok(opt_err) => opt_err,
            Err(err) => match err.downcast() {
                Ok(argmin_err) => match argmin_err {
                    ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                    ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                    ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                    ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                    ArgminError::CheckpointNotFound { text } => {
                        OptError::CheckPointNotFound { text }
                    }
                    ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                    ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                    _ => OptError::UnknownError,
                },
                Err(err) => OptError::BackendError { text: err.to_string() },
            },
        }
    }
}

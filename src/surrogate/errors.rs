/// Crate-wide result alias for surrogate-model operations.
pub type SurrogateResult<T> = Result<T, SurrogateError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SurrogateError {
    // ---- Kernel ----
    /// Kernel family name not in the closed enumeration.
    UnknownKernel {
        name: String,
        reason: &'static str,
    },

    /// Signal variance must be finite and > 0.
    InvalidSignalVariance {
        value: f64,
    },

    /// Lengthscales must be finite and > 0.
    InvalidLengthscale {
        index: usize,
        value: f64,
    },

    /// Lengthscale count must equal the input dimension.
    LengthscaleDimMismatch {
        expected: usize,
        found: usize,
    },

    // ---- Training data ----
    /// Snapshot requires at least one training row.
    EmptyTrainingSet,

    /// Training inputs and outputs must share a row count.
    TrainingRowMismatch {
        x_rows: usize,
        y_rows: usize,
    },

    /// Noise variances must match the output array shape.
    NoiseShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Training values must be finite.
    NonFiniteTrainingValue {
        array: &'static str,
        row: usize,
        col: usize,
        value: f64,
    },

    /// Noise variances must be finite and non-negative.
    InvalidNoiseVariance {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Evaluation ----
    /// Query or training input dimension does not match the kernel.
    InputDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Covariance matrix was not positive definite (Cholesky failed).
    NotPositiveDefinite {
        dim: usize,
    },
}

impl std::error::Error for SurrogateError {}

impl std::fmt::Display for SurrogateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Kernel ----
            SurrogateError::UnknownKernel { name, reason } => {
                write!(f, "Unknown kernel family '{name}': {reason}")
            }
            SurrogateError::InvalidSignalVariance { value } => {
                write!(f, "Invalid signal variance {value}: must be finite and > 0")
            }
            SurrogateError::InvalidLengthscale { index, value } => {
                write!(f, "Invalid lengthscale at index {index}: {value}, must be finite and > 0")
            }
            SurrogateError::LengthscaleDimMismatch { expected, found } => {
                write!(f, "Lengthscale dimension mismatch: expected {expected}, found {found}")
            }

            // ---- Training data ----
            SurrogateError::EmptyTrainingSet => {
                write!(f, "Surrogate training set must contain at least one row")
            }
            SurrogateError::TrainingRowMismatch { x_rows, y_rows } => {
                write!(f, "Training row mismatch: inputs have {x_rows} rows, outputs have {y_rows}")
            }
            SurrogateError::NoiseShapeMismatch { expected, found } => {
                write!(f, "Noise variance shape mismatch: expected {expected:?}, found {found:?}")
            }
            SurrogateError::NonFiniteTrainingValue { array, row, col, value } => {
                write!(f, "Non-finite value in {array} at ({row}, {col}): {value}")
            }
            SurrogateError::InvalidNoiseVariance { row, col, value } => {
                write!(
                    f,
                    "Invalid noise variance at ({row}, {col}): {value}, must be finite and >= 0"
                )
            }

            // ---- Evaluation ----
            SurrogateError::InputDimMismatch { expected, found } => {
                write!(f, "Input dimension mismatch: kernel expects {expected}, found {found}")
            }
            SurrogateError::NotPositiveDefinite { dim } => {
                write!(
                    f,
                    "Covariance matrix of dimension {dim} is not positive definite; \
                     Cholesky factorization failed"
                )
            }
        }
    }
}

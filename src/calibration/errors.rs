use crate::optimization::errors::OptError;
use crate::surrogate::errors::SurrogateError;

/// Crate-wide result alias for calibration operations.
pub type CalibResult<T> = Result<T, CalibError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CalibError {
    // ---- Configuration ----
    /// At least one calibratable model dimension is required.
    InvalidModelDimensions {
        nx_model: usize,
        reason: &'static str,
    },

    /// At least one output channel is required.
    InvalidOutputDimensions {
        ny: usize,
        reason: &'static str,
    },

    /// Prior list length must be nx_model (padded) or nx_exp + nx_model.
    PriorLengthMismatch {
        expected_model: usize,
        expected_full: usize,
        found: usize,
    },

    /// Surrogate-coupled evaluators need a prior for every input dimension.
    PriorLengthMismatchFull {
        expected: usize,
        found: usize,
    },

    /// Transform list length must match its coordinate count.
    TransformLengthMismatch {
        argument: &'static str,
        expected: usize,
        found: usize,
    },

    /// Attached surrogate input dimension must equal nx_exp + nx_model.
    SurrogateInputMismatch {
        expected: usize,
        found: usize,
    },

    /// Attached surrogate output dimension must equal ny.
    SurrogateOutputMismatch {
        expected: usize,
        found: usize,
    },

    // ---- Observation validation ----
    /// Observations require at least one row.
    EmptyObservations,

    /// y column count must equal the number of output channels.
    YColumnMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// y_noise must match the shape of y exactly.
    NoiseShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// x_exp is required whenever there are experimental dimensions.
    MissingExpInputs {
        nx_exp: usize,
    },

    /// x_exp shape must be (obvs, nx_exp).
    ExpInputShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Observation values must be finite.
    NonFiniteObservation {
        argument: &'static str,
        row: usize,
        col: usize,
        value: f64,
    },

    /// Noise scales must be strictly positive.
    NonPositiveNoise {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Evaluator state ----
    /// set_observations must run before likelihood evaluation or opt.
    ObservationsNotSet,

    /// A surrogate snapshot must be attached before likelihood evaluation or opt.
    SurrogateNotAttached,

    // ---- Evaluation ----
    /// Candidate vector length must equal nx_model.
    CandidateLengthMismatch {
        expected: usize,
        found: usize,
    },

    /// Forward-model evaluation failed for an observation row.
    ModelEvaluationFailed {
        row: usize,
        text: String,
    },

    /// Forward-model output length must equal ny.
    ModelOutputLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Wrapper for surrogate-layer failures during likelihood evaluation.
    SurrogateEvaluation {
        text: String,
    },

    /// Wrapper for optimizer-layer failures during opt.
    Optimization {
        text: String,
    },
}

impl std::error::Error for CalibError {}

impl std::fmt::Display for CalibError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            CalibError::InvalidModelDimensions { nx_model, reason } => {
                write!(f, "Invalid model input dimension count {nx_model}: {reason}")
            }
            CalibError::InvalidOutputDimensions { ny, reason } => {
                write!(f, "Invalid output dimension count {ny}: {reason}")
            }
            CalibError::PriorLengthMismatch { expected_model, expected_full, found } => {
                write!(
                    f,
                    "Prior list length {found}: expected {expected_model} (model dimensions \
                     only) or {expected_full} (all input dimensions)"
                )
            }
            CalibError::PriorLengthMismatchFull { expected, found } => {
                write!(
                    f,
                    "Prior list length {found}: surrogate-coupled calibration requires one \
                     prior per input dimension ({expected})"
                )
            }
            CalibError::TransformLengthMismatch { argument, expected, found } => {
                write!(f, "Transform list '{argument}' has length {found}: expected {expected}")
            }
            CalibError::SurrogateInputMismatch { expected, found } => {
                write!(
                    f,
                    "Attached surrogate has input dimension {found}: nx_exp + nx_model must \
                     sum to {expected}"
                )
            }
            CalibError::SurrogateOutputMismatch { expected, found } => {
                write!(f, "Attached surrogate has output dimension {found}: expected {expected}")
            }

            // ---- Observation validation ----
            CalibError::EmptyObservations => {
                write!(f, "Argument 'y' must contain at least one observation row")
            }
            CalibError::YColumnMismatch { expected, found } => {
                write!(
                    f,
                    "Argument 'y' has shape {found:?}: expected a 2-d array with {expected} \
                     output column(s)"
                )
            }
            CalibError::NoiseShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Argument 'y_noise' has shape {found:?}: expected the same shape as y \
                     {expected:?}"
                )
            }
            CalibError::MissingExpInputs { nx_exp } => {
                write!(
                    f,
                    "Argument 'x_exp' is required: {nx_exp} experimental input dimension(s) \
                     are configured"
                )
            }
            CalibError::ExpInputShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Argument 'x_exp' has shape {found:?}: expected (len(y), nx_exp) = \
                     {expected:?}"
                )
            }
            CalibError::NonFiniteObservation { argument, row, col, value } => {
                write!(f, "Argument '{argument}' has non-finite value at ({row}, {col}): {value}")
            }
            CalibError::NonPositiveNoise { row, col, value } => {
                write!(
                    f,
                    "Argument 'y_noise' has non-positive value at ({row}, {col}): {value}, \
                     noise scales must be > 0"
                )
            }

            // ---- Evaluator state ----
            CalibError::ObservationsNotSet => {
                write!(f, "Observations are not set; call set_observations first")
            }
            CalibError::SurrogateNotAttached => {
                write!(f, "No surrogate snapshot attached; call attach_surrogate first")
            }

            // ---- Evaluation ----
            CalibError::CandidateLengthMismatch { expected, found } => {
                write!(f, "Candidate vector length {found}: expected nx_model = {expected}")
            }
            CalibError::ModelEvaluationFailed { row, text } => {
                write!(f, "Forward model failed for observation row {row}: {text}")
            }
            CalibError::ModelOutputLengthMismatch { row, expected, found } => {
                write!(
                    f,
                    "Forward model returned {found} output(s) for observation row {row}: \
                     expected ny = {expected}"
                )
            }
            CalibError::SurrogateEvaluation { text } => {
                write!(f, "Surrogate evaluation failed: {text}")
            }
            CalibError::Optimization { text } => {
                write!(f, "Optimization failed: {text}")
            }
        }
    }
}

impl From<SurrogateError> for CalibError {
    fn from(err: SurrogateError) -> Self {
        CalibError::SurrogateEvaluation { text: err.to_string() }
    }
}

impl From<OptError> for CalibError {
    fn from(err: OptError) -> Self {
        CalibError::Optimization { text: err.to_string() }
    }
}

/// Crate-wide result alias for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Affine scale must be finite and non-zero.
    InvalidScale {
        value: f64,
        reason: &'static str,
    },

    /// Affine shift must be finite.
    InvalidShift {
        value: f64,
    },
}

impl std::error::Error for TransformError {}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::InvalidScale { value, reason } => {
                write!(f, "Invalid affine scale {value}: {reason}")
            }
            TransformError::InvalidShift { value } => {
                write!(f, "Invalid affine shift {value}: must be finite")
            }
        }
    }
}

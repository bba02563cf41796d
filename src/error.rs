//! Error types for Arbol operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Arbol operations.
///
/// Covers the recoverable failures of training and inference: dimension
/// mismatches, empty training sets, predicting with an unfit model, and
/// invalid hyperparameters, plus stale handles in the adapter layer.
///
/// # Examples
///
/// ```
/// use arbol::error::ArbolError;
///
/// let err = ArbolError::DimensionMismatch {
///     expected: "numeric len 3".to_string(),
///     actual: "2".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum ArbolError {
    /// Feature vector lengths don't match the declared counts.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// `fit` called with zero samples.
    EmptyTrainingSet,

    /// `predict` or `show` called before any successful `fit`.
    NotFitted,

    /// A sample's label is outside the declared label range.
    LabelOutOfRange {
        /// Offending label value
        label: usize,
        /// Declared number of labels
        n_labels: usize,
    },

    /// A handle passed to the adapter layer no longer refers to a live
    /// resource (or never did).
    StaleHandle {
        /// The raw handle id
        id: u64,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for ArbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArbolError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Feature dimension mismatch: expected {expected}, got {actual}"
                )
            }
            ArbolError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            ArbolError::EmptyTrainingSet => {
                write!(f, "Cannot fit with zero samples")
            }
            ArbolError::NotFitted => {
                write!(f, "Model not fitted: call fit() before predicting")
            }
            ArbolError::LabelOutOfRange { label, n_labels } => {
                write!(f, "Label {label} out of range (n_labels = {n_labels})")
            }
            ArbolError::StaleHandle { id } => {
                write!(f, "Stale handle: id {id} does not refer to a live resource")
            }
            ArbolError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ArbolError {}

impl From<&str> for ArbolError {
    fn from(msg: &str) -> Self {
        ArbolError::Other(msg.to_string())
    }
}

impl From<String> for ArbolError {
    fn from(msg: String) -> Self {
        ArbolError::Other(msg)
    }
}

impl ArbolError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context} {expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ArbolError>;

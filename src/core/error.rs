//! Error types for the tokenomics engine.
//!
//! Constraint violations (LP floor, LP FDV parity) are not errors; they are
//! reported through [`ValidationOutcome`](crate::core::ValidationOutcome).
//! The variants here cover inputs the engine refuses to look at at all.

use thiserror::Error;

/// Result type alias for tokenomics operations.
pub type Result<T> = std::result::Result<T, TokenomicsError>;

/// Error types for the allocation engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenomicsError {
    /// Input value outside its documented range.
    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Input value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    /// Batch input columns of different lengths.
    #[error("Data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl TokenomicsError {
    /// Create an out of range error.
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// Create a non-finite input error.
    pub fn non_finite(field: &'static str) -> Self {
        Self::NonFinite { field }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Create an invalid config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(feature = "python")]
impl From<TokenomicsError> for pyo3::PyErr {
    fn from(err: TokenomicsError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = TokenomicsError::out_of_range("team_percent", 31.0, 0.0, 30.0);
        assert_eq!(err.to_string(), "team_percent out of range: 31 not in [0, 30]");
    }

    #[test]
    fn test_non_finite_message() {
        let err = TokenomicsError::non_finite("funds_to_raise");
        assert_eq!(err.to_string(), "funds_to_raise must be a finite number");
    }
}

//! Error types for matrix and cache operations
//!
//! Inversion failures are raised by the [`Inverter`](crate::inverse::Inverter)
//! and propagate unchanged through the cache layer.

use thiserror::Error;

/// Main error type for matrix operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// The matrix is singular (or ill-conditioned beyond tolerance)
    #[error("Matrix is not invertible: no usable pivot in column {pivot}")]
    NotInvertible { pivot: usize },

    /// Shapes are incompatible with the requested operation
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for matrix operations
pub type Result<T> = std::result::Result<T, MatrixError>;

impl MatrixError {
    /// Shorthand for a [`MatrixError::DimensionMismatch`]
    pub fn dimension_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        MatrixError::DimensionMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl From<String> for MatrixError {
    fn from(s: String) -> Self {
        MatrixError::Other(s)
    }
}

impl From<&str> for MatrixError {
    fn from(s: &str) -> Self {
        MatrixError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for MatrixError {
    fn from(e: serde_json::Error) -> Self {
        MatrixError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MatrixError::NotInvertible { pivot: 1 };
        assert_eq!(
            error.to_string(),
            "Matrix is not invertible: no usable pivot in column 1"
        );

        let mismatch = MatrixError::dimension_mismatch("square matrix", "2x3");
        assert!(mismatch.to_string().contains("expected square matrix"));
        assert!(mismatch.to_string().contains("found 2x3"));

        let config_error = MatrixError::ConfigError("tolerance must be positive".to_string());
        assert!(config_error.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_error_conversion() {
        let error: MatrixError = "test error".into();
        assert!(matches!(error, MatrixError::Other(_)));

        let error: MatrixError = "test error".to_string().into();
        assert!(matches!(error, MatrixError::Other(_)));

        let json_err = serde_json::from_str::<Vec<f64>>("not json").unwrap_err();
        let error: MatrixError = json_err.into();
        assert!(matches!(error, MatrixError::SerializationError(_)));
    }
}

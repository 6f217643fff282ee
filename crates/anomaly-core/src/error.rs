//! Error types for timeline anomaly detection
//!
//! Provides a unified error type for all timeline-anomaly crates.

use thiserror::Error;

/// Core error type for series cleaning and anomaly extraction
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Malformed records at the wire boundary
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a zero-width rolling window
    pub fn invalid_window(name: &str, width: usize) -> Self {
        Self::InvalidParameter(format!("{name} must be a positive window width, got {width}"))
    }

    /// Create an error for a threshold that is negative or not finite
    pub fn invalid_threshold(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!(
            "{name} must be finite and non-negative, got {value}"
        ))
    }

    /// Create an error for invalid quantile
    pub fn invalid_quantile(p: f64) -> Self {
        Self::InvalidParameter(format!("Quantile {p} must be in [0, 1]"))
    }

    /// Create an error for batches wrapped more than one level deep
    pub fn nesting_too_deep() -> Self {
        Self::InvalidInput(
            "batch is nested more than one level deep; expected records or [records]".to_string(),
        )
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("extreme_window must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: extreme_window must be positive");

        let err = Error::InvalidInput("record is missing time".to_string());
        assert_eq!(err.to_string(), "Invalid input: record is missing time");

        let err = Error::Computation("singular design matrix".to_string());
        assert_eq!(err.to_string(), "Computation error: singular design matrix");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::invalid_window("local_window", 0);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: local_window must be a positive window width, got 0"
        );

        let err = Error::invalid_threshold("epsilon", -0.5);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: epsilon must be finite and non-negative, got -0.5"
        );

        let err = Error::size_mismatch(10, 5, "transition mask");
        assert_eq!(
            err.to_string(),
            "Invalid input: Size mismatch in transition mask: expected 10, got 5"
        );

        let err = Error::invalid_quantile(1.5);
        assert_eq!(err.to_string(), "Invalid parameter: Quantile 1.5 must be in [0, 1]");

        assert!(matches!(Error::nesting_too_deep(), Error::InvalidInput(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }
}

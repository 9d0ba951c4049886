//! Simulation errors.
//!
//! | Variant | Raised when | Scope |
//! |---------|-------------|-------|
//! | `InvalidWorkload` | Descriptor list fails [`validate_workload`](crate::validation::validate_workload) | Whole call, before any run |
//! | `InvalidParameter` | Round-Robin without a positive quantum | That algorithm only |
//!
//! Unknown algorithm names are not an error: they are skipped by
//! [`compare_by_name`](crate::comparison::compare_by_name).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Errors surfaced by simulations and comparisons.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The workload is empty or contains malformed descriptors.
    InvalidWorkload(Vec<ValidationError>),
    /// An algorithm parameter is missing or out of range.
    InvalidParameter {
        /// Parameter name (e.g. `time_quantum`).
        parameter: &'static str,
        /// Human-readable description.
        message: String,
    },
}

impl SimulationError {
    /// Creates an invalid-parameter error.
    pub fn invalid_parameter(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }

    /// Short category label, stable across messages.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidWorkload(_) => ErrorCategory::InvalidWorkload,
            Self::InvalidParameter { .. } => ErrorCategory::InvalidParameter,
        }
    }
}

/// Error category, suitable for serialization in comparison outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// See [`SimulationError::InvalidWorkload`].
    InvalidWorkload,
    /// See [`SimulationError::InvalidParameter`].
    InvalidParameter,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWorkload(errors) => {
                write!(f, "invalid workload")?;
                for (i, e) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{e}")?;
                }
                Ok(())
            }
            Self::InvalidParameter { parameter, message } => {
                write!(f, "invalid parameter `{parameter}`: {message}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidWorkload(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;
    use crate::validation::validate_workload;

    #[test]
    fn test_display_invalid_workload() {
        let errors = validate_workload(&[Process::new(1, 0), Process::new(1, 2)]).unwrap_err();
        let err = SimulationError::from(errors);
        let text = err.to_string();
        assert!(text.starts_with("invalid workload: "));
        assert!(text.contains("non-positive burst"));
        assert!(text.contains("; Duplicate process PID: 1"));
        assert_eq!(err.category(), ErrorCategory::InvalidWorkload);
    }

    #[test]
    fn test_display_invalid_parameter() {
        let err = SimulationError::invalid_parameter("time_quantum", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `time_quantum`: must be positive, got 0"
        );
        assert_eq!(err.category(), ErrorCategory::InvalidParameter);
    }
}

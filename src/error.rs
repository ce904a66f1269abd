//! Error types shared by all analysis operations
//!
//! Every fallible operation in the crate reports one of the variants below.
//! Non-convergence of iterative algorithms is not an error: a usable partial
//! result still exists and is returned with a status flag instead.

use std::fmt;

/// Main error type for all analysis operations
#[derive(Debug, Clone)]
pub enum AnalysisError {
    /// Point or domain data does not meet analysis requirements
    InvalidInput {
        /// Description of what is wrong with the input data
        reason: String,
    },

    /// Analysis parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Boundary-relative operation requested without a domain
    MissingDomain {
        /// Operation that required the domain
        operation: &'static str,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { reason } => {
                write!(f, "Invalid input data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MissingDomain { operation } => {
                write!(f, "Operation '{operation}' requires a domain but none was supplied")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Convenience type alias for analysis results
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AnalysisError {
    AnalysisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid input error
pub fn invalid_input(reason: &impl ToString) -> AnalysisError {
    AnalysisError::InvalidInput {
        reason: reason.to_string(),
    }
}

//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for mill job compilation
//! and job parameter validation.

use brdmill_core::RangeError;
use thiserror::Error;

/// Errors that can occur while generating a mill job.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A route coordinate is outside the device range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// Writing the command text failed.
    #[error("Command formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

impl CamToolError {
    /// Check if this is a coordinate range error
    pub fn is_range_error(&self) -> bool {
        matches!(self, CamToolError::Range(_))
    }
}

/// Errors related to mill job parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

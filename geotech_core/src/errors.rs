//! # Error Types
//!
//! Structured error types for geotech_core. Only malformed borehole input is
//! surfaced as an error; degenerate field data (missing N-values, unknown
//! soil codes, zero stress) resolves to documented fallback values inside
//! the pipeline instead.
//!
//! ## Example
//!
//! ```rust
//! use geotech_core::errors::{CalcError, CalcResult};
//!
//! fn validate_depth(depth_m: f64) -> CalcResult<()> {
//!     if depth_m < 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "depth",
//!             depth_m.to_string(),
//!             "Depth must be measured downward from the ground surface",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_depth(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for geotech_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant carries enough context for a caller to point the user at the
/// offending borehole or layer.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Borehole was supplied without any layers
    #[error("Borehole '{borehole}' has no layers")]
    EmptyBorehole { borehole: String },

    /// Layers are not in strictly ascending depth order
    #[error("Borehole '{borehole}': layer {index} at depth {depth} m does not follow previous depth {previous} m")]
    DepthOrder {
        borehole: String,
        index: usize,
        previous: f64,
        depth: f64,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an EmptyBorehole error
    pub fn empty_borehole(borehole: impl Into<String>) -> Self {
        CalcError::EmptyBorehole {
            borehole: borehole.into(),
        }
    }

    /// Create a DepthOrder error
    pub fn depth_order(borehole: impl Into<String>, index: usize, previous: f64, depth: f64) -> Self {
        CalcError::DepthOrder {
            borehole: borehole.into(),
            index,
            previous,
            depth,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::EmptyBorehole { .. } => "EMPTY_BOREHOLE",
            CalcError::DepthOrder { .. } => "DEPTH_ORDER",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

//! # Error Types
//!
//! Structured error types for runway_core. Every failure the engine can
//! produce is one of these variants, carrying enough context for a caller
//! (human or program) to see which input or formula is at fault.
//!
//! An exhausted optimizer search is *not* an error: it is reported through
//! [`crate::report::DesignOutcome::UnboundedSearch`] inside a complete report.
//!
//! ## Example
//!
//! ```rust
//! use runway_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_m: f64) -> CalcResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "beam_span_m",
//!             span_m.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_span(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for runway_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for design operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive, non-finite, inconsistent)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Candidate section violates geometric sanity
    #[error("Degenerate section: {reason}")]
    DegenerateSection { reason: String },

    /// A code formula is undefined for the current state
    #[error("Formula domain error in {check}: {reason}")]
    FormulaDomainError { check: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
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

    /// Create a DegenerateSection error
    pub fn degenerate_section(reason: impl Into<String>) -> Self {
        CalcError::DegenerateSection {
            reason: reason.into(),
        }
    }

    /// Create a FormulaDomainError
    pub fn formula_domain(check: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FormulaDomainError {
            check: check.into(),
            reason: reason.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// True when the optimizer may discard the candidate and keep searching
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::DegenerateSection { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DegenerateSection { .. } => "DEGENERATE_SECTION",
            CalcError::FormulaDomainError { .. } => "FORMULA_DOMAIN_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject non-finite or non-positive values for a named field.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a positive, finite number",
        ));
    }
    Ok(())
}

/// Reject non-finite or negative values for a named field.
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be zero or a positive, finite number",
        ));
    }
    Ok(())
}

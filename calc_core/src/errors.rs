//! # Error Types
//!
//! Structured error types for calc_core. Every calculator returns these
//! instead of panicking or quietly producing a meaningless number, so the
//! presentation layer can show a readable message and a stable error code.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_demand(demand: f64) -> CalcResult<()> {
//!     if demand <= 0.0 {
//!         return Err(CalcError::invalid_parameter(
//!             "annual_demand",
//!             demand.to_string(),
//!             "Annual demand must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_demand(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A numeric input is out of its domain or contradicts another input
    /// (e.g. price not above variable cost, non-positive EOQ inputs)
    #[error("Invalid parameter '{field}': {value} - {reason}")]
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    /// Input data has a zero denominator (e.g. all x values equal in a regression)
    #[error("Degenerate input: {reason}")]
    DegenerateInput { reason: String },

    /// The IRR search bracket does not contain a sign change of NPV
    #[error(
        "No sign change: NPV is {npv_low:.2} at rate {low} and {npv_high:.2} at rate {high}, \
         the bracket does not contain a root"
    )]
    NoSignChange {
        low: f64,
        high: f64,
        npv_low: f64,
        npv_high: f64,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidParameter error
    pub fn invalid_parameter(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidParameter {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DegenerateInput error
    pub fn degenerate_input(reason: impl Into<String>) -> Self {
        CalcError::DegenerateInput {
            reason: reason.into(),
        }
    }

    /// Create a NoSignChange error for an IRR bracket
    pub fn no_sign_change(low: f64, high: f64, npv_low: f64, npv_high: f64) -> Self {
        CalcError::NoSignChange {
            low,
            high,
            npv_low,
            npv_high,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidParameter { .. } => "INVALID_PARAMETER",
            CalcError::DegenerateInput { .. } => "DEGENERATE_INPUT",
            CalcError::NoSignChange { .. } => "NO_SIGN_CHANGE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
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

/// Reject NaN and infinities for a named field.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_parameter(
            field,
            value.to_string(),
            "Value must be a finite number",
        ))
    }
}

/// Reject zero, negative and non-finite values for a named field.
pub(crate) fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_parameter(field, value.to_string(), reason));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_parameter("price", "-5", "Price must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InvalidParameter"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::degenerate_input("all x equal").error_code(),
            "DEGENERATE_INPUT"
        );
        assert_eq!(
            CalcError::no_sign_change(0.01, 1.0, 5.0, 3.0).error_code(),
            "NO_SIGN_CHANGE"
        );
        assert_eq!(
            CalcError::invalid_parameter("x", "1", "bad").error_code(),
            "INVALID_PARAMETER"
        );
        let parse_err: CalcError = serde_json::from_str::<f64>("oops").unwrap_err().into();
        assert_eq!(parse_err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_no_sign_change_message() {
        let err = CalcError::no_sign_change(0.01, 1.0, 1500.0, 200.0);
        let msg = err.to_string();
        assert!(msg.contains("1500.00"));
        assert!(msg.contains("does not contain a root"));
    }

    #[test]
    fn test_require_finite() {
        assert!(require_finite("x", 1.0).is_ok());
        assert!(require_finite("x", f64::NAN).is_err());
        assert!(require_finite("x", f64::INFINITY).is_err());
        assert!(require_positive("x", 0.0, "must be positive").is_err());
        assert!(require_positive("x", 0.5, "must be positive").is_ok());
    }
}

//! # Error Types
//!
//! Domain-specific error types for bite-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bite-core errors (this file)                                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bite-store errors (separate crate)                                    │
//! │  └── StoreError       - Durable store failures                         │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  ├── CheckoutError / AuthError                                         │
//! │  └── ApiError         - What the shell / frontend sees (serialized)    │
//! │                                                                         │
//! │  Flow: ValidationError → CheckoutError / AuthError → ApiError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart reducer itself never fails: unknown entry ids and non-positive
//! quantities degrade to no-ops. These errors cover the flows around it.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced by the address form, the registration form, menu queries and the
/// structural check run on persisted cart entries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value does not fit the money range.
    #[error("{field} is out of range")]
    OutOfRange { field: String },

    /// Invalid format (e.g., ZIP code, phone number, email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must agree do not.
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },

    /// Duplicate value (e.g., two cart entries for one menu item).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn too_short(field: impl Into<String>, min: usize) -> Self {
        ValidationError::TooShort {
            field: field.into(),
            min,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("street").to_string(),
            "street is required"
        );
        assert_eq!(
            ValidationError::too_short("city", 2).to_string(),
            "city must be at least 2 characters"
        );
        let err = ValidationError::Mismatch {
            field: "confirmPassword".to_string(),
            other: "password".to_string(),
        };
        assert_eq!(err.to_string(), "confirmPassword does not match password");
    }
}

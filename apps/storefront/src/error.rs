//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Yellow Bite                            │
//! │                                                                         │
//! │  Shell / Frontend            Rust Backend                               │
//! │  ────────────────            ────────────                               │
//! │                                                                         │
//! │  place_order                                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ─────── StoreError::Io(...) ─────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Checkout / Auth Error? ─── CheckoutError ──────► ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  { "code": "EMPTY_CART", "message": "Your cart is empty" }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use bite_core::ValidationError;
use bite_store::StoreError;

use crate::state::{AuthError, CheckoutError, ConfigError};

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "zipCode has invalid format: please enter a valid ZIP code"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Menu item or entry not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Not signed in, or wrong credentials (401)
    Unauthorized,

    /// Email already registered (409)
    Conflict,

    /// Checkout needs a non-empty cart
    EmptyCart,

    /// Checkout needs a saved delivery address
    MissingAddress,

    /// Durable store failed (500)
    StorageError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Log the actual error but return a generic message
        tracing::error!(error = %err, "Store operation failed");
        ApiError::new(ErrorCode::StorageError, "Could not save your data. Please try again.")
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Validation(e) => e.into(),
            CheckoutError::NotAuthenticated => ApiError::new(ErrorCode::Unauthorized, err.to_string()),
            CheckoutError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, err.to_string()),
            CheckoutError::MissingAddress => {
                ApiError::new(ErrorCode::MissingAddress, err.to_string())
            }
            CheckoutError::Store(e) => e.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => e.into(),
            AuthError::EmailTaken(_) => ApiError::new(ErrorCode::Conflict, err.to_string()),
            AuthError::InvalidCredentials | AuthError::NotAuthenticated => {
                ApiError::new(ErrorCode::Unauthorized, err.to_string())
            }
            AuthError::Hashing(reason) => {
                tracing::error!(%reason, "Password hashing failed");
                ApiError::internal("Unable to create account. Please try again.")
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

//! # Store Error Types
//!
//! Error types for durable store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds key / path context                    │
//! │       │                                                                 │
//! │       ├──► CartEngine: logged, engine keeps working in memory          │
//! │       │                                                                 │
//! │       └──► ApiError (storefront) ← Serialized for the shell            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Durable store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    #[error("Store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("Store file {path} is corrupt: {reason}")]
    CorruptBackingFile { path: PathBuf, reason: String },

    /// A value under `key` failed to decode or failed its schema check.
    ///
    /// Repositories discard such values rather than returning this to
    /// callers, except from explicit decode helpers.
    #[error("Malformed value under '{key}': {reason}")]
    Malformed { key: String, reason: String },

    /// Encoding a value to JSON failed.
    #[error("Failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A previous writer panicked while holding the store lock.
    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(key: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::Malformed {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::malformed("cart", "expected value at line 1 column 2");
        assert_eq!(
            err.to_string(),
            "Malformed value under 'cart': expected value at line 1 column 2"
        );
        assert_eq!(StoreError::Poisoned.to_string(), "Store lock poisoned");
    }
}

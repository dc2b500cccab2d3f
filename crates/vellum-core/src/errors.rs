//! Unified error system for Vellum
//!
//! A single error enum covers every failure the engine can surface.
//! Callers gating an operation must treat *any* error as a denial; the
//! specific kind exists for diagnostics and HTTP status mapping, not to
//! soften the verdict.

use serde::{Deserialize, Serialize};

/// Unified error type for all Vellum operations
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum VellumError {
    /// Malformed locator or malformed/incomplete descriptor
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Resource or ancestor not found
    #[error("Not found: {message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },

    /// Actor lacks the required operator on the resolved rule set
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Error message describing the permission issue
        message: String,
    },

    /// Policy resolution safeguard tripped, e.g. the inheritance walk
    /// exceeded its hop bound
    #[error("Policy error: {message}")]
    Policy {
        /// Error message describing the policy violation
        message: String,
    },

    /// Remote descriptor fetch failed or timed out
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Document store operation failed
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },

    /// Internal engine error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl VellumError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create a policy error
    pub fn policy(message: impl Into<String>) -> Self {
        Self::Policy {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Standard Result type for Vellum operations
pub type Result<T> = std::result::Result<T, VellumError>;

// A body that fails to parse as a descriptor is a bad descriptor, not an
// internal fault.
impl From<serde_json::Error> for VellumError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_carries_kind_and_message() {
        let err = VellumError::policy("inheritance chain exceeded 32 hops");
        assert_eq!(
            err.to_string(),
            "Policy error: inheritance chain exceeded 32 hops"
        );
    }

    #[test]
    fn json_error_maps_to_invalid() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err: VellumError = parse_err.into();
        assert!(matches!(err, VellumError::Invalid { .. }));
    }
}

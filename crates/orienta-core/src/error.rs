//! Error types for the Orienta client.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire Orienta client.
///
/// The variants follow the three failure families a user can hit when
/// talking to the backend (no response, rejected request, malformed
/// payload) plus the local failures of configuration and storage.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OrientaError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The request was refused because its data is invalid (HTTP 400).
    #[error("Validation error: {message}")]
    Validation { message: String, action: String },

    /// The request requires a valid session (HTTP 401).
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String, action: String },

    /// The server answered with any other non-success status.
    #[error("Request rejected ({status}): {message}")]
    Rejected {
        status: u16,
        name: String,
        message: String,
        action: String,
    },

    /// No response was received (connection refused, DNS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered but the payload failed shape validation.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Follow-up shown when the server did not suggest one.
pub const DEFAULT_ACTION: &str = "Check the data and try again.";
pub const RELOAD_ACTION: &str = "Reload and try again.";

impl OrientaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Validation error with the default follow-up action.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            action: DEFAULT_ACTION.to_string(),
        }
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            action: action.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a MalformedPayload error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an Unauthorized error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if no response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a malformed payload error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedPayload(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns the suggested next step for the user.
    ///
    /// Server-provided actions are passed through untouched. Malformed
    /// payloads and transport failures are recovered by reloading.
    pub fn action(&self) -> &str {
        match self {
            Self::Validation { action, .. }
            | Self::Unauthorized { action, .. }
            | Self::Rejected { action, .. } => action,
            Self::Transport(_) | Self::MalformedPayload(_) => RELOAD_ACTION,
            _ => DEFAULT_ACTION,
        }
    }

    /// Returns the primary message suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for OrientaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for OrientaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for OrientaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for OrientaError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, OrientaError>`.
pub type Result<T> = std::result::Result<T, OrientaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_passes_server_text_through() {
        let err = OrientaError::Rejected {
            status: 503,
            name: "ServiceError".to_string(),
            message: "Service unavailable.".to_string(),
            action: "Contact support.".to_string(),
        };
        assert_eq!(err.action(), "Contact support.");
        assert_eq!(err.user_message(), "Service unavailable.");
    }

    #[test]
    fn test_malformed_payload_suggests_reload() {
        let err = OrientaError::malformed("status is missing");
        assert!(err.is_malformed());
        assert_eq!(err.action(), RELOAD_ACTION);
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: OrientaError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        match err {
            OrientaError::Io { message } => assert!(message.contains("PermissionDenied")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}

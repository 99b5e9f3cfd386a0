//! Account domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session lifetime the backend grants by default (14 days).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 14 * 24 * 60 * 60;

/// Profile of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Login form payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account creation payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session issued by the backend after a successful login.
///
/// The cookie is opaque to the client: it is stored, attached to
/// authenticated requests and discarded on logout.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub session_cookie: String,
    #[serde(default = "default_session_ttl")]
    pub expires_in_secs: u64,
}

fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

impl AuthSession {
    /// Profile view of the session owner.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            email: self.email.clone(),
            uid: Some(self.user_id.clone()),
            created_at: None,
        }
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("session_cookie", &"<redacted>")
            .field("expires_in_secs", &self.expires_in_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_hides_secrets() {
        let credentials = Credentials::new("ava@example.com", "hunter22");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("ava@example.com"));
        assert!(!rendered.contains("hunter22"));

        let session = AuthSession {
            user_id: "u-1".to_string(),
            username: "ava".to_string(),
            email: "ava@example.com".to_string(),
            session_cookie: "abc123".to_string(),
            expires_in_secs: 60,
        };
        assert!(!format!("{session:?}").contains("abc123"));
    }

    #[test]
    fn test_session_ttl_defaults_to_fourteen_days() {
        let json = r#"{
            "user_id": "u-1",
            "username": "ava",
            "email": "ava@example.com",
            "session_cookie": "abc123"
        }"#;
        let session: AuthSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.expires_in_secs, 1_209_600);
        assert_eq!(session.profile().uid.as_deref(), Some("u-1"));
    }
}

//! Persisted session model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::user::AuthSession;

/// A session saved to disk between CLI invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub session: AuthSession,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(session: AuthSession) -> Self {
        Self {
            session,
            saved_at: Utc::now(),
        }
    }

    /// Whether the backend-announced lifetime has elapsed at `now`.
    ///
    /// Only used to skip restoring a session that is certainly stale;
    /// the backend stays the authority on validity.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let ttl = Duration::seconds(self.session.expires_in_secs as i64);
        self.saved_at + ttl <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(ttl: u64) -> AuthSession {
        AuthSession {
            user_id: "u-1".to_string(),
            username: "ava".to_string(),
            email: "ava@example.com".to_string(),
            session_cookie: "cookie".to_string(),
            expires_in_secs: ttl,
        }
    }

    #[test]
    fn test_expiry_uses_saved_at_plus_ttl() {
        let stored = StoredSession::new(session(60));
        assert!(!stored.is_expired_at(stored.saved_at + Duration::seconds(59)));
        assert!(stored.is_expired_at(stored.saved_at + Duration::seconds(60)));
    }
}

//! Explicit authentication state.
//!
//! `AuthContext` owns the answer to "who is logged in" for the lifetime
//! of the process. It restores a persisted session at startup, keeps the
//! session store in step with login and logout, and reports outcomes
//! through the [`MessageCenter`].

use crate::message_center::MessageCenter;
use chrono::Utc;
use orienta_core::error::{OrientaError, Result};
use orienta_core::state::{SessionStore, StoredSession};
use orienta_core::user::{AuthService, AuthSession, Credentials, Registration, UserProfile};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const LOGIN_SUCCESS_TEXT: &str = "Login successful!";
pub const LOGIN_FAILURE_TEXT: &str = "Login failed. Check your credentials and try again.";
pub const SESSION_EXPIRED_TEXT: &str = "Your session has expired. Please log in again.";

/// Who the client is acting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// `initialize` has not run yet.
    Unknown,
    Anonymous,
    Authenticated(UserProfile),
}

impl AuthState {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

pub struct AuthContext {
    auth: Arc<dyn AuthService>,
    store: Arc<dyn SessionStore>,
    messages: MessageCenter,
    state: RwLock<AuthState>,
}

impl AuthContext {
    pub fn new(
        auth: Arc<dyn AuthService>,
        store: Arc<dyn SessionStore>,
        messages: MessageCenter,
    ) -> Self {
        Self {
            auth,
            store,
            messages,
            state: RwLock::new(AuthState::Unknown),
        }
    }

    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.state.read().await.user().cloned()
    }

    /// Restores the persisted session, if any, and asks the backend who
    /// it belongs to.
    ///
    /// Any failure leaves the context anonymous with an empty store.
    pub async fn initialize(&self) -> AuthState {
        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("[AuthContext] Failed to read stored session: {}", e);
                None
            }
        };

        let Some(stored) = stored else {
            return self.set_state(AuthState::Anonymous).await;
        };

        if stored.is_expired_at(Utc::now()) {
            tracing::info!("[AuthContext] Stored session has expired; discarding it");
            self.discard_session(false).await;
            return self.set_state(AuthState::Anonymous).await;
        }

        self.auth.install_session(&stored.session).await;
        match self.auth.current_user().await {
            Ok(user) => {
                tracing::info!("[AuthContext] Restored session of {}", user.username);
                self.set_state(AuthState::Authenticated(user)).await
            }
            Err(e) => {
                tracing::info!("[AuthContext] Stored session was rejected: {}", e);
                self.discard_session(true).await;
                self.set_state(AuthState::Anonymous).await
            }
        }
    }

    /// Opens a session and persists it for later runs.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile> {
        let session = match self.auth.login(credentials).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("[AuthContext] Login failed: {}", e);
                self.messages.error(LOGIN_FAILURE_TEXT);
                return Err(e);
            }
        };

        self.persist(&session).await;
        let user = session.profile();
        self.set_state(AuthState::Authenticated(user.clone())).await;
        self.messages.success(LOGIN_SUCCESS_TEXT);
        tracing::info!("[AuthContext] Logged in as {}", user.username);
        Ok(user)
    }

    /// Creates an account. Does not log in.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        match self.auth.register(registration).await {
            Ok(()) => {
                self.messages
                    .success(format!("Account '{}' created.", registration.username));
                Ok(())
            }
            Err(e) => {
                self.messages.error(format!("{} {}", e.user_message(), e.action()));
                Err(e)
            }
        }
    }

    /// Ends the session locally and, best-effort, on the backend.
    pub async fn logout(&self) {
        self.discard_session(true).await;
        self.messages.clear();
        self.set_state(AuthState::Anonymous).await;
        tracing::info!("[AuthContext] Logged out");
    }

    /// Logs out after the backend rejected the session, leaving a notice
    /// behind for the user.
    pub async fn expire_session(&self) {
        tracing::info!("[AuthContext] Session rejected by the backend");
        self.logout().await;
        self.messages.error(SESSION_EXPIRED_TEXT);
    }

    pub async fn require_authenticated(&self) -> Result<UserProfile> {
        match &*self.state.read().await {
            AuthState::Authenticated(user) => Ok(user.clone()),
            _ => Err(OrientaError::unauthorized(
                "You need to be logged in.",
                "Log in and try again.",
            )),
        }
    }

    pub async fn require_guest(&self) -> Result<()> {
        match &*self.state.read().await {
            AuthState::Authenticated(user) => Err(OrientaError::Validation {
                message: format!("You are already logged in as {}.", user.username),
                action: "Log out first.".to_string(),
            }),
            _ => Ok(()),
        }
    }

    async fn set_state(&self, next: AuthState) -> AuthState {
        *self.state.write().await = next.clone();
        next
    }

    async fn persist(&self, session: &AuthSession) {
        if let Err(e) = self.store.save(&StoredSession::new(session.clone())).await {
            tracing::warn!("[AuthContext] Failed to persist session: {}", e);
        }
    }

    async fn discard_session(&self, notify_backend: bool) {
        if notify_backend {
            if let Err(e) = self.auth.logout().await {
                tracing::debug!("[AuthContext] Backend logout failed: {}", e);
            }
        } else {
            self.auth.clear_session().await;
        }
        if let Err(e) = self.store.clear().await {
            tracing::warn!("[AuthContext] Failed to clear stored session: {}", e);
        }
    }
}

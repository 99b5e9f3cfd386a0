//! Authentication service boundary.

use async_trait::async_trait;

use super::model::{AuthSession, Credentials, Registration, UserProfile};
use crate::error::Result;

/// Account and session operations offered by the backend.
///
/// Implementations attach the current session cookie to authenticated
/// calls. `install_session` and `clear_session` let the caller restore
/// or drop that cookie without a network round trip.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<()>;

    /// Opens a session and starts using its cookie for later calls.
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession>;

    /// Closes the current session on the backend.
    async fn logout(&self) -> Result<()>;

    /// Fetches the profile bound to the current session.
    async fn current_user(&self) -> Result<UserProfile>;

    async fn install_session(&self, session: &AuthSession);

    async fn clear_session(&self);
}

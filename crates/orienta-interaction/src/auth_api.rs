//! HTTP implementation of the authentication service.

use crate::api_client::ApiClient;
use crate::dto::{SessionDto, UserDto};
use async_trait::async_trait;
use orienta_core::error::Result;
use orienta_core::user::{AuthService, AuthSession, Credentials, Registration, UserProfile};
use serde_json::Value;

#[derive(Clone)]
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn register(&self, registration: &Registration) -> Result<()> {
        self.api.post::<_, Value>(&["users"], registration).await?;
        tracing::info!("[AuthApi] Registered user {}", registration.username);
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
        let dto: SessionDto = self
            .api
            .post(&["sessions"], credentials)
            .await?
            .into_data("session")?;
        let session = dto.into_domain()?;

        self.api
            .set_session_cookie(Some(session.session_cookie.clone()))
            .await;
        tracing::info!("[AuthApi] Logged in as {}", session.username);
        Ok(session)
    }

    /// Closes the session on the backend. The local cookie is dropped
    /// whether or not the backend call succeeds.
    async fn logout(&self) -> Result<()> {
        let result = self.api.delete(&["sessions"]).await;
        self.api.set_session_cookie(None).await;
        result
    }

    async fn current_user(&self) -> Result<UserProfile> {
        let dto: UserDto = self.api.get(&["user"]).await?.into_data("user")?;
        dto.into_domain()
    }

    async fn install_session(&self, session: &AuthSession) {
        self.api
            .set_session_cookie(Some(session.session_cookie.clone()))
            .await;
    }

    async fn clear_session(&self) {
        self.api.set_session_cookie(None).await;
    }
}

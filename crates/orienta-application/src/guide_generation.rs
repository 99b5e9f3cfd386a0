//! Creating new guides.

use crate::auth_context::AuthContext;
use crate::message_center::MessageCenter;
use orienta_core::error::Result;
use orienta_core::guide::{Guide, GuideGenerator, GuideRequest};
use std::sync::Arc;

pub struct GuideGeneration {
    generator: Arc<dyn GuideGenerator>,
    auth: Arc<AuthContext>,
    messages: MessageCenter,
}

impl GuideGeneration {
    pub fn new(
        generator: Arc<dyn GuideGenerator>,
        auth: Arc<AuthContext>,
        messages: MessageCenter,
    ) -> Self {
        Self {
            generator,
            auth,
            messages,
        }
    }

    /// Asks the backend whether a topic can be turned into a guide.
    /// The topic is sent as typed; the backend owns the rules.
    pub async fn validate_topic(&self, topic: &str) -> Result<()> {
        let result = self.generator.validate_topic(topic).await;
        self.settle(result).await
    }

    /// Generates a guide. Generation runs on the backend and may take a
    /// while; the request timeout applies.
    pub async fn generate(&self, request: &GuideRequest) -> Result<Guide> {
        tracing::info!(
            "[GuideGeneration] Requesting a {}-day guide on '{}'",
            request.days,
            request.topic
        );
        let result = self.generator.create(request).await;
        let guide = self.settle(result).await?;

        self.messages
            .success(format!("Guide '{}' is ready.", guide.title));
        Ok(guide)
    }

    /// Reports a failure and logs out when the session was rejected.
    async fn settle<T>(&self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) if e.is_unauthorized() => {
                tracing::info!("[GuideGeneration] Session rejected; logging out");
                self.auth.expire_session().await;
                Err(e)
            }
            Err(e) => {
                tracing::warn!("[GuideGeneration] Request failed: {}", e);
                self.messages
                    .error(format!("{} {}", e.user_message(), e.action()));
                Err(e)
            }
        }
    }
}

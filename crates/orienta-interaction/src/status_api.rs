//! Backend status probe.

use crate::api_client::ApiClient;
use crate::dto::StatusDto;
use async_trait::async_trait;
use orienta_core::error::{OrientaError, Result};
use orienta_core::status::{ApiStatus, StatusService};

#[derive(Clone)]
pub struct HttpStatusService {
    api: ApiClient,
}

impl HttpStatusService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl StatusService for HttpStatusService {
    async fn status(&self) -> Result<ApiStatus> {
        match self.api.get::<StatusDto>(&["status"]).await {
            Ok(envelope) => Ok(envelope
                .data
                .map(StatusDto::into_domain)
                .unwrap_or(ApiStatus::Online)),
            // 503 is the backend's own "offline" answer.
            Err(OrientaError::Rejected { status: 503, .. }) => Ok(ApiStatus::Offline),
            Err(e) => Err(e),
        }
    }
}

//! HTTP implementation of the guide traits.

use crate::api_client::ApiClient;
use crate::dto::{GuideDto, TopicRequest, UpdateStudiesRequest};
use async_trait::async_trait;
use orienta_core::error::{OrientaError, Result};
use orienta_core::guide::{
    DayEntry, Guide, GuideCatalog, GuideGenerator, GuideRepository, GuideRequest,
};
use serde_json::Value;

const GUIDES: &str = "guides";

/// Guide repository backed by the `/guides` endpoints.
#[derive(Clone)]
pub struct HttpGuideRepository {
    api: ApiClient,
}

impl HttpGuideRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

/// Rewrites the generic 404 into one naming the guide.
fn guide_not_found(id: &str) -> impl FnOnce(OrientaError) -> OrientaError + '_ {
    move |err| {
        if err.is_not_found() {
            OrientaError::not_found("guide", id)
        } else {
            err
        }
    }
}

#[async_trait]
impl GuideRepository for HttpGuideRepository {
    async fn list(&self) -> Result<GuideCatalog> {
        let entries: Vec<Value> = self.api.get(&[GUIDES]).await?.data.unwrap_or_default();

        let mut catalog = GuideCatalog::default();
        for entry in entries {
            match GuideDto::from_value(entry).and_then(|dto| dto.into_domain(None)) {
                Ok(guide) => catalog.guides.push(guide),
                Err(e) => {
                    tracing::warn!("[GuideApi] Skipping invalid guide: {}", e);
                    catalog.invalid_count += 1;
                }
            }
        }

        tracing::debug!(
            "[GuideApi] Listed {} guides ({} invalid)",
            catalog.guides.len(),
            catalog.invalid_count
        );
        Ok(catalog)
    }

    async fn find_by_id(&self, id: &str) -> Result<Guide> {
        let value: Value = self
            .api
            .get(&[GUIDES, id])
            .await
            .map_err(guide_not_found(id))?
            .into_data("guide")?;
        GuideDto::from_value(value)?.into_domain(Some(id))
    }

    async fn update_studies(&self, id: &str, days: &[DayEntry]) -> Result<Vec<DayEntry>> {
        let body = UpdateStudiesRequest {
            new_studies_list: days,
        };
        let envelope = self
            .api
            .patch::<_, Vec<DayEntry>>(&[GUIDES, id], &body)
            .await
            .map_err(guide_not_found(id))?;

        tracing::debug!("[GuideApi] Saved {} days for guide {}", days.len(), id);
        Ok(envelope.data.unwrap_or_else(|| days.to_vec()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.api
            .delete(&[GUIDES, id])
            .await
            .map_err(guide_not_found(id))?;
        tracing::info!("[GuideApi] Deleted guide {}", id);
        Ok(())
    }
}

#[async_trait]
impl GuideGenerator for HttpGuideRepository {
    async fn validate_topic(&self, topic: &str) -> Result<()> {
        self.api
            .post::<_, Value>(&["validate", "topic"], &TopicRequest { topic })
            .await?;
        Ok(())
    }

    async fn create(&self, request: &GuideRequest) -> Result<Guide> {
        let value: Value = self.api.post(&[GUIDES], request).await?.into_data("guide")?;
        let guide = GuideDto::from_value(value)?.into_domain(None)?;
        tracing::info!(
            "[GuideApi] Generated guide {} with {} days",
            guide.id,
            guide.total_days()
        );
        Ok(guide)
    }
}

//! Guide repository traits.

use async_trait::async_trait;

use super::{DayEntry, Guide, GuideCatalog, GuideRequest};
use crate::error::Result;

/// Persistence boundary for guides owned by the backend.
#[async_trait]
pub trait GuideRepository: Send + Sync {
    /// Lists the current user's guides.
    ///
    /// Entries that fail shape validation are dropped and counted in
    /// the returned catalog instead of failing the whole listing.
    async fn list(&self) -> Result<GuideCatalog>;

    /// Fetches one guide with its full day sequence.
    async fn find_by_id(&self, id: &str) -> Result<Guide>;

    /// Replaces the whole day sequence of a guide.
    ///
    /// Returns the day list as stored by the backend.
    async fn update_studies(&self, id: &str, days: &[DayEntry]) -> Result<Vec<DayEntry>>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Server-side guide generation.
#[async_trait]
pub trait GuideGenerator: Send + Sync {
    /// Asks the backend whether a topic is acceptable for a guide.
    async fn validate_topic(&self, topic: &str) -> Result<()>;

    async fn create(&self, request: &GuideRequest) -> Result<Guide>;
}

//! Session store trait.

use async_trait::async_trait;

use super::model::StoredSession;
use crate::error::Result;

/// Storage for the session that survives process restarts.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored session, or `None` when nobody is logged in.
    async fn load(&self) -> Result<Option<StoredSession>>;

    async fn save(&self, session: &StoredSession) -> Result<()>;

    /// Removes the stored session. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<()>;
}

//! Backend availability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum ApiStatus {
    Online,
    Offline,
}

impl ApiStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

#[async_trait]
pub trait StatusService: Send + Sync {
    /// Probes the backend. An answering but degraded service reports
    /// `Offline`; an unreachable one is a transport error.
    async fn status(&self) -> Result<ApiStatus>;
}

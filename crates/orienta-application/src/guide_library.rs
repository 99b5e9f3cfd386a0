//! Dashboard operations over the user's guides.

use crate::message_center::MessageCenter;
use orienta_core::error::{OrientaError, Result};
use orienta_core::guide::{GuideRepository, GuideShelves};
use serde::Serialize;
use std::sync::Arc;

pub const INVALID_GUIDES_TEXT: &str = "Some guide data is invalid.";
pub const CONNECTION_ERROR_TEXT: &str = "Connection error. Check your internet.";
pub const FETCH_FAILED_TEXT: &str = "Could not fetch guides. Try again.";
pub const DELETE_SUCCESS_TEXT: &str = "Guide deleted.";
pub const DELETE_FAILED_TEXT: &str = "Could not delete guide. Try again.";

/// Result of a delete request as the dashboard reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub ok: bool,
    pub error: Option<String>,
}

pub struct GuideLibrary {
    repository: Arc<dyn GuideRepository>,
    messages: MessageCenter,
}

impl GuideLibrary {
    pub fn new(repository: Arc<dyn GuideRepository>, messages: MessageCenter) -> Self {
        Self {
            repository,
            messages,
        }
    }

    /// Lists guides split into in-progress and completed.
    ///
    /// Invalid entries are dropped with a single notice; the rest are
    /// still returned.
    pub async fn fetch_shelves(&self) -> Result<GuideShelves> {
        let catalog = match self.repository.list().await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("[GuideLibrary] Failed to list guides: {}", e);
                let text = if e.is_transport() {
                    CONNECTION_ERROR_TEXT
                } else {
                    FETCH_FAILED_TEXT
                };
                self.messages.error(text);
                return Err(e);
            }
        };

        if catalog.invalid_count > 0 {
            tracing::warn!(
                "[GuideLibrary] Dropped {} invalid guide entries",
                catalog.invalid_count
            );
            self.messages.error(INVALID_GUIDES_TEXT);
        }

        let shelves = GuideShelves::from(catalog);
        tracing::debug!(
            "[GuideLibrary] {} in progress, {} completed",
            shelves.in_progress.len(),
            shelves.completed.len()
        );
        Ok(shelves)
    }

    pub async fn delete_guide(&self, guide_id: &str) -> DeleteOutcome {
        if guide_id.trim().is_empty() {
            let err = OrientaError::validation("Guide id is empty.");
            return DeleteOutcome {
                ok: false,
                error: Some(err.user_message()),
            };
        }

        match self.repository.delete(guide_id).await {
            Ok(()) => {
                tracing::info!("[GuideLibrary] Deleted guide {}", guide_id);
                self.messages.success(DELETE_SUCCESS_TEXT);
                DeleteOutcome {
                    ok: true,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!("[GuideLibrary] Failed to delete guide {}: {}", guide_id, e);
                self.messages.error(DELETE_FAILED_TEXT);
                DeleteOutcome {
                    ok: false,
                    error: Some(e.user_message()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockGuideRepository, days, guide};
    use orienta_core::guide::{GuideCatalog, GuideStatus};

    fn library(repo: &Arc<MockGuideRepository>) -> (GuideLibrary, MessageCenter) {
        let messages = MessageCenter::new();
        (GuideLibrary::new(repo.clone(), messages.clone()), messages)
    }

    #[tokio::test]
    async fn test_shelves_split_by_status() {
        let repo = Arc::new(
            MockGuideRepository::new()
                .with_guide(guide("a", GuideStatus::Studying, days(2)))
                .with_guide(guide("b", GuideStatus::Completed, days(2))),
        );
        let (library, messages) = library(&repo);

        let shelves = library.fetch_shelves().await.unwrap();
        assert_eq!(shelves.in_progress.len(), 1);
        assert_eq!(shelves.completed.len(), 1);
        assert!(messages.pending().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_entries_produce_one_notice() {
        let repo = Arc::new(MockGuideRepository::new());
        repo.set_list_result(Ok(GuideCatalog {
            guides: vec![guide("a", GuideStatus::Studying, days(1))],
            invalid_count: 3,
        }));
        let (library, messages) = library(&repo);

        let shelves = library.fetch_shelves().await.unwrap();
        assert_eq!(shelves.in_progress.len(), 1);
        assert_eq!(shelves.invalid_count, 3);

        let notices = messages.pending();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].text, INVALID_GUIDES_TEXT);
    }

    #[tokio::test]
    async fn test_transport_failure_mentions_connection() {
        let repo = Arc::new(MockGuideRepository::new());
        repo.set_list_result(Err(OrientaError::transport("connection refused")));
        let (library, messages) = library(&repo);

        assert!(library.fetch_shelves().await.unwrap_err().is_transport());
        assert_eq!(messages.pending()[0].text, CONNECTION_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_other_failure_uses_generic_text() {
        let repo = Arc::new(MockGuideRepository::new());
        repo.set_list_result(Err(OrientaError::unauthorized("Session expired.", "Log in.")));
        let (library, messages) = library(&repo);

        assert!(library.fetch_shelves().await.is_err());
        assert_eq!(messages.pending()[0].text, FETCH_FAILED_TEXT);
    }

    #[tokio::test]
    async fn test_delete_reports_both_outcomes() {
        let repo = Arc::new(
            MockGuideRepository::new().with_guide(guide("a", GuideStatus::Studying, days(1))),
        );
        let (library, messages) = library(&repo);

        let outcome = library.delete_guide("a").await;
        assert_eq!(
            outcome,
            DeleteOutcome {
                ok: true,
                error: None
            }
        );
        assert_eq!(repo.deleted(), vec!["a".to_string()]);

        repo.fail_delete(OrientaError::Rejected {
            status: 500,
            name: "InternalServerError".to_string(),
            message: "Unexpected error.".to_string(),
            action: "Try again later.".to_string(),
        });
        let outcome = library.delete_guide("b").await;
        assert!(!outcome.ok);
        assert_eq!(outcome.error.as_deref(), Some("Unexpected error."));

        let texts: Vec<String> = messages.pending().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec![DELETE_SUCCESS_TEXT, DELETE_FAILED_TEXT]);
    }

    #[tokio::test]
    async fn test_blank_id_is_not_sent() {
        let repo = Arc::new(MockGuideRepository::new());
        let (library, _) = library(&repo);

        let outcome = library.delete_guide("  ").await;
        assert!(!outcome.ok);
        assert!(repo.deleted().is_empty());
    }
}

//! A single guide opened for study.
//!
//! `StudySession` loads one guide, refuses to work with a payload that
//! fails shape validation, and routes day toggles through an
//! [`AutosaveCoordinator`].

use crate::autosave::{AutosaveCoordinator, AutosavePhase, AutosaveStatus};
use crate::message_center::MessageCenter;
use orienta_core::config::ClientConfig;
use orienta_core::error::{OrientaError, RELOAD_ACTION, Result};
use orienta_core::guide::{Guide, GuideRepository, Progress};
use std::sync::Arc;
use tokio::sync::watch;

/// Guide view state: the loaded guide plus its autosave coordinator.
///
/// Dropping the session closes the coordinator, cancelling any pending
/// save.
pub struct StudySession {
    guide: Guide,
    autosave: AutosaveCoordinator,
}

impl StudySession {
    /// Fetches and validates a guide, then seeds autosave from its days.
    ///
    /// A malformed payload is reported as a validation error whose action
    /// asks the user to reload; nothing is partially rendered.
    pub async fn open(
        guide_id: &str,
        repository: Arc<dyn GuideRepository>,
        messages: MessageCenter,
        config: &ClientConfig,
    ) -> Result<Self> {
        tracing::debug!("[StudySession] Loading guide {}", guide_id);

        let guide = repository
            .find_by_id(guide_id)
            .await
            .and_then(|guide| {
                guide.validate()?;
                if guide.daily_study.is_empty() {
                    return Err(OrientaError::malformed("guide has no study days"));
                }
                Ok(guide)
            })
            .map_err(|e| match e {
                OrientaError::MalformedPayload(reason) => {
                    tracing::warn!("[StudySession] Guide {} is malformed: {}", guide_id, reason);
                    OrientaError::Validation {
                        message: "This guide could not be loaded because its data is invalid."
                            .to_string(),
                        action: RELOAD_ACTION.to_string(),
                    }
                }
                other => other,
            })?;

        let autosave = AutosaveCoordinator::new(
            guide.id.clone(),
            guide.daily_study.clone(),
            repository,
            messages,
            config,
        )?;

        tracing::info!(
            "[StudySession] Opened guide '{}' ({} days)",
            guide.title,
            guide.total_days()
        );
        Ok(Self { guide, autosave })
    }

    /// The guide with its days as currently toggled locally.
    pub fn guide(&self) -> Guide {
        Guide {
            daily_study: self.autosave.days(),
            ..self.guide.clone()
        }
    }

    pub fn guide_id(&self) -> &str {
        &self.guide.id
    }

    pub fn progress(&self) -> Progress {
        Progress::from_days(&self.autosave.days())
    }

    /// Sets the completion flag of a 1-based day number.
    pub fn toggle_day(&self, day_number: u32, completed: bool) -> Result<AutosavePhase> {
        let index = self.index_of(day_number)?;
        self.autosave.toggle_day(index, completed)
    }

    /// Flips the completion flag of a 1-based day number.
    pub fn flip_day(&self, day_number: u32) -> Result<AutosavePhase> {
        let index = self.index_of(day_number)?;
        let completed = self
            .autosave
            .days()
            .get(index)
            .map(|day| day.completed)
            .unwrap_or_default();
        self.autosave.toggle_day(index, !completed)
    }

    fn index_of(&self, day_number: u32) -> Result<usize> {
        self.guide.position_of_day(day_number).ok_or_else(|| {
            OrientaError::validation(format!("Day {day_number} does not exist in this guide."))
        })
    }

    pub fn status(&self) -> AutosaveStatus {
        self.autosave.status()
    }

    pub fn subscribe(&self) -> watch::Receiver<AutosaveStatus> {
        self.autosave.subscribe()
    }

    pub async fn wait_until_settled(&self) -> AutosaveStatus {
        self.autosave.wait_until_settled().await
    }

    pub fn close(&self) {
        self.autosave.close();
    }
}

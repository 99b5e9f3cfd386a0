//! Guide domain model.
//!
//! A guide is generated and owned by the backend. The client keeps a
//! transient copy and only ever changes the `completed` flag of its days.

use crate::error::{OrientaError, Result};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle status of a guide.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GuideStatus {
    Studying,
    Completed,
}

/// One day's worth of study content plus its completion flag.
///
/// Field names match the wire format so the day list can be sent back
/// verbatim in a batch save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// 1-based day number
    pub day: u32,
    pub title: String,
    pub goal: String,
    /// Terms or questions to research
    #[serde(default)]
    pub theoretical_research: Vec<String>,
    pub practical_activity: String,
    pub learning_verification: String,
    #[serde(default)]
    pub completed: bool,
}

/// A generated multi-day study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guide {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub status: GuideStatus,
    /// Creation timestamp as reported by the backend
    pub created_at: String,
    pub completed_at: Option<String>,
    pub owner: Option<String>,
    /// Ordered day sequence; stable in length and order once created
    pub daily_study: Vec<DayEntry>,
}

impl Guide {
    pub fn total_days(&self) -> usize {
        self.daily_study.len()
    }

    pub fn completed_days(&self) -> usize {
        self.daily_study.iter().filter(|day| day.completed).count()
    }

    pub fn is_studying(&self) -> bool {
        self.status == GuideStatus::Studying
    }

    /// Position of a 1-based day number inside the day sequence.
    pub fn position_of_day(&self, day: u32) -> Option<usize> {
        self.daily_study.iter().position(|entry| entry.day == day)
    }

    /// Checks the shape constraints a guide must satisfy before the
    /// client trusts it.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(OrientaError::malformed("guide id is empty"));
        }
        if self.title.trim().is_empty() {
            return Err(OrientaError::malformed(format!(
                "guide '{}' has an empty title",
                self.id
            )));
        }
        validate_day_sequence(&self.daily_study)
    }
}

/// Day numbers must start at 1 or above and be strictly increasing.
pub fn validate_day_sequence(days: &[DayEntry]) -> Result<()> {
    let mut previous = 0;
    for entry in days {
        if entry.day == 0 {
            return Err(OrientaError::malformed("day numbers are 1-based"));
        }
        if entry.day <= previous {
            return Err(OrientaError::malformed(format!(
                "day {} appears after day {}",
                entry.day, previous
            )));
        }
        previous = entry.day;
    }
    Ok(())
}

/// Result of listing guides: the entries that passed validation and
/// how many were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuideCatalog {
    pub guides: Vec<Guide>,
    pub invalid_count: usize,
}

/// Guides split the way the dashboard shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuideShelves {
    pub in_progress: Vec<Guide>,
    pub completed: Vec<Guide>,
    /// Entries dropped because they failed shape validation
    pub invalid_count: usize,
}

impl GuideShelves {
    /// Sorts guides onto shelves by status.
    pub fn from_guides(guides: Vec<Guide>, invalid_count: usize) -> Self {
        let (in_progress, completed) = guides.into_iter().partition(Guide::is_studying);
        Self {
            in_progress,
            completed,
            invalid_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.in_progress.is_empty() && self.completed.is_empty()
    }
}

impl From<GuideCatalog> for GuideShelves {
    fn from(catalog: GuideCatalog) -> Self {
        Self::from_guides(catalog.guides, catalog.invalid_count)
    }
}

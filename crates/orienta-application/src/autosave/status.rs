//! Observable autosave state.

use orienta_core::error::OrientaError;
use serde::Serialize;

/// Where a coordinator stands relative to the last-synced snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AutosavePhase {
    /// Local days equal the snapshot.
    Idle,
    /// Local days differ from the snapshot and no write is in flight.
    Dirty,
    /// A batch write is in flight.
    Saving,
}

impl std::fmt::Display for AutosavePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AutosavePhase::Idle => "saved",
            AutosavePhase::Dirty => "unsaved changes",
            AutosavePhase::Saving => "saving",
        };
        f.write_str(label)
    }
}

/// Snapshot of a coordinator, published on every state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutosaveStatus {
    pub phase: AutosavePhase,
    /// A quiet-period timer is armed.
    pub timer_pending: bool,
    /// Successful batch writes so far.
    pub completed_saves: u64,
    /// Error of the most recent write, cleared by the next success.
    pub last_failure: Option<OrientaError>,
    pub closed: bool,
}

impl AutosaveStatus {
    pub(crate) fn initial() -> Self {
        Self {
            phase: AutosavePhase::Idle,
            timer_pending: false,
            completed_saves: 0,
            last_failure: None,
            closed: false,
        }
    }

    /// Nothing is scheduled and nothing is in flight.
    ///
    /// A coordinator can be settled while `Dirty`: after a failed write
    /// with no later toggle, no retry is scheduled.
    pub fn is_settled(&self) -> bool {
        !self.timer_pending && self.phase != AutosavePhase::Saving
    }
}

//! Debounced batch autosave of day completion flags.
//!
//! Toggles update the local day list immediately. A quiet-period timer
//! coalesces bursts into one write of the whole list, and a write only
//! happens when the local list differs from the last-synced snapshot.
//!
//! ```text
//! Idle --toggle (differs)--> Dirty --quiet period--> Saving --ok--> Idle
//!  ^                           |                        |
//!  +--toggle (equals snapshot)-+                        +--diverged--> Dirty
//! ```
//!
//! State lives behind a `std::sync::Mutex` that is never held across an
//! `.await`. Timers are spawned tasks tagged with an epoch: re-arming or
//! cancelling bumps the epoch and stale timers exit when they wake. A
//! timer is never aborted, so cancellation can not land inside a write.

use super::status::{AutosavePhase, AutosaveStatus};
use crate::message_center::MessageCenter;
use orienta_core::config::ClientConfig;
use orienta_core::error::{OrientaError, Result};
use orienta_core::guide::{DayEntry, GuideRepository};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Serialized day list, used purely for change detection.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint(String);

impl Fingerprint {
    fn of(days: &[DayEntry]) -> Result<Self> {
        Ok(Self(serde_json::to_string(days)?))
    }
}

struct SyncState {
    days: Vec<DayEntry>,
    /// Fingerprint of `days`, refreshed on every toggle.
    local: Fingerprint,
    /// Fingerprint of the last payload the backend accepted.
    snapshot: Fingerprint,
    timer_epoch: u64,
    timer_pending: bool,
    saving: bool,
    /// Bumped on every accepted toggle.
    revision: u64,
    /// `revision` when the in-flight write was taken.
    save_revision: u64,
    completed_saves: u64,
    last_failure: Option<OrientaError>,
    closed: bool,
}

impl SyncState {
    fn phase(&self) -> AutosavePhase {
        if self.saving {
            AutosavePhase::Saving
        } else if self.local != self.snapshot {
            AutosavePhase::Dirty
        } else {
            AutosavePhase::Idle
        }
    }

    fn cancel_timer(&mut self) {
        self.timer_epoch += 1;
        self.timer_pending = false;
    }
}

struct Shared {
    guide_id: String,
    quiet_period: Duration,
    repository: Arc<dyn GuideRepository>,
    messages: MessageCenter,
    state: Mutex<SyncState>,
    status: watch::Sender<AutosaveStatus>,
    shutdown: CancellationToken,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &SyncState) {
        self.status.send_replace(AutosaveStatus {
            phase: state.phase(),
            timer_pending: state.timer_pending,
            completed_saves: state.completed_saves,
            last_failure: state.last_failure.clone(),
            closed: state.closed,
        });
    }

    /// Starts a fresh quiet period, replacing any pending one.
    fn arm_timer(self: &Arc<Self>, state: &mut SyncState) {
        state.timer_epoch += 1;
        state.timer_pending = true;
        let epoch = state.timer_epoch;

        let shared = Arc::clone(self);
        tokio::spawn(async move {
            tokio::select! {
                _ = shared.shutdown.cancelled() => {}
                _ = tokio::time::sleep(shared.quiet_period) => shared.on_timer(epoch).await,
            }
        });
    }

    async fn on_timer(self: &Arc<Self>, epoch: u64) {
        let (payload, fingerprint) = {
            let mut state = self.lock();
            if state.closed || state.timer_epoch != epoch {
                return;
            }
            state.timer_pending = false;

            if state.saving {
                // The write in flight re-arms once it resolves.
                tracing::debug!(
                    "[Autosave] Quiet period ended during a save of guide {}; deferring",
                    self.guide_id
                );
                self.publish(&state);
                return;
            }
            if state.local == state.snapshot {
                self.publish(&state);
                return;
            }

            state.saving = true;
            state.save_revision = state.revision;
            self.publish(&state);
            (state.days.clone(), state.local.clone())
        };

        tracing::debug!(
            "[Autosave] Saving {} days of guide {}",
            payload.len(),
            self.guide_id
        );
        let result = self.repository.update_studies(&self.guide_id, &payload).await;
        self.finish_save(fingerprint, result);
    }

    fn finish_save(self: &Arc<Self>, sent: Fingerprint, result: Result<Vec<DayEntry>>) {
        let mut state = self.lock();
        state.saving = false;

        match result {
            Ok(_) => {
                state.snapshot = sent;
                state.completed_saves += 1;
                state.last_failure = None;
                tracing::info!("[Autosave] Saved progress of guide {}", self.guide_id);

                if !state.closed && !state.timer_pending && state.local != state.snapshot {
                    tracing::debug!("[Autosave] Local days changed during the save; scheduling another");
                    self.arm_timer(&mut state);
                }
            }
            Err(err) => {
                tracing::warn!(
                    "[Autosave] Saving guide {} failed: {}",
                    self.guide_id,
                    err
                );
                // Only a toggle made during the write earns a new cycle.
                let toggled_in_flight = state.revision != state.save_revision;
                if !state.closed
                    && !state.timer_pending
                    && toggled_in_flight
                    && state.local != state.snapshot
                {
                    self.arm_timer(&mut state);
                }

                self.messages.error(format!(
                    "Could not save your progress: {}",
                    err.user_message()
                ));
                state.last_failure = Some(err);
            }
        }

        self.publish(&state);
    }
}

/// Keeps the backend's completion flags eventually consistent with local
/// toggles of one guide.
///
/// At most one write is in flight at any time, and nothing is written
/// while the local list equals the last-synced snapshot. Dropping the
/// coordinator closes it.
///
/// Must be used from within a tokio runtime.
pub struct AutosaveCoordinator {
    shared: Arc<Shared>,
}

impl AutosaveCoordinator {
    /// Seeds local state and snapshot from freshly loaded days.
    pub fn new(
        guide_id: impl Into<String>,
        days: Vec<DayEntry>,
        repository: Arc<dyn GuideRepository>,
        messages: MessageCenter,
        config: &ClientConfig,
    ) -> Result<Self> {
        let fingerprint = Fingerprint::of(&days)?;
        let (status, _) = watch::channel(AutosaveStatus::initial());

        let state = SyncState {
            days,
            local: fingerprint.clone(),
            snapshot: fingerprint,
            timer_epoch: 0,
            timer_pending: false,
            saving: false,
            revision: 0,
            save_revision: 0,
            completed_saves: 0,
            last_failure: None,
            closed: false,
        };

        Ok(Self {
            shared: Arc::new(Shared {
                guide_id: guide_id.into(),
                quiet_period: config.quiet_period(),
                repository,
                messages,
                state: Mutex::new(state),
                status,
                shutdown: CancellationToken::new(),
            }),
        })
    }

    pub fn guide_id(&self) -> &str {
        &self.shared.guide_id
    }

    /// Current local days, including unsaved toggles.
    pub fn days(&self) -> Vec<DayEntry> {
        self.shared.lock().days.clone()
    }

    /// Sets the completion flag of the day at `index` (0-based).
    ///
    /// The change is applied immediately. Returns the resulting phase:
    /// `Idle` if the list is back to the snapshot, `Dirty` once a save is
    /// scheduled, or `Saving` if a write is already in flight.
    pub fn toggle_day(&self, index: usize, completed: bool) -> Result<AutosavePhase> {
        let shared = &self.shared;
        let mut state = shared.lock();
        if state.closed {
            return Err(OrientaError::validation(
                "This guide view is closed; reopen it to keep studying.",
            ));
        }

        let total = state.days.len();
        let Some(entry) = state.days.get_mut(index) else {
            return Err(OrientaError::validation(format!(
                "Day index {index} is out of range for a guide with {total} days."
            )));
        };
        let previous = entry.completed;
        entry.completed = completed;

        match Fingerprint::of(&state.days) {
            Ok(local) => state.local = local,
            Err(e) => {
                state.days[index].completed = previous;
                return Err(e);
            }
        }
        state.revision += 1;

        if state.local == state.snapshot {
            if state.timer_pending {
                tracing::debug!(
                    "[Autosave] Guide {} is back to its saved state; cancelling timer",
                    shared.guide_id
                );
            }
            state.cancel_timer();
        } else {
            shared.arm_timer(&mut state);
        }

        let phase = state.phase();
        shared.publish(&state);
        Ok(phase)
    }

    pub fn status(&self) -> AutosaveStatus {
        self.shared.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AutosaveStatus> {
        self.shared.status.subscribe()
    }

    /// Resolves once no timer is armed and no write is in flight.
    pub async fn wait_until_settled(&self) -> AutosaveStatus {
        let mut rx = self.shared.status.subscribe();
        match rx.wait_for(AutosaveStatus::is_settled).await {
            Ok(status) => status.clone(),
            Err(_) => self.status(),
        }
    }

    /// Cancels any pending timer and rejects later toggles.
    ///
    /// A write already in flight runs to completion.
    pub fn close(&self) {
        let mut state = self.shared.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        state.cancel_timer();
        self.shared.shutdown.cancel();
        self.shared.publish(&state);
        tracing::debug!("[Autosave] Closed autosave of guide {}", self.shared.guide_id);
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }
}

impl Drop for AutosaveCoordinator {
    fn drop(&mut self) {
        self.close();
    }
}

//! Application layer of the Orienta client.
//!
//! Wires the core service traits into the flows a front end drives:
//! restoring and ending sessions, listing and deleting guides, generating
//! new ones, and studying a guide with debounced autosave of day toggles.

pub mod auth_context;
pub mod autosave;
pub mod guide_generation;
pub mod guide_library;
pub mod message_center;
pub mod study_session;

#[cfg(test)]
mod testing;

pub use auth_context::{AuthContext, AuthState};
pub use autosave::{AutosaveCoordinator, AutosavePhase, AutosaveStatus};
pub use guide_generation::GuideGeneration;
pub use guide_library::{DeleteOutcome, GuideLibrary};
pub use message_center::MessageCenter;
pub use study_session::StudySession;

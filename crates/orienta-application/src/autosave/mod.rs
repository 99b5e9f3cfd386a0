//! Debounced autosave of day completion flags.

mod coordinator;
mod status;

pub use coordinator::AutosaveCoordinator;
pub use status::{AutosavePhase, AutosaveStatus};

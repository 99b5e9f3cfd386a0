//! Guide domain module.
//!
//! # Module Structure
//!
//! - `model`: `Guide`, `DayEntry`, `GuideStatus`, shelves and catalog types
//! - `progress`: completion summary of a day sequence
//! - `request`: the generation request forwarded to the backend
//! - `repository`: persistence and generation traits
//!
//! # Usage
//!
//! ```ignore
//! use orienta_core::guide::{Guide, DayEntry, GuideRepository};
//! ```

mod model;
mod progress;
mod repository;
pub mod request;

// Re-export public API
pub use model::{
    DayEntry, Guide, GuideCatalog, GuideShelves, GuideStatus, validate_day_sequence,
};
pub use progress::Progress;
pub use repository::{GuideGenerator, GuideRepository};
pub use request::{GuideRequest, KnowledgeLevel};

#[cfg(test)]
pub(crate) use model::fixtures;

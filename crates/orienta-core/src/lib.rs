//! Domain layer of the Orienta study guide client.
//!
//! Holds the models shared by every other crate, the single error type
//! and the service traits implemented by the interaction and
//! infrastructure layers.

pub mod config;
pub mod error;
pub mod guide;
pub mod notice;
pub mod state;
pub mod status;
pub mod user;

// Re-export common error type
pub use error::{OrientaError, Result};

//! User domain module.
//!
//! This module contains account models and the authentication service
//! boundary.
//!
//! # Module Structure
//!
//! - `model`: profile, credentials and session models
//! - `service`: `AuthService` trait

mod model;
mod service;

// Re-export public API
pub use model::{AuthSession, Credentials, DEFAULT_SESSION_TTL_SECS, Registration, UserProfile};
pub use service::AuthService;

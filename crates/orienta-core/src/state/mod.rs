//! Persisted client state.

mod model;
mod repository;

pub use model::StoredSession;
pub use repository::SessionStore;

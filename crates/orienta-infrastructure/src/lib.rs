//! Filesystem side of the Orienta client: path resolution, configuration
//! loading and the persisted login session.

pub mod config_service;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use config_service::{ConfigService, EnvOverrides};
pub use paths::OrientaPaths;
pub use session_store::FileSessionStore;

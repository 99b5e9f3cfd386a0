//! Client configuration model.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default backend location used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/v1";

/// Quiet period observed between the last toggle and the batch save.
pub const DEFAULT_AUTOSAVE_QUIET_PERIOD_MS: u64 = 2000;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Root configuration stored in `config.toml`.
///
/// Every field has a default so a partial file (or no file at all)
/// still yields a usable configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, including the version prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Trailing-edge debounce delay for day completion saves.
    #[serde(default = "default_autosave_quiet_period_ms")]
    pub autosave_quiet_period_ms: u64,
    /// Fallback filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_autosave_quiet_period_ms() -> u64 {
    DEFAULT_AUTOSAVE_QUIET_PERIOD_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            autosave_quiet_period_ms: default_autosave_quiet_period_ms(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.autosave_quiet_period_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the base URL without a trailing slash.
    pub fn normalized_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

//! Unified path management for Orienta files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/orienta/           # Config directory
//! ├── config.toml              # Client configuration
//! ├── session.json             # Persisted login session (0600)
//! └── logs/                    # Application logs
//!     └── orienta.log.YYYY-MM-DD
//! ```

use orienta_core::error::{OrientaError, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "orienta";

/// Resolves every file location from a single base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientaPaths {
    base: PathBuf,
}

impl OrientaPaths {
    /// Uses the platform configuration directory (XDG on Linux).
    pub fn resolve() -> Result<Self> {
        let config_root = dirs::config_dir()
            .ok_or_else(|| OrientaError::config("Cannot find the user configuration directory"))?;
        Ok(Self::with_base(config_root.join(APP_DIR_NAME)))
    }

    /// Roots every path at `base`. Used by tests and `--config-dir`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn config_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join("config.toml")
    }

    /// Path to the persisted session.
    ///
    /// The file holds the session cookie, so it is written with 0600
    /// permissions on Unix.
    pub fn session_file(&self) -> PathBuf {
        self.base.join("session.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base.join("logs")
    }

    /// Creates the logs directory if needed and returns it.
    pub fn ensure_logs_dir(&self) -> Result<PathBuf> {
        let dir = self.logs_dir();
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

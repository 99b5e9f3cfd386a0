//! Configuration service implementation.
//!
//! Loads `ClientConfig` from `config.toml`, layers environment overrides
//! on top and caches the result.

use crate::paths::OrientaPaths;
use crate::storage::{AtomicFile, FileFormat};
use orienta_core::config::ClientConfig;
use orienta_core::error::{OrientaError, Result};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

pub const ENV_API_URL: &str = "ORIENTA_API_URL";
pub const ENV_AUTOSAVE_MS: &str = "ORIENTA_AUTOSAVE_MS";
pub const ENV_LOG: &str = "ORIENTA_LOG";

/// Environment values that take precedence over `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub api_base_url: Option<String>,
    pub autosave_quiet_period_ms: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            api_base_url: non_empty(ENV_API_URL),
            autosave_quiet_period_ms: non_empty(ENV_AUTOSAVE_MS),
            log_level: non_empty(ENV_LOG),
        }
    }

    pub fn apply(&self, config: &mut ClientConfig) -> Result<()> {
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = &self.autosave_quiet_period_ms {
            config.autosave_quiet_period_ms = raw.trim().parse().map_err(|_| {
                OrientaError::config(format!(
                    "{ENV_AUTOSAVE_MS} must be a number of milliseconds, got '{raw}'"
                ))
            })?;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.trim().to_string();
        }
        Ok(())
    }
}

/// Configuration service that loads and caches the client configuration.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicFile<ClientConfig>>,
    overrides: EnvOverrides,
    /// Effective configuration (file + overrides), loaded lazily.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &OrientaPaths, overrides: EnvOverrides) -> Self {
        Self {
            file: Arc::new(AtomicFile::new(paths.config_file(), FileFormat::Toml)),
            overrides,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    /// Gets the effective configuration, loading from file if not cached.
    ///
    /// A missing file yields the defaults; a file that fails to parse is
    /// an error rather than a silent fallback.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.file_config()?;
        self.overrides.apply(&mut loaded)?;
        tracing::debug!(
            "[ConfigService] Loaded config from {} (api: {})",
            self.file.path().display(),
            loaded.api_base_url
        );

        {
            let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Configuration as stored on disk, without environment overrides.
    pub fn file_config(&self) -> Result<ClientConfig> {
        Ok(self.file.load()?.unwrap_or_default())
    }

    /// Applies `f` to the stored configuration and saves it atomically.
    pub fn update<F>(&self, f: F) -> Result<ClientConfig>
    where
        F: FnOnce(&mut ClientConfig),
    {
        let mut stored = self.file_config()?;
        f(&mut stored);
        self.save(&stored)?;
        Ok(stored)
    }

    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        self.file.save(config)?;
        tracing::info!("[ConfigService] Saved config to {}", self.file.path().display());
        self.invalidate_cache();
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }
}

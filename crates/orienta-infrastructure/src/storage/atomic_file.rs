//! Atomic file operations for small serde documents.
//!
//! Writes go to a hidden temporary file in the same directory, are
//! fsynced, and then renamed over the target, so readers only ever see
//! the old or the new content.

use orienta_core::error::{OrientaError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    fn encode<T: Serialize>(self, data: &T) -> Result<String> {
        match self {
            FileFormat::Toml => Ok(toml::to_string_pretty(data)?),
            FileFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        }
    }

    fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            FileFormat::Toml => Ok(toml::from_str(content)?),
            FileFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

/// A handle to a file that is always replaced atomically.
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    /// Unix permission bits applied to the file on save.
    mode: Option<u32>,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            mode: None,
            _phantom: PhantomData,
        }
    }

    /// Restricts the saved file to the given permission bits (Unix only).
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        self.format.decode(&content).map(Some)
    }

    /// Serializes `data` and atomically replaces the file.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = self.format.encode(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = self.create_temp(&tmp_path)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Deletes the file. A missing file is not an error.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn create_temp(&self, tmp_path: &Path) -> Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            if let Some(mode) = self.mode {
                options.mode(mode);
            }
        }

        let file = options.open(tmp_path)?;

        // `mode` only applies on creation; a stale temp file keeps its bits.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = self.mode {
                fs::set_permissions(tmp_path, fs::Permissions::from_mode(mode))?;
            }
        }

        Ok(file)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| OrientaError::io("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| OrientaError::io("Path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

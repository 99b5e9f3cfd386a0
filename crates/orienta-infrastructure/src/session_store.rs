//! File-backed session store.

use crate::paths::OrientaPaths;
use crate::storage::{AtomicFile, FileFormat};
use orienta_core::error::{OrientaError, Result};
use orienta_core::state::{SessionStore, StoredSession};
use std::sync::Arc;
use tokio::sync::Mutex;

const SESSION_FILE_MODE: u32 = 0o600;

/// Persists the login session to `session.json`.
///
/// File I/O runs on the blocking pool; the mutex serializes writers
/// inside one process.
#[derive(Clone)]
pub struct FileSessionStore {
    file: Arc<AtomicFile<StoredSession>>,
    lock: Arc<Mutex<()>>,
}

impl FileSessionStore {
    pub fn new(paths: &OrientaPaths) -> Self {
        let file = AtomicFile::new(paths.session_file(), FileFormat::Json)
            .with_mode(SESSION_FILE_MODE);
        Self {
            file: Arc::new(file),
            lock: Arc::new(Mutex::new(())),
        }
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&AtomicFile<StoredSession>) -> Result<T> + Send + 'static,
    {
        let _guard = self.lock.lock().await;
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(file.as_ref()))
            .await
            .map_err(|e| OrientaError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait::async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>> {
        self.run_blocking(|file| file.load()).await
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        let session = session.clone();
        self.run_blocking(move |file| file.save(&session)).await?;
        tracing::debug!("[SessionStore] Session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.run_blocking(|file| file.remove()).await?;
        tracing::debug!("[SessionStore] Session cleared");
        Ok(())
    }
}

//! Filesystem store for uploaded client photos.
//!
//! Files live flat under a single upload root and are addressed by their
//! generated filename only; resolution never follows path separators, so a
//! request cannot escape the root.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::shared::validation::{is_safe_filename, sanitize_filename};

/// Persistence boundary for photo files
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Write the payload under a collision-resistant generated name and
    /// return that name. Existing files are never touched.
    async fn store(&self, data: &[u8], original_filename: &str) -> Result<String>;

    /// Read a stored file back. Unknown names, unreadable files and names
    /// that would resolve outside the upload root all map to "not found".
    async fn load(&self, filename: &str) -> Result<Vec<u8>>;

    /// Best-effort removal; deleting a missing file is an Ok no-op.
    async fn delete(&self, filename: &str) -> Result<()>;
}

/// Upload store over a local directory
pub struct LocalUploadStore {
    root: PathBuf,
}

impl LocalUploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the upload root if it does not exist yet
    pub async fn ensure_root_exists(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf> {
        if !is_safe_filename(filename) {
            return Err(AppError::NotFound(format!(
                "El archivo '{}' no existe",
                filename
            )));
        }
        Ok(self.root.join(filename))
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn store(&self, data: &[u8], original_filename: &str) -> Result<String> {
        let nombre = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_filename));
        let path = self.root.join(&nombre);

        tokio::fs::write(&path, data).await?;

        debug!("Stored upload '{}' ({} bytes)", nombre, data.len());
        Ok(nombre)
    }

    async fn load(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.resolve(filename)?;

        tokio::fs::read(&path)
            .await
            .map_err(|_| AppError::NotFound(format!("El archivo '{}' no existe", filename)))
    }

    async fn delete(&self, filename: &str) -> Result<()> {
        let Ok(path) = self.resolve(filename) else {
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed upload '{}'", filename);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!("Could not remove upload '{}': {}", filename, e);
                Ok(())
            }
        }
    }
}

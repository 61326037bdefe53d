//! Persistence backends for the signed-in identity.

use crate::errors::{AppError, AppResult};
use crate::models::Identity;
use std::fs;
use std::path::PathBuf;

/// Where the session blob lives between runs.
pub trait SessionStorage {
    fn load(&self) -> AppResult<Option<Identity>>;
    fn save(&mut self, identity: &Identity) -> AppResult<()>;
    fn clear(&mut self) -> AppResult<()>;
}

/// One JSON file holding the identity; absence means signed out.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> AppResult<Option<Identity>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let identity = serde_json::from_str(&content).map_err(|e| {
            AppError::Session(format!("unreadable session file {}: {e}", self.path.display()))
        })?;
        Ok(Some(identity))
    }

    fn save(&mut self, identity: &Identity) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(identity)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Keeps the serialized blob in memory, mainly for tests.
#[derive(Default)]
pub struct MemorySessionStorage {
    blob: Option<String>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_blob(blob: &str) -> Self {
        Self {
            blob: Some(blob.to_string()),
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> AppResult<Option<Identity>> {
        match &self.blob {
            None => Ok(None),
            Some(b) => serde_json::from_str(b)
                .map(Some)
                .map_err(|e| AppError::Session(e.to_string())),
        }
    }

    fn save(&mut self, identity: &Identity) -> AppResult<()> {
        self.blob = Some(serde_json::to_string(identity)?);
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        self.blob = None;
        Ok(())
    }
}

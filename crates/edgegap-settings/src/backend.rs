//! Storage backends for the settings document.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::SettingsError;

/// Where the settings document lives.
///
/// Backends only move text. Encoding and decoding the record is the
/// store's job, so every backend persists the same TOML document.
pub trait ConfigBackend: Send + Sync + 'static {
    /// Returns the stored document, or `None` if nothing was stored yet.
    fn read(&self) -> Result<Option<String>, SettingsError>;

    /// Replaces the stored document.
    fn write(&self, document: &str) -> Result<(), SettingsError>;
}

// ---------------------------------------------------------------------------
// FileBackend
// ---------------------------------------------------------------------------

/// A TOML file on disk, typically `Config/Edgegap.toml` under the project.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Relative location of the settings file inside a project.
    pub const PROJECT_RELATIVE_PATH: &'static str = "Config/Edgegap.toml";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The settings file of the project rooted at `project_dir`.
    pub fn for_project(project_dir: impl AsRef<Path>) -> Self {
        Self::new(project_dir.as_ref().join(Self::PROJECT_RELATIVE_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&self, document: &str) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, document).map_err(|e| self.io_error(e))
    }
}

// ---------------------------------------------------------------------------
// MemoryBackend
// ---------------------------------------------------------------------------

/// An in-memory document. Useful in tests and for throwaway settings.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    document: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `document` already stored.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
        }
    }

    /// The last document written, if any.
    pub fn document(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // Writes replace the whole value, so a poisoned guard is still usable.
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ConfigBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, SettingsError> {
        Ok(self.lock().clone())
    }

    fn write(&self, document: &str) -> Result<(), SettingsError> {
        *self.lock() = Some(document.to_string());
        Ok(())
    }
}

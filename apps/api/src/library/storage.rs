//! Durable backing for the library record.
//!
//! The whole `LibraryState` is the unit of durability: every mutation writes
//! the complete record before the new state becomes visible.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::library::LibraryState;

pub const LIBRARY_FILE_NAME: &str = "library.json";

/// Suffix appended to a record that failed to parse when it is set aside.
pub const CORRUPT_SUFFIX: &str = "corrupt";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Where the library record lives. Implement this to swap backends without
/// touching the library service.
pub trait LibraryStorage: Send + Sync {
    /// Reads the stored record. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<LibraryState>, StorageError>;

    /// Writes the complete record. Must be durable when it returns.
    fn save(&self, state: &LibraryState) -> Result<(), StorageError>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;

    /// Moves an unparseable record out of the way so the next save cannot
    /// overwrite it. Returns where it went, if anywhere.
    fn set_aside(&self) -> Result<Option<String>, StorageError> {
        Ok(None)
    }
}

/// Loads the library record, degrading to first-run defaults when the record
/// is missing, unreadable or corrupt. A corrupt record is set aside first.
/// Never fails.
pub fn hydrate(storage: &dyn LibraryStorage) -> LibraryState {
    match storage.load() {
        Ok(Some(state)) => {
            info!(
                "Hydrated library from {} ({} saved resumes)",
                storage.describe(),
                state.saved_resumes.len()
            );
            state
        }
        Ok(None) => {
            info!("No library record at {}; starting fresh", storage.describe());
            LibraryState::default()
        }
        Err(StorageError::Serialize(e)) => {
            match storage.set_aside() {
                Ok(Some(moved)) => warn!(
                    "Library record at {} is corrupt ({e}); moved to {moved}, falling back to first-run defaults",
                    storage.describe()
                ),
                Ok(None) => warn!(
                    "Library record at {} is corrupt ({e}); falling back to first-run defaults",
                    storage.describe()
                ),
                Err(move_err) => warn!(
                    "Library record at {} is corrupt ({e}) and could not be set aside ({move_err}); falling back to first-run defaults",
                    storage.describe()
                ),
            }
            LibraryState::default()
        }
        Err(e) => {
            warn!(
                "Library record at {} could not be loaded ({e}); falling back to first-run defaults",
                storage.describe()
            );
            LibraryState::default()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// JSON file backend
// ────────────────────────────────────────────────────────────────────────────

/// Stores the record as pretty JSON, replacing the file atomically via a
/// temporary file in the same directory.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/library.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(LIBRARY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `library.json` -> `library.json.corrupt`
    pub fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(CORRUPT_SUFFIX);
        PathBuf::from(name)
    }
}

impl LibraryStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<LibraryState>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, state: &LibraryState) -> Result<(), StorageError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let mut tmp = NamedTempFile::new_in(&parent)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), state)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn set_aside(&self) -> Result<Option<String>, StorageError> {
        let target = self.corrupt_path();
        fs::rename(&self.path, &target)?;
        Ok(Some(target.display().to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory backend
// ────────────────────────────────────────────────────────────────────────────

/// Keeps the serialized record in memory, for ephemeral sessions that must
/// leave nothing on disk. Clones share the same record.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    record: Arc<Mutex<Option<String>>>,
    #[cfg(test)]
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryStorage {
    /// Seeds the stored record with raw text, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let storage = Self::default();
        if let Ok(mut record) = storage.record.lock() {
            *record = Some(raw.into());
        }
        storage
    }

    pub fn raw(&self) -> Option<String> {
        self.record.lock().ok().and_then(|r| r.clone())
    }

    /// Makes every subsequent `save` fail, simulating a full or read-only disk.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl LibraryStorage for MemoryStorage {
    fn load(&self) -> Result<Option<LibraryState>, StorageError> {
        let record = self
            .record
            .lock()
            .map_err(|_| StorageError::Unavailable("memory record poisoned".to_string()))?;
        match record.as_deref() {
            None => Ok(None),
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
        }
    }

    fn save(&self, state: &LibraryState) -> Result<(), StorageError> {
        #[cfg(test)]
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        let raw = serde_json::to_string(state)?;
        let mut record = self
            .record
            .lock()
            .map_err(|_| StorageError::Unavailable("memory record poisoned".to_string()))?;
        *record = Some(raw);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::create_blank;
    use crate::models::language::Language;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_hydrates_defaults() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());
        assert!(storage.load().unwrap().is_none());
        assert_eq!(hydrate(&storage), LibraryState::default());
    }

    #[test]
    fn test_corrupt_file_hydrates_defaults() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());
        fs::write(storage.path(), "{ not json").unwrap();
        assert!(storage.load().is_err());
        assert_eq!(hydrate(&storage), LibraryState::default());
    }

    #[test]
    fn test_corrupt_file_survives_next_save() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());
        fs::write(storage.path(), "{ \"savedResumes\": [ truncated").unwrap();

        assert_eq!(hydrate(&storage), LibraryState::default());
        assert!(!storage.path().exists());
        assert_eq!(storage.corrupt_path(), dir.path().join("library.json.corrupt"));

        storage
            .save(&LibraryState {
                has_seen_landing: true,
                ..Default::default()
            })
            .unwrap();

        let kept = fs::read_to_string(storage.corrupt_path()).unwrap();
        assert_eq!(kept, "{ \"savedResumes\": [ truncated");
        assert!(storage.load().unwrap().unwrap().has_seen_landing);
    }

    #[test]
    fn test_file_save_then_load() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested").join(LIBRARY_FILE_NAME));

        let resume = create_blank(Language::Ar);
        let mut state = LibraryState {
            has_seen_landing: true,
            language: Language::Ar,
            active_resume_id: Some(resume.id),
            ..Default::default()
        };
        state.saved_resumes.upsert(resume);

        storage.save(&state).unwrap();
        assert_eq!(storage.load().unwrap(), Some(state));
    }

    #[test]
    fn test_file_is_readable_json_layout() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());
        storage
            .save(&LibraryState {
                has_completed_onboarding: true,
                ..Default::default()
            })
            .unwrap();
        let raw = fs::read_to_string(storage.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["hasCompletedOnboarding"], true);
        assert!(value["savedResumes"].is_array());
    }

    #[test]
    fn test_memory_storage_shares_record_between_clones() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage
            .save(&LibraryState {
                has_seen_landing: true,
                ..Default::default()
            })
            .unwrap();
        assert!(other.load().unwrap().unwrap().has_seen_landing);
    }

    #[test]
    fn test_memory_storage_corrupt_record_hydrates_defaults() {
        let storage = MemoryStorage::with_raw("[1, 2");
        assert_eq!(hydrate(&storage), LibraryState::default());
    }
}

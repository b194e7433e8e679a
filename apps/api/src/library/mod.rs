// Document Library: the durable record of saved resumes, the active pointer,
// onboarding flags and the chrome language. Hydrated once at startup; every
// mutation is flushed to storage before it becomes visible in memory.

pub mod handlers;
pub mod storage;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::models::language::{DocumentAttributes, Language};
use crate::models::library::LibraryState;
use crate::models::resume::Resume;
use storage::{hydrate, LibraryStorage, StorageError};

/// Listing row for the library UI.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: Uuid,
    pub title: String,
    pub locale: String,
    pub updated_at: DateTime<Utc>,
    pub active: bool,
}

pub struct Library {
    state: LibraryState,
    storage: Arc<dyn LibraryStorage>,
}

impl Library {
    /// Hydrates from `storage`. Missing or corrupt records yield first-run
    /// defaults.
    pub fn open(storage: Arc<dyn LibraryStorage>) -> Self {
        let state = hydrate(storage.as_ref());
        Self { state, storage }
    }

    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    pub fn get(&self, id: Uuid) -> Option<&Resume> {
        self.state.saved_resumes.get(id)
    }

    pub fn active_resume(&self) -> Option<&Resume> {
        self.state.active_resume()
    }

    /// Saved resumes in the order they were first saved.
    pub fn summaries(&self) -> Vec<ResumeSummary> {
        self.state
            .saved_resumes
            .iter()
            .map(|r| ResumeSummary {
                id: r.id,
                title: r.title.clone(),
                locale: r.metadata.locale.clone(),
                updated_at: r.updated_at,
                active: self.state.active_resume_id == Some(r.id),
            })
            .collect()
    }

    /// Applies `f` to a draft of the state, flushes the draft, and only then
    /// makes it current. A failed flush leaves the library untouched. Multiple
    /// field changes inside one call are a single atomic transition.
    pub fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut LibraryState) -> T,
    ) -> Result<T, StorageError> {
        let mut draft = self.state.clone();
        let out = f(&mut draft);
        if draft != self.state {
            self.storage.save(&draft)?;
            self.state = draft;
        }
        Ok(out)
    }

    /// Inserts or overwrites the snapshot at `resume.id`. Last write wins.
    pub fn save_resume(&mut self, resume: Resume) -> Result<(), StorageError> {
        let id = resume.id;
        let inserted = self.transact(|s| s.saved_resumes.upsert(resume))?;
        info!("Saved resume {id} ({})", if inserted { "new" } else { "overwrite" });
        Ok(())
    }

    /// Sets the active pointer without checking that the id exists.
    pub fn set_active_resume_id(&mut self, id: Option<Uuid>) -> Result<(), StorageError> {
        self.transact(|s| s.active_resume_id = id)
    }

    pub fn set_has_seen_landing(&mut self, seen: bool) -> Result<(), StorageError> {
        self.transact(|s| s.has_seen_landing = seen)
    }

    pub fn set_has_completed_onboarding(&mut self, completed: bool) -> Result<(), StorageError> {
        self.transact(|s| s.has_completed_onboarding = completed)
    }

    /// Changes the chrome language and returns the document attributes the
    /// presentation layer must apply. Saved resumes keep their content locale.
    pub fn set_language(&mut self, language: Language) -> Result<DocumentAttributes, StorageError> {
        self.transact(|s| s.language = language)?;
        let attrs = DocumentAttributes::from(language);
        info!("Chrome language set to {} (dir={:?})", language.code(), attrs.dir);
        Ok(attrs)
    }

    /// Removes a saved resume, clearing the active pointer if it pointed there.
    /// Returns false when the id was not saved.
    pub fn remove_resume(&mut self, id: Uuid) -> Result<bool, StorageError> {
        let removed = self.transact(|s| {
            let removed = s.saved_resumes.remove(id).is_some();
            if s.active_resume_id == Some(id) {
                s.active_resume_id = None;
            }
            removed
        })?;
        if removed {
            info!("Removed resume {id} from library");
        }
        Ok(removed)
    }
}

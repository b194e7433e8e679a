use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::language::Language;
use crate::models::resume::Resume;

/// Saved resumes keyed by id, enumerated in the order they were first saved.
///
/// Overwriting an existing id keeps its original slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SavedResumes(Vec<Resume>);

impl SavedResumes {
    pub fn get(&self, id: Uuid) -> Option<&Resume> {
        self.0.iter().find(|r| r.id == id)
    }

    /// Inserts or overwrites the snapshot at `resume.id`. Returns true when the
    /// id was not present before.
    pub fn upsert(&mut self, resume: Resume) -> bool {
        match self.0.iter_mut().find(|r| r.id == resume.id) {
            Some(slot) => {
                *slot = resume;
                false
            }
            None => {
                self.0.push(resume);
                true
            }
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Resume> {
        let index = self.0.iter().position(|r| r.id == id)?;
        Some(self.0.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resume> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The durable library record. Missing fields hydrate to first-run defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LibraryState {
    pub has_seen_landing: bool,
    pub has_completed_onboarding: bool,
    pub language: Language,
    pub saved_resumes: SavedResumes,
    pub active_resume_id: Option<Uuid>,
}

impl LibraryState {
    /// The saved resume the active pointer refers to. A dangling pointer reads
    /// as no active resume.
    pub fn active_resume(&self) -> Option<&Resume> {
        self.active_resume_id
            .and_then(|id| self.saved_resumes.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::create_blank;

    #[test]
    fn test_upsert_keeps_append_order() {
        let mut saved = SavedResumes::default();
        let a = create_blank(Language::En);
        let b = create_blank(Language::Ar);
        assert!(saved.upsert(a.clone()));
        assert!(saved.upsert(b.clone()));

        let mut edited = a.clone();
        edited.title = "Renamed".to_string();
        assert!(!saved.upsert(edited));

        let ids: Vec<Uuid> = saved.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
        assert_eq!(saved.get(a.id).unwrap().title, "Renamed");
    }

    #[test]
    fn test_dangling_active_pointer_is_no_active_resume() {
        let state = LibraryState {
            active_resume_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(state.active_resume().is_none());
    }

    #[test]
    fn test_empty_record_hydrates_to_defaults() {
        let state: LibraryState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, LibraryState::default());
        assert!(!state.has_seen_landing);
        assert!(!state.has_completed_onboarding);
        assert!(state.saved_resumes.is_empty());
        assert!(state.active_resume_id.is_none());
    }

    #[test]
    fn test_persisted_layout_field_names() {
        let value = serde_json::to_value(LibraryState::default()).unwrap();
        assert_eq!(value["hasSeenLanding"], false);
        assert_eq!(value["hasCompletedOnboarding"], false);
        assert_eq!(value["language"], "en");
        assert!(value["savedResumes"].as_array().unwrap().is_empty());
        assert!(value["activeResumeId"].is_null());
    }
}

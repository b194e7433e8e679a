use chrono::{DateTime, Utc};

use crate::document::editor::{is_well_formed, normalize, EditError};
use crate::models::resume::Resume;

/// The single resume currently open for editing, or nothing. In-memory only.
///
/// Holds its resume by value: nothing outside this store can observe or
/// mutate it except through `edit`.
#[derive(Debug, Default)]
pub struct WorkingDocument {
    resume: Option<Resume>,
    dirty: bool,
}

impl WorkingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the working document wholesale.
    pub fn set_resume(&mut self, mut resume: Resume) {
        normalize(&mut resume);
        self.resume = Some(resume);
        self.dirty = false;
    }

    pub fn clear(&mut self) {
        self.resume = None;
        self.dirty = false;
    }

    pub fn resume(&self) -> Option<&Resume> {
        self.resume.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.resume.is_none()
    }

    /// True when edits have been applied since the last set or commit.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Records a commit stamped `updated_at`: the open copy takes the same
    /// timestamp and is no longer dirty.
    pub fn mark_committed(&mut self, updated_at: DateTime<Utc>) {
        if let Some(resume) = self.resume.as_mut() {
            resume.updated_at = updated_at;
        }
        self.dirty = false;
    }

    /// Runs an edit command against the open resume. Returns `None` when
    /// nothing is open.
    pub fn edit<T>(
        &mut self,
        command: impl FnOnce(&mut Resume) -> Result<T, EditError>,
    ) -> Option<Result<T, EditError>> {
        let resume = self.resume.as_mut()?;
        let result = command(resume);
        debug_assert!(is_well_formed(resume), "edit left resume {} malformed", resume.id);
        if result.is_ok() {
            self.dirty = true;
        }
        Some(result)
    }

    /// Puts back a copy taken with `snapshot`, along with its dirty flag.
    pub fn restore(&mut self, resume: Resume, dirty: bool) {
        self.resume = Some(resume);
        self.dirty = dirty;
    }

    /// An independent copy of the open resume, for handing to the library.
    pub fn snapshot(&self) -> Option<Resume> {
        self.resume.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::create_blank;
    use crate::document::editor::add_section;
    use crate::models::language::Language;
    use crate::models::resume::SectionType;

    #[test]
    fn test_starts_empty() {
        let working = WorkingDocument::new();
        assert!(working.is_empty());
        assert!(working.snapshot().is_none());
    }

    #[test]
    fn test_edit_without_document_is_none() {
        let mut working = WorkingDocument::new();
        let result = working.edit(|r| Ok(add_section(r, SectionType::Award, None)));
        assert!(result.is_none());
    }

    #[test]
    fn test_edit_marks_dirty_and_snapshot_is_independent() {
        let mut working = WorkingDocument::new();
        working.set_resume(create_blank(Language::En));
        assert!(!working.is_dirty());

        let snapshot = working.snapshot().unwrap();
        working
            .edit(|r| Ok(add_section(r, SectionType::Award, None)))
            .unwrap()
            .unwrap();

        assert!(working.is_dirty());
        assert_eq!(snapshot.sections.len(), 4);
        assert_eq!(working.resume().unwrap().sections.len(), 5);
    }

    #[test]
    fn test_failed_edit_does_not_mark_dirty() {
        let mut working = WorkingDocument::new();
        working.set_resume(create_blank(Language::En));
        let result = working.edit(|r| {
            crate::document::editor::remove_section(r, uuid::Uuid::new_v4()).map(|_| ())
        });
        assert!(matches!(result, Some(Err(EditError::SectionNotFound(_)))));
        assert!(!working.is_dirty());
    }

    #[test]
    fn test_restore_rewinds_edit_and_dirty_flag() {
        let mut working = WorkingDocument::new();
        working.set_resume(create_blank(Language::En));
        let before = working.snapshot().unwrap();

        working
            .edit(|r| Ok(add_section(r, SectionType::Award, None)))
            .unwrap()
            .unwrap();
        working.restore(before.clone(), false);

        assert_eq!(working.resume(), Some(&before));
        assert!(!working.is_dirty());
    }
}

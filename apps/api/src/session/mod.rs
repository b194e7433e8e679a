// Session: owns the Document Library and the Working Document, derives the
// current screen, and runs the onboarding, recovery, save and open
// transitions. Every resume crossing between the two stores is cloned.

pub mod handlers;
pub mod screen;
pub mod working;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::editor::EditError;
use crate::document::{create_blank, instantiate_sample};
use crate::library::storage::StorageError;
use crate::library::Library;
use crate::models::language::{DocumentAttributes, Language};
use crate::models::resume::Resume;
use screen::Screen;
use working::WorkingDocument;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no resume is open for editing")]
    NoWorkingDocument,

    #[error("resume {0} is not in the library")]
    ResumeNotFound(Uuid),

    #[error("landing page has not been dismissed")]
    LandingNotSeen,

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// How onboarding seeds the first document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingChoice {
    StartFresh,
    LoadSample,
}

/// Everything the presentation layer needs to pick and decorate a screen.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub screen: Screen,
    pub language: Language,
    pub document: DocumentAttributes,
    pub has_seen_landing: bool,
    pub has_completed_onboarding: bool,
    pub active_resume_id: Option<Uuid>,
    pub working_resume_id: Option<Uuid>,
    pub unsaved_changes: bool,
}

pub struct Session {
    library: Library,
    working: WorkingDocument,
    autosave: bool,
}

impl Session {
    /// Builds the session over a hydrated library and runs the startup
    /// recovery transition.
    pub fn new(library: Library, autosave: bool) -> Self {
        let mut session = Self {
            library,
            working: WorkingDocument::new(),
            autosave,
        };
        session.recover();
        session
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn working(&self) -> &WorkingDocument {
        &self.working
    }

    pub fn screen(&self) -> Screen {
        let state = self.library.state();
        Screen::select(
            state.has_seen_landing,
            state.has_completed_onboarding,
            !self.working.is_empty(),
        )
    }

    /// Recovers the active saved resume into an empty working document.
    /// Does nothing when a document is already open or the pointer dangles.
    /// Returns true when a copy was made.
    pub fn recover(&mut self) -> bool {
        if !self.working.is_empty() {
            return false;
        }
        let Some(saved) = self.library.active_resume() else {
            return false;
        };
        let copy = saved.clone();
        info!("Recovered active resume {} into the working document", copy.id);
        self.working.set_resume(copy);
        true
    }

    /// Runs recovery, then evaluates the screen.
    pub fn view(&mut self) -> SessionView {
        self.recover();
        let state = self.library.state();
        SessionView {
            screen: self.screen(),
            language: state.language,
            document: DocumentAttributes::from(state.language),
            has_seen_landing: state.has_seen_landing,
            has_completed_onboarding: state.has_completed_onboarding,
            active_resume_id: state.active_resume_id,
            working_resume_id: self.working.resume().map(|r| r.id),
            unsaved_changes: self.working.is_dirty(),
        }
    }

    pub fn dismiss_landing(&mut self) -> Result<(), SessionError> {
        self.library.set_has_seen_landing(true)?;
        info!("Landing dismissed");
        Ok(())
    }

    /// Sets the onboarding flag directly. Clearing it sends the user back to
    /// onboarding without touching saved resumes.
    pub fn set_onboarding_completed(&mut self, completed: bool) -> Result<(), SessionError> {
        Ok(self.library.set_has_completed_onboarding(completed)?)
    }

    /// Points the library at a resume without opening it. Existence is checked
    /// when the pointer is consumed by recovery.
    pub fn set_active_resume(&mut self, id: Option<Uuid>) -> Result<(), SessionError> {
        Ok(self.library.set_active_resume_id(id)?)
    }

    pub fn set_language(&mut self, language: Language) -> Result<DocumentAttributes, SessionError> {
        Ok(self.library.set_language(language)?)
    }

    /// Creates a resume in the current chrome language, registers it in the
    /// library as the active resume, opens it, and completes onboarding, as
    /// one transition.
    pub fn onboard(&mut self, choice: OnboardingChoice) -> Result<&Resume, SessionError> {
        if !self.library.state().has_seen_landing {
            return Err(SessionError::LandingNotSeen);
        }
        let language = self.library.language();
        let resume = match choice {
            OnboardingChoice::StartFresh => create_blank(language),
            OnboardingChoice::LoadSample => instantiate_sample(language),
        };
        let id = resume.id;
        let saved = resume.clone();

        self.library.transact(|s| {
            s.saved_resumes.upsert(saved);
            s.active_resume_id = Some(id);
            s.has_completed_onboarding = true;
        })?;
        self.working.set_resume(resume);

        info!("Onboarding completed with {choice:?} ({}) -> resume {id}", language.code());
        self.working.resume().ok_or(SessionError::NoWorkingDocument)
    }

    /// Commits a copy of the working document into the library under its id.
    pub fn save(&mut self) -> Result<&Resume, SessionError> {
        let mut snapshot = self.working.snapshot().ok_or(SessionError::NoWorkingDocument)?;
        snapshot.touch();
        let id = snapshot.id;
        let updated_at = snapshot.updated_at;

        self.library.save_resume(snapshot)?;
        self.working.mark_committed(updated_at);
        self.library.get(id).ok_or(SessionError::ResumeNotFound(id))
    }

    /// Opens a saved resume for editing (as a copy) and makes it active.
    pub fn open(&mut self, id: Uuid) -> Result<&Resume, SessionError> {
        let copy = self
            .library
            .get(id)
            .cloned()
            .ok_or(SessionError::ResumeNotFound(id))?;
        self.library.set_active_resume_id(Some(id))?;
        self.working.set_resume(copy);
        info!("Opened resume {id} for editing");
        self.working.resume().ok_or(SessionError::NoWorkingDocument)
    }

    /// Removes a resume from the library. Closes it too if it is open.
    pub fn remove(&mut self, id: Uuid) -> Result<(), SessionError> {
        if !self.library.remove_resume(id)? {
            return Err(SessionError::ResumeNotFound(id));
        }
        if self.working.resume().is_some_and(|r| r.id == id) {
            self.working.clear();
        }
        Ok(())
    }

    /// Applies an editor command to the working document. With autosave on,
    /// a successful edit is committed straight away, and an edit whose commit
    /// fails is rolled back so the caller can retry it.
    pub fn edit<T>(
        &mut self,
        command: impl FnOnce(&mut Resume) -> Result<T, EditError>,
    ) -> Result<T, SessionError> {
        let before = if self.autosave {
            self.working.snapshot().map(|r| (r, self.working.is_dirty()))
        } else {
            None
        };
        let out = self
            .working
            .edit(command)
            .ok_or(SessionError::NoWorkingDocument)??;
        if self.autosave {
            if let Err(e) = self.save() {
                if let Some((resume, dirty)) = before {
                    warn!("Autosave of resume {} failed ({e}); edit rolled back", resume.id);
                    self.working.restore(resume, dirty);
                }
                return Err(e);
            }
        }
        Ok(out)
    }
}

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::editor::{
    self, BasicInfoPatch, EntryPatch, MetadataPatch, SectionPatch,
};
use crate::errors::AppError;
use crate::models::language::{DocumentAttributes, Language};
use crate::models::resume::{Resume, SectionType};
use crate::session::{OnboardingChoice, SessionView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LanguageRequest {
    pub language: Language,
}

#[derive(Deserialize)]
pub struct OnboardingFlagRequest {
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct ActiveResumeRequest {
    pub id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

#[derive(Deserialize)]
pub struct PositionRequest {
    pub position: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSectionRequest {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub position: Option<u32>,
}

#[derive(Deserialize, Default)]
pub struct AddEntryRequest {
    pub position: Option<u32>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
    pub position: u32,
}

#[derive(Serialize)]
pub struct PositionResponse {
    pub position: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Session and onboarding
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session()?;
    Ok(Json(session.view()))
}

/// POST /api/v1/session/landing
pub async fn handle_dismiss_landing(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session()?;
    session.dismiss_landing()?;
    Ok(Json(session.view()))
}

/// PUT /api/v1/session/language
pub async fn handle_set_language(
    State(state): State<AppState>,
    Json(req): Json<LanguageRequest>,
) -> Result<Json<DocumentAttributes>, AppError> {
    let mut session = state.session()?;
    Ok(Json(session.set_language(req.language)?))
}

/// PUT /api/v1/session/onboarding
pub async fn handle_set_onboarding(
    State(state): State<AppState>,
    Json(req): Json<OnboardingFlagRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session()?;
    session.set_onboarding_completed(req.completed)?;
    Ok(Json(session.view()))
}

/// PUT /api/v1/session/active
pub async fn handle_set_active(
    State(state): State<AppState>,
    Json(req): Json<ActiveResumeRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session()?;
    session.set_active_resume(req.id)?;
    Ok(Json(session.view()))
}

/// POST /api/v1/onboarding/start-fresh
pub async fn handle_start_fresh(State(state): State<AppState>) -> Result<Json<Resume>, AppError> {
    let mut session = state.session()?;
    Ok(Json(session.onboard(OnboardingChoice::StartFresh)?.clone()))
}

/// POST /api/v1/onboarding/sample
pub async fn handle_load_sample(State(state): State<AppState>) -> Result<Json<Resume>, AppError> {
    let mut session = state.session()?;
    Ok(Json(session.onboard(OnboardingChoice::LoadSample)?.clone()))
}

// ────────────────────────────────────────────────────────────────────────────
// Working document
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Result<Json<Resume>, AppError> {
    let session = state.session()?;
    session
        .working()
        .snapshot()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No resume is open for editing".to_string()))
}

/// POST /api/v1/document/save
pub async fn handle_save_document(State(state): State<AppState>) -> Result<Json<Resume>, AppError> {
    let mut session = state.session()?;
    Ok(Json(session.save()?.clone()))
}

/// PATCH /api/v1/document/title
pub async fn handle_set_title(
    State(state): State<AppState>,
    Json(req): Json<TitleRequest>,
) -> Result<Json<Resume>, AppError> {
    edit_and_return(&state, |r| editor::set_title(r, req.title))
}

/// PATCH /api/v1/document/basic-info
pub async fn handle_update_basic_info(
    State(state): State<AppState>,
    Json(patch): Json<BasicInfoPatch>,
) -> Result<Json<Resume>, AppError> {
    edit_and_return(&state, |r| {
        editor::update_basic_info(r, patch);
        Ok(())
    })
}

/// PATCH /api/v1/document/metadata
pub async fn handle_update_metadata(
    State(state): State<AppState>,
    Json(patch): Json<MetadataPatch>,
) -> Result<Json<Resume>, AppError> {
    edit_and_return(&state, |r| editor::update_metadata(r, patch))
}

/// POST /api/v1/document/sections
pub async fn handle_add_section(
    State(state): State<AppState>,
    Json(req): Json<AddSectionRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    let mut session = state.session()?;
    let id = session.edit(|r| Ok(editor::add_section(r, req.section_type, req.position)))?;
    let position = session
        .working()
        .resume()
        .and_then(|r| r.section(id))
        .map(|s| s.position)
        .ok_or_else(|| AppError::NotFound(format!("Section {id} not found")))?;
    Ok(Json(CreatedResponse { id, position }))
}

/// DELETE /api/v1/document/sections/:id
pub async fn handle_remove_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    edit_and_return(&state, |r| editor::remove_section(r, id).map(|_| ()))
}

/// PUT /api/v1/document/sections/:id/position
pub async fn handle_move_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<PositionResponse>, AppError> {
    let mut session = state.session()?;
    let position = session.edit(|r| editor::move_section(r, id, req.position))?;
    Ok(Json(PositionResponse { position }))
}

/// PATCH /api/v1/document/sections/:id
pub async fn handle_update_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<SectionPatch>,
) -> Result<Json<Resume>, AppError> {
    edit_and_return(&state, |r| editor::update_section(r, id, patch))
}

/// POST /api/v1/document/sections/:id/entries
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
    req: Option<Json<AddEntryRequest>>,
) -> Result<Json<CreatedResponse>, AppError> {
    let position = req.and_then(|Json(r)| r.position);
    let mut session = state.session()?;
    let id = session.edit(|r| editor::add_entry(r, section_id, position))?;
    let position = session
        .working()
        .resume()
        .and_then(|r| r.section(section_id))
        .and_then(|s| s.entry(id))
        .map(|e| e.position)
        .ok_or_else(|| AppError::NotFound(format!("Entry {id} not found")))?;
    Ok(Json(CreatedResponse { id, position }))
}

/// DELETE /api/v1/document/sections/:sid/entries/:eid
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((section_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Resume>, AppError> {
    edit_and_return(&state, |r| {
        editor::remove_entry(r, section_id, entry_id).map(|_| ())
    })
}

/// PUT /api/v1/document/sections/:sid/entries/:eid/position
pub async fn handle_move_entry(
    State(state): State<AppState>,
    Path((section_id, entry_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<PositionResponse>, AppError> {
    let mut session = state.session()?;
    let position = session.edit(|r| editor::move_entry(r, section_id, entry_id, req.position))?;
    Ok(Json(PositionResponse { position }))
}

/// PATCH /api/v1/document/sections/:sid/entries/:eid
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((section_id, entry_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<EntryPatch>,
) -> Result<Json<Resume>, AppError> {
    edit_and_return(&state, |r| editor::update_entry(r, section_id, entry_id, patch))
}

/// Runs an edit and responds with the updated working document.
fn edit_and_return(
    state: &AppState,
    command: impl FnOnce(&mut Resume) -> Result<(), editor::EditError>,
) -> Result<Json<Resume>, AppError> {
    let mut session = state.session()?;
    session.edit(command)?;
    session
        .working()
        .snapshot()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No resume is open for editing".to_string()))
}

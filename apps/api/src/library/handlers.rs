use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::library::ResumeSummary;
use crate::models::resume::Resume;
use crate::state::AppState;

/// GET /api/v1/library
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let session = state.session()?;
    Ok(Json(session.library().summaries()))
}

/// GET /api/v1/library/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    let session = state.session()?;
    session
        .library()
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// POST /api/v1/library/:id/open
pub async fn handle_open_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    let mut session = state.session()?;
    Ok(Json(session.open(id)?.clone()))
}

/// DELETE /api/v1/library/:id
pub async fn handle_remove_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut session = state.session()?;
    session.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

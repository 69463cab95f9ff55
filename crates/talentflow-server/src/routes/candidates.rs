use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use talentflow_core::candidate::{CandidateFilter, NewCandidate};
use talentflow_core::types::Stage;

#[derive(serde::Deserialize)]
pub struct CandidatesQuery {
    pub stage: Option<String>,
    pub search: Option<String>,
}

/// GET /api/candidates — filter by stage and by name/email search.
pub async fn list_candidates(
    State(app): State<AppState>,
    Query(query): Query<CandidatesQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    app.sim.read_delay().await;

    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let stage = match query.stage.as_deref() {
            None | Some("all") => None,
            Some(s) => match s.parse::<Stage>() {
                Ok(parsed) => Some(parsed),
                // Unknown stage matches nothing, like an indexed lookup.
                Err(_) => return Ok(serde_json::json!([])),
            },
        };
        let filter = CandidateFilter {
            stage,
            search: query.search,
        };
        let candidates = store.candidates(&filter)?;
        Ok::<_, talentflow_core::TalentError>(serde_json::json!(candidates))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/candidates — create a candidate; always starts in `applied`.
pub async fn create_candidate(
    State(app): State<AppState>,
    Json(body): Json<NewCandidate>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let store = app.store.clone();
    let candidate = tokio::task::spawn_blocking(move || store.insert_candidate(body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(serde_json::json!(candidate))))
}

/// GET /api/candidates/:id — single candidate or 404.
pub async fn get_candidate(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let candidate = tokio::task::spawn_blocking(move || store.candidate(id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!(candidate)))
}

#[derive(serde::Deserialize)]
pub struct ChangeStageBody {
    pub stage: Option<String>,
}

/// PATCH /api/candidates/:id — move the candidate to a new stage and record
/// the matching timeline event.
pub async fn change_stage(
    State(app): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<ChangeStageBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(stage) = body.stage else {
        return Err(AppError::bad_request("stage is required"));
    };
    let stage: Stage = stage.parse()?;

    let store = app.store.clone();
    let candidate = tokio::task::spawn_blocking(move || store.change_stage(id, stage))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!(candidate)))
}

/// GET /api/candidates/:id/timeline — stage events and notes merged,
/// newest first.
pub async fn timeline(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let entries = tokio::task::spawn_blocking(move || store.candidate_timeline(id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!(entries)))
}

/// GET /api/candidates/:id/notes — newest first.
pub async fn list_notes(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let notes = tokio::task::spawn_blocking(move || {
        let mut notes = store.notes(id)?;
        notes.reverse();
        Ok::<_, talentflow_core::TalentError>(notes)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!(notes)))
}

#[derive(serde::Deserialize)]
pub struct AddNoteBody {
    pub content: String,
}

/// POST /api/candidates/:id/notes — attach a note.
pub async fn add_note(
    State(app): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<AddNoteBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let store = app.store.clone();
    let note = tokio::task::spawn_blocking(move || store.add_note(id, body.content))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(serde_json::json!(note))))
}

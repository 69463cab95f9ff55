use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use talentflow_core::job::{JobPatch, NewJob};
use talentflow_core::reorder::ReorderIntent;
use talentflow_core::types::JobStatus;

/// Fixed page size for the jobs board.
const PAGE_SIZE: usize = 10;

#[derive(serde::Deserialize)]
pub struct JobsQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub page: Option<usize>,
}

/// GET /api/jobs — filtered, ordered, paginated board listing.
pub async fn list_jobs(
    State(app): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    app.sim.read_delay().await;

    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        // An unknown status string matches nothing rather than erroring,
        // mirroring an indexed equality lookup.
        let status = match query.status.as_deref() {
            None | Some("all") => None,
            Some(s) => match s.parse::<JobStatus>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    return Ok(serde_json::json!({ "jobs": [], "total_count": 0 }));
                }
            },
        };

        let mut jobs = store.jobs_sorted()?;
        if let Some(status) = status {
            jobs.retain(|j| j.status == status);
        }
        if let Some(tag) = &query.tag {
            jobs.retain(|j| j.tags.iter().any(|t| t == tag));
        }
        if let Some(search) = &query.search {
            jobs.retain(|j| j.matches_search(search));
        }

        let total_count = jobs.len();
        let page = query.page.unwrap_or(1).max(1);
        let paginated: Vec<_> = jobs
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect();

        Ok::<_, talentflow_core::TalentError>(serde_json::json!({
            "jobs": paginated,
            "total_count": total_count,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/jobs — create a job at the end of the board.
pub async fn create_job(
    State(app): State<AppState>,
    Json(body): Json<NewJob>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    app.sim.read_delay().await;

    let store = app.store.clone();
    let job = tokio::task::spawn_blocking(move || store.insert_job(body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(serde_json::json!(job))))
}

/// GET /api/jobs/:id — single job or 404.
pub async fn get_job(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let job = tokio::task::spawn_blocking(move || store.job(id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!(job)))
}

/// PATCH /api/jobs/:id — partial update of editable fields. Never touches
/// `order`.
pub async fn update_job(
    State(app): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<JobPatch>,
) -> Result<Json<serde_json::Value>, AppError> {
    app.sim.read_delay().await;

    let store = app.store.clone();
    let job = tokio::task::spawn_blocking(move || store.update_job(id, &body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!(job)))
}

#[derive(serde::Deserialize)]
pub struct ReorderBody {
    pub reference_id: u64,
}

/// PATCH /api/jobs/:id/reorder — move the job to the reference job's
/// position and renumber the whole board.
///
/// The synthetic failure roll happens before any store access, so a failed
/// request persists nothing; callers are expected to roll back their
/// optimistic view on any non-success status.
pub async fn reorder_job(
    State(app): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<ReorderBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    app.sim.reorder_delay().await;

    if app.sim.reorder_fails() {
        tracing::warn!(job = id, "simulated reorder failure");
        return Err(AppError::simulated_failure());
    }

    let intent = ReorderIntent {
        moved_id: id,
        reference_id: body.reference_id,
    };

    let store = app.store.clone();
    tokio::task::spawn_blocking(move || store.reorder_jobs(intent))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    tracing::debug!(job = id, reference = body.reference_id, "board reordered");
    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/jobs/:id/candidates — candidates attached to a job.
pub async fn job_candidates(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let candidates = tokio::task::spawn_blocking(move || store.candidates_for_job(id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!(candidates)))
}

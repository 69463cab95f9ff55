use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;

use crate::error::AppError;
use crate::state::AppState;
use talentflow_core::assessment::{Assessment, Section, Submission};

/// GET /api/assessments/:job_id — stored assessment, or the default empty
/// structure when the job has none yet.
pub async fn get_assessment(
    State(app): State<AppState>,
    Path(job_id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let assessment = tokio::task::spawn_blocking(move || {
        let stored = store.assessment(job_id)?;
        Ok::<_, talentflow_core::TalentError>(stored.unwrap_or_else(|| Assessment::empty(job_id)))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!(assessment)))
}

#[derive(serde::Deserialize)]
pub struct PutAssessmentBody {
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// PUT /api/assessments/:job_id — insert or replace the job's assessment.
pub async fn put_assessment(
    State(app): State<AppState>,
    Path(job_id): Path<u64>,
    Json(body): Json<PutAssessmentBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let assessment = Assessment {
        job_id,
        sections: body.sections,
    };

    let store = app.store.clone();
    tokio::task::spawn_blocking(move || store.put_assessment(&assessment))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/assessments/:job_id/submit — record a completed run. Answers
/// are stored as submitted, keyed by question id.
pub async fn submit_assessment(
    State(app): State<AppState>,
    Path(job_id): Path<u64>,
    Json(answers): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let submission = Submission {
        job_id,
        answers,
        submitted_at: Utc::now(),
    };

    let store = app.store.clone();
    tokio::task::spawn_blocking(move || store.record_submission(&submission))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Submission received.",
    })))
}

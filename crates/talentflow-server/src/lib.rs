pub mod error;
pub mod routes;
pub mod sim;
pub mod state;

use axum::routing::{get, patch, post, put};
use axum::Router;
use state::AppState;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Jobs
        .route("/api/jobs", get(routes::jobs::list_jobs))
        .route("/api/jobs", post(routes::jobs::create_job))
        .route("/api/jobs/{id}", get(routes::jobs::get_job))
        .route("/api/jobs/{id}", patch(routes::jobs::update_job))
        .route("/api/jobs/{id}/reorder", patch(routes::jobs::reorder_job))
        .route(
            "/api/jobs/{id}/candidates",
            get(routes::jobs::job_candidates),
        )
        // Candidates
        .route("/api/candidates", get(routes::candidates::list_candidates))
        .route(
            "/api/candidates",
            post(routes::candidates::create_candidate),
        )
        .route("/api/candidates/{id}", get(routes::candidates::get_candidate))
        .route(
            "/api/candidates/{id}",
            patch(routes::candidates::change_stage),
        )
        .route(
            "/api/candidates/{id}/timeline",
            get(routes::candidates::timeline),
        )
        .route("/api/candidates/{id}/notes", get(routes::candidates::list_notes))
        .route("/api/candidates/{id}/notes", post(routes::candidates::add_note))
        // Assessments
        .route(
            "/api/assessments/{job_id}",
            get(routes::assessments::get_assessment),
        )
        .route(
            "/api/assessments/{job_id}",
            put(routes::assessments::put_assessment),
        )
        .route(
            "/api/assessments/{job_id}/submit",
            post(routes::assessments::submit_assessment),
        )
        .layer(cors)
        .with_state(state)
}

/// Start the talentflow API server.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("talentflow API listening on http://localhost:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}

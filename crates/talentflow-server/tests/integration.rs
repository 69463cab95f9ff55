use axum::http::StatusCode;
use http_body_util::BodyExt;
use std::sync::Arc;
use talentflow_core::config::SimulationConfig;
use talentflow_core::store::Store;
use talentflow_server::state::AppState;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Open a fresh store in a temp directory and wrap it in app state with the
/// simulation disabled (deterministic API).
fn test_state(dir: &TempDir) -> AppState {
    let store = Store::open(&dir.path().join("test.redb")).unwrap();
    AppState::new(Arc::new(store), SimulationConfig::off())
}

/// App state with the failure branch forced: every reorder request fails.
fn failing_state(dir: &TempDir) -> AppState {
    let store = Store::open(&dir.path().join("test.redb")).unwrap();
    let sim = SimulationConfig {
        enabled: true,
        read_latency_ms: (0, 0),
        reorder_latency_ms: (0, 0),
        reorder_failure_rate: 1.0,
    };
    AppState::new(Arc::new(store), sim)
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    request(app, "GET", uri, None).await
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request(app, "POST", uri, Some(body)).await
}

async fn patch_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request(app, "PATCH", uri, Some(body)).await
}

async fn put_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request(app, "PUT", uri, Some(body)).await
}

async fn request(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Create `n` jobs titled "Job 1".."Job n" through the API.
async fn seed_jobs(state: &AppState, n: usize) {
    for i in 1..=n {
        let app = talentflow_server::build_router(state.clone());
        let (status, _) = post_json(
            app,
            "/api/jobs",
            serde_json::json!({ "title": format!("Job {i}"), "tags": ["Rust"] }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

fn board_ids(json: &serde_json::Value) -> Vec<u64> {
    json["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["id"].as_u64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_jobs_empty_board() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, json) = get(talentflow_server::build_router(state), "/api/jobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_count"], 0);
    assert!(json["jobs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_job_assigns_slug_and_order() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, json) = post_json(
        talentflow_server::build_router(state.clone()),
        "/api/jobs",
        serde_json::json!({ "title": "Frontend Developer", "tags": ["React"] }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["slug"], "frontend-developer");
    assert_eq!(json["order"], 1);
    assert_eq!(json["status"], "active");
}

#[tokio::test]
async fn jobs_listing_paginates_at_ten() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    seed_jobs(&state, 12).await;

    let (_, page1) = get(talentflow_server::build_router(state.clone()), "/api/jobs").await;
    assert_eq!(page1["total_count"], 12);
    assert_eq!(page1["jobs"].as_array().unwrap().len(), 10);

    let (_, page2) = get(
        talentflow_server::build_router(state),
        "/api/jobs?page=2",
    )
    .await;
    assert_eq!(page2["total_count"], 12);
    assert_eq!(page2["jobs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn jobs_listing_filters_by_status_search_and_tag() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let app = talentflow_server::build_router(state.clone());
    post_json(
        app,
        "/api/jobs",
        serde_json::json!({ "title": "Frontend Developer", "tags": ["React"] }),
    )
    .await;
    let app = talentflow_server::build_router(state.clone());
    post_json(
        app,
        "/api/jobs",
        serde_json::json!({ "title": "Backend Engineer", "status": "archived", "tags": ["SQL"] }),
    )
    .await;

    let (_, json) = get(
        talentflow_server::build_router(state.clone()),
        "/api/jobs?status=archived",
    )
    .await;
    assert_eq!(json["total_count"], 1);
    assert_eq!(json["jobs"][0]["title"], "Backend Engineer");

    let (_, json) = get(
        talentflow_server::build_router(state.clone()),
        "/api/jobs?search=front",
    )
    .await;
    assert_eq!(json["total_count"], 1);
    assert_eq!(json["jobs"][0]["title"], "Frontend Developer");

    let (_, json) = get(
        talentflow_server::build_router(state.clone()),
        "/api/jobs?tag=SQL",
    )
    .await;
    assert_eq!(json["total_count"], 1);

    // Unknown status matches nothing.
    let (_, json) = get(
        talentflow_server::build_router(state),
        "/api/jobs?status=closed",
    )
    .await;
    assert_eq!(json["total_count"], 0);
}

#[tokio::test]
async fn get_job_missing_returns_404() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, json) = get(talentflow_server::build_router(state), "/api/jobs/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("job not found"));
}

#[tokio::test]
async fn patch_job_updates_title_but_not_order() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    seed_jobs(&state, 2).await;

    let (status, json) = patch_json(
        talentflow_server::build_router(state.clone()),
        "/api/jobs/2",
        serde_json::json!({ "title": "Renamed Role" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Renamed Role");
    assert_eq!(json["slug"], "renamed-role");
    assert_eq!(json["order"], 2);
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reorder_moves_first_onto_last() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    seed_jobs(&state, 3).await;

    let (status, json) = patch_json(
        talentflow_server::build_router(state.clone()),
        "/api/jobs/1/reorder",
        serde_json::json!({ "reference_id": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (_, listing) = get(talentflow_server::build_router(state), "/api/jobs").await;
    assert_eq!(board_ids(&listing), vec![2, 3, 1]);
    let orders: Vec<u64> = listing["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["order"].as_u64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[tokio::test]
async fn reorder_moves_last_onto_first() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    seed_jobs(&state, 3).await;

    let (status, _) = patch_json(
        talentflow_server::build_router(state.clone()),
        "/api/jobs/3/reorder",
        serde_json::json!({ "reference_id": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listing) = get(talentflow_server::build_router(state), "/api/jobs").await;
    assert_eq!(board_ids(&listing), vec![3, 1, 2]);
}

#[tokio::test]
async fn reorder_unknown_reference_is_404_and_board_unchanged() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    seed_jobs(&state, 3).await;

    let (status, json) = patch_json(
        talentflow_server::build_router(state.clone()),
        "/api/jobs/1/reorder",
        serde_json::json!({ "reference_id": 99 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("job not found"));

    let (_, listing) = get(talentflow_server::build_router(state), "/api/jobs").await;
    assert_eq!(board_ids(&listing), vec![1, 2, 3]);
}

#[tokio::test]
async fn forced_failure_returns_500_and_persists_nothing() {
    let dir = TempDir::new().unwrap();
    let state = failing_state(&dir);
    seed_jobs(&state, 3).await;

    let (status, json) = patch_json(
        talentflow_server::build_router(state.clone()),
        "/api/jobs/1/reorder",
        serde_json::json!({ "reference_id": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Server error");

    let (_, listing) = get(talentflow_server::build_router(state), "/api/jobs").await;
    assert_eq!(board_ids(&listing), vec![1, 2, 3]);
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn candidate_create_forces_applied_stage() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    seed_jobs(&state, 1).await;

    let (status, json) = post_json(
        talentflow_server::build_router(state),
        "/api/candidates",
        serde_json::json!({ "name": "John Doe #1", "email": "john.doe1@example.com", "job_id": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["stage"], "applied");
}

#[tokio::test]
async fn stage_patch_updates_candidate_and_timeline() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    seed_jobs(&state, 1).await;
    post_json(
        talentflow_server::build_router(state.clone()),
        "/api/candidates",
        serde_json::json!({ "name": "Eva Chen #1", "email": "eva.chen1@example.com", "job_id": 1 }),
    )
    .await;

    let (status, json) = patch_json(
        talentflow_server::build_router(state.clone()),
        "/api/candidates/1",
        serde_json::json!({ "stage": "screen" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stage"], "screen");

    let (_, timeline) = get(
        talentflow_server::build_router(state),
        "/api/candidates/1/timeline",
    )
    .await;
    let entries = timeline.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["event"], "Moved from 'applied' to 'screen' stage.");
}

#[tokio::test]
async fn stage_patch_without_stage_is_400() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    seed_jobs(&state, 1).await;
    post_json(
        talentflow_server::build_router(state.clone()),
        "/api/candidates",
        serde_json::json!({ "name": "Ben Smith #1", "email": "ben.smith1@example.com", "job_id": 1 }),
    )
    .await;

    let (status, _) = patch_json(
        talentflow_server::build_router(state.clone()),
        "/api/candidates/1",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = patch_json(
        talentflow_server::build_router(state),
        "/api/candidates/1",
        serde_json::json!({ "stage": "bogus" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn candidates_filter_by_stage_and_search() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    seed_jobs(&state, 1).await;
    for (name, email) in [
        ("Aisha Khan #1", "aisha.khan1@example.com"),
        ("Jack Jones #2", "jack.jones2@example.com"),
    ] {
        post_json(
            talentflow_server::build_router(state.clone()),
            "/api/candidates",
            serde_json::json!({ "name": name, "email": email, "job_id": 1 }),
        )
        .await;
    }
    patch_json(
        talentflow_server::build_router(state.clone()),
        "/api/candidates/2",
        serde_json::json!({ "stage": "tech" }),
    )
    .await;

    let (_, json) = get(
        talentflow_server::build_router(state.clone()),
        "/api/candidates?stage=tech",
    )
    .await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Jack Jones #2");

    let (_, json) = get(
        talentflow_server::build_router(state.clone()),
        "/api/candidates?search=aisha",
    )
    .await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let (_, json) = get(
        talentflow_server::build_router(state),
        "/api/candidates?stage=review",
    )
    .await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn notes_post_then_list_newest_first() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);
    seed_jobs(&state, 1).await;
    post_json(
        talentflow_server::build_router(state.clone()),
        "/api/candidates",
        serde_json::json!({ "name": "Grace Li #1", "email": "grace.li1@example.com", "job_id": 1 }),
    )
    .await;

    for content in ["first note", "second note"] {
        let (status, _) = post_json(
            talentflow_server::build_router(state.clone()),
            "/api/candidates/1/notes",
            serde_json::json!({ "content": content }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, json) = get(
        talentflow_server::build_router(state),
        "/api/candidates/1/notes",
    )
    .await;
    let notes = json.as_array().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["content"], "second note");
    assert_eq!(notes[1]["content"], "first note");
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn assessment_defaults_to_empty_structure() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, json) = get(
        talentflow_server::build_router(state),
        "/api/assessments/9",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["job_id"], 9);
    assert!(json["sections"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn assessment_put_then_get_roundtrip() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let body = serde_json::json!({
        "sections": [{
            "id": "s1",
            "title": "Basics",
            "questions": [{
                "id": "q1",
                "kind": "single_choice",
                "text": "Pick one",
                "options": [{ "id": "o1", "text": "A" }, { "id": "o2", "text": "B" }],
            }],
        }],
    });
    let (status, json) = put_json(
        talentflow_server::build_router(state.clone()),
        "/api/assessments/1",
        body,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (_, json) = get(
        talentflow_server::build_router(state),
        "/api/assessments/1",
    )
    .await;
    assert_eq!(json["sections"][0]["title"], "Basics");
    assert_eq!(json["sections"][0]["questions"][0]["kind"], "single_choice");
}

#[tokio::test]
async fn assessment_submit_acknowledges() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, json) = post_json(
        talentflow_server::build_router(state),
        "/api/assessments/3/submit",
        serde_json::json!({ "q1": "o1", "q2": ["o4", "o5"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Submission received.");
}

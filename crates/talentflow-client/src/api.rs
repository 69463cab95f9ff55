//! API access for the client coordinators. The traits exist so tests can
//! inject fakes; [`HttpClient`] is the real implementation over reqwest.
//!
//! The coordinators treat every non-success status the same way (roll back
//! and notify); [`ApiError`] keeps the status and message only for logging.

use serde::Deserialize;
use talentflow_core::candidate::Candidate;
use talentflow_core::job::Job;
use talentflow_core::reorder::ReorderIntent;
use talentflow_core::types::Stage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
}

#[allow(async_fn_in_trait)]
pub trait JobsApi {
    /// Fetch the whole board, ordered by `order` ascending.
    async fn fetch_jobs(&self) -> Result<Vec<Job>, ApiError>;

    /// Ask the server to move a job to the reference job's position.
    async fn reorder_job(&self, intent: ReorderIntent) -> Result<(), ApiError>;
}

#[allow(async_fn_in_trait)]
pub trait CandidatesApi {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>, ApiError>;

    async fn change_stage(&self, id: u64, stage: Stage) -> Result<Candidate, ApiError>;
}

// ---------------------------------------------------------------------------
// HttpClient
// ---------------------------------------------------------------------------

pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct JobsPage {
    jobs: Vec<Job>,
    total_count: usize,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl JobsApi for HttpClient {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, ApiError> {
        // The listing endpoint is paginated; walk pages until the whole
        // board is in hand.
        let mut all = Vec::new();
        let mut page = 1usize;
        loop {
            let url = format!("{}/api/jobs?page={page}", self.base_url);
            let response = Self::check(self.http.get(&url).send().await?).await?;
            let body: JobsPage = response.json().await?;
            let fetched = body.jobs.len();
            all.extend(body.jobs);
            if all.len() >= body.total_count || fetched == 0 {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    async fn reorder_job(&self, intent: ReorderIntent) -> Result<(), ApiError> {
        let url = format!("{}/api/jobs/{}/reorder", self.base_url, intent.moved_id);
        let response = self
            .http
            .patch(&url)
            .json(&serde_json::json!({ "reference_id": intent.reference_id }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

impl CandidatesApi for HttpClient {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>, ApiError> {
        let url = format!("{}/api/candidates", self.base_url);
        let response = Self::check(self.http.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn change_stage(&self, id: u64, stage: Stage) -> Result<Candidate, ApiError> {
        let url = format!("{}/api/candidates/{id}", self.base_url);
        let response = self
            .http
            .patch(&url)
            .json(&serde_json::json!({ "stage": stage.as_str() }))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

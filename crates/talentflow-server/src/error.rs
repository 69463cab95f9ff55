use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use talentflow_core::TalentError;

// ---------------------------------------------------------------------------
// Internal sentinels carried through the anyhow chain
// ---------------------------------------------------------------------------

/// Private sentinel for the synthetic reorder failure. Maps to HTTP 500
/// without touching the `TalentError` enum; nothing was persisted when it
/// is raised.
#[derive(Debug)]
struct SimulatedFailure;

impl std::fmt::Display for SimulatedFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Server error")
    }
}

impl std::error::Error for SimulatedFailure {}

/// Private sentinel error type used to carry an explicit HTTP 400 through
/// the `anyhow::Error` chain.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    /// The synthetic transient failure: a 500 with nothing persisted.
    pub fn simulated_failure() -> Self {
        Self(SimulatedFailure.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Check for explicit sentinel types before falling through to TalentError.
        if self.0.downcast_ref::<SimulatedFailure>().is_some() {
            let body = serde_json::json!({ "error": "Server error" });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response();
        }
        if let Some(b) = self.0.downcast_ref::<BadRequestError>() {
            let body = serde_json::json!({ "error": b.0.clone() });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<TalentError>() {
            match e {
                TalentError::JobNotFound(_) | TalentError::CandidateNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                TalentError::InvalidStatus(_)
                | TalentError::InvalidStage(_)
                | TalentError::InvalidQuestionKind(_)
                | TalentError::InvalidTitle(_)
                | TalentError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
                TalentError::Storage(_)
                | TalentError::Io(_)
                | TalentError::Yaml(_)
                | TalentError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TalentError {
    #[error("job not found: {0}")]
    JobNotFound(u64),

    #[error("candidate not found: {0}")]
    CandidateNotFound(u64),

    #[error("invalid job status: {0}")]
    InvalidStatus(String),

    #[error("invalid stage: {0}")]
    InvalidStage(String),

    #[error("invalid question kind: {0}")]
    InvalidQuestionKind(String),

    #[error("invalid title '{0}': must contain at least one alphanumeric character")]
    InvalidTitle(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TalentError>;

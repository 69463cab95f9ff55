use crate::error::{Result, TalentError};
use crate::types::JobStatus;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// A job posting on the board.
///
/// `order` is the explicit board position: strictly positive, unique, and
/// dense (1..=n) after every successful reorder. Only the reorder path is
/// allowed to rewrite it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub status: JobStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    pub order: u32,
}

impl Job {
    /// Case-insensitive title match used by the board search box.
    pub fn matches_search(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// NewJob / JobPatch
// ---------------------------------------------------------------------------

/// Payload for creating a job. The store assigns `id`, `slug`, and `order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_status")]
    pub status: JobStatus,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_status() -> JobStatus {
    JobStatus::Active
}

/// Partial update of a job's editable fields. `order` is deliberately
/// absent: board position changes only through the reorder operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl JobPatch {
    /// Apply the patch in place. Changing the title re-derives the slug.
    pub fn apply(&self, job: &mut Job) -> Result<()> {
        if let Some(title) = &self.title {
            job.slug = slugify(title)?;
            job.title = title.clone();
        }
        if let Some(description) = &self.description {
            job.description = description.clone();
        }
        if let Some(status) = self.status {
            job.status = status;
        }
        if let Some(tags) = &self.tags {
            job.tags = tags.clone();
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Slug derivation
// ---------------------------------------------------------------------------

fn non_alnum_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap())
}

/// Derive a URL slug from a job title: lowercase, runs of non-alphanumeric
/// characters collapse to a single hyphen, no leading/trailing hyphens.
pub fn slugify(title: &str) -> Result<String> {
    let lowered = title.to_lowercase();
    let slug = non_alnum_re()
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string();
    if slug.is_empty() {
        return Err(TalentError::InvalidTitle(title.to_string()));
    }
    Ok(slug)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

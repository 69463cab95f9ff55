//! Persistent storage for the hiring pipeline using redb.
//!
//! One table per record kind, keyed by auto-incrementing u64 id (assessments
//! are keyed by job id — one per job). Values are JSON-encoded records. A
//! `meta` table carries the schema version; opening an older database bumps
//! the version in place.

use std::path::Path;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::assessment::{Assessment, Submission};
use crate::candidate::{stage_change_text, Candidate, CandidateFilter, NewCandidate};
use crate::error::{Result, TalentError};
use crate::job::{slugify, Job, JobPatch, NewJob};
use crate::reorder::{self, ReorderIntent};
use crate::timeline::{merge_timeline, Note, TimelineEntry, TimelineEvent};
use crate::types::Stage;

// ---------------------------------------------------------------------------
// Table definitions
// ---------------------------------------------------------------------------

const JOBS: TableDefinition<u64, &[u8]> = TableDefinition::new("jobs");
const CANDIDATES: TableDefinition<u64, &[u8]> = TableDefinition::new("candidates");
const TIMELINE: TableDefinition<u64, &[u8]> = TableDefinition::new("timeline_events");
const NOTES: TableDefinition<u64, &[u8]> = TableDefinition::new("notes");
/// Keyed by job id, not an auto-increment counter.
const ASSESSMENTS: TableDefinition<u64, &[u8]> = TableDefinition::new("assessments");
const SUBMISSIONS: TableDefinition<u64, &[u8]> = TableDefinition::new("submissions");
const META: TableDefinition<&str, u32> = TableDefinition::new("meta");

pub const SCHEMA_VERSION: u32 = 1;

fn storage(e: impl std::fmt::Display) -> TalentError {
    TalentError::Storage(e.to_string())
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Embedded store of jobs, candidates, assessments, and candidate history.
///
/// Every write happens inside a single redb write transaction, so readers
/// never observe a partially-applied mutation.
pub struct Store {
    db: Database,
}

impl Store {
    /// Open or create the database at `path`, ensuring all tables exist and
    /// the schema version is current.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::create(path).map_err(storage)?;
        let wt = db.begin_write().map_err(storage)?;
        {
            wt.open_table(JOBS).map_err(storage)?;
            wt.open_table(CANDIDATES).map_err(storage)?;
            wt.open_table(TIMELINE).map_err(storage)?;
            wt.open_table(NOTES).map_err(storage)?;
            wt.open_table(ASSESSMENTS).map_err(storage)?;
            wt.open_table(SUBMISSIONS).map_err(storage)?;

            let mut meta = wt.open_table(META).map_err(storage)?;
            let stored = meta
                .get("schema_version")
                .map_err(storage)?
                .map(|g| g.value());
            match stored {
                Some(v) if v == SCHEMA_VERSION => {}
                Some(v) if v < SCHEMA_VERSION => {
                    // Bump-only migration: no data transforms exist yet.
                    meta.insert("schema_version", SCHEMA_VERSION)
                        .map_err(storage)?;
                }
                Some(v) => {
                    return Err(TalentError::Storage(format!(
                        "database schema v{v} is newer than supported v{SCHEMA_VERSION}"
                    )));
                }
                None => {
                    meta.insert("schema_version", SCHEMA_VERSION)
                        .map_err(storage)?;
                }
            }
        }
        wt.commit().map_err(storage)?;
        Ok(Self { db })
    }

    pub fn schema_version(&self) -> Result<u32> {
        let rt = self.db.begin_read().map_err(storage)?;
        let meta = rt.open_table(META).map_err(storage)?;
        let v = meta
            .get("schema_version")
            .map_err(storage)?
            .map(|g| g.value())
            .unwrap_or(0);
        Ok(v)
    }

    fn read_all<T: DeserializeOwned>(&self, def: TableDefinition<u64, &[u8]>) -> Result<Vec<T>> {
        let rt = self.db.begin_read().map_err(storage)?;
        let table = rt.open_table(def).map_err(storage)?;
        let mut out = Vec::new();
        for entry in table.iter().map_err(storage)? {
            let (_, v) = entry.map_err(storage)?;
            out.push(decode(v.value())?);
        }
        Ok(out)
    }

    fn count(&self, def: TableDefinition<u64, &[u8]>) -> Result<u64> {
        let rt = self.db.begin_read().map_err(storage)?;
        let table = rt.open_table(def).map_err(storage)?;
        table.len().map_err(storage)
    }

    // -----------------------------------------------------------------------
    // Jobs
    // -----------------------------------------------------------------------

    /// Create a job: id auto-assigned, slug derived from the title, and
    /// `order = count + 1` so new jobs land at the end of the board.
    pub fn insert_job(&self, new: NewJob) -> Result<Job> {
        let slug = slugify(&new.title)?;
        let wt = self.db.begin_write().map_err(storage)?;
        let job = {
            let mut table = wt.open_table(JOBS).map_err(storage)?;
            let count = table.len().map_err(storage)?;
            let id = table
                .last()
                .map_err(storage)?
                .map(|(k, _)| k.value() + 1)
                .unwrap_or(1);
            let job = Job {
                id,
                title: new.title,
                slug,
                description: new.description,
                status: new.status,
                tags: new.tags,
                order: count as u32 + 1,
            };
            table
                .insert(id, encode(&job)?.as_slice())
                .map_err(storage)?;
            job
        };
        wt.commit().map_err(storage)?;
        Ok(job)
    }

    /// Insert fully-formed jobs with explicit ids and orders. Seed-only.
    pub fn bulk_add_jobs(&self, jobs: &[Job]) -> Result<()> {
        let wt = self.db.begin_write().map_err(storage)?;
        {
            let mut table = wt.open_table(JOBS).map_err(storage)?;
            for job in jobs {
                table
                    .insert(job.id, encode(job)?.as_slice())
                    .map_err(storage)?;
            }
        }
        wt.commit().map_err(storage)?;
        Ok(())
    }

    pub fn job(&self, id: u64) -> Result<Job> {
        let rt = self.db.begin_read().map_err(storage)?;
        let table = rt.open_table(JOBS).map_err(storage)?;
        let bytes = table
            .get(id)
            .map_err(storage)?
            .map(|g| g.value().to_vec())
            .ok_or(TalentError::JobNotFound(id))?;
        decode(&bytes)
    }

    pub fn update_job(&self, id: u64, patch: &JobPatch) -> Result<Job> {
        let wt = self.db.begin_write().map_err(storage)?;
        let job = {
            let mut table = wt.open_table(JOBS).map_err(storage)?;
            let bytes = table
                .get(id)
                .map_err(storage)?
                .map(|g| g.value().to_vec())
                .ok_or(TalentError::JobNotFound(id))?;
            let mut job: Job = decode(&bytes)?;
            patch.apply(&mut job)?;
            table
                .insert(id, encode(&job)?.as_slice())
                .map_err(storage)?;
            job
        };
        wt.commit().map_err(storage)?;
        Ok(job)
    }

    /// All jobs ordered by `order` ascending, ties broken by id for
    /// determinism (ties should not occur at committed states).
    pub fn jobs_sorted(&self) -> Result<Vec<Job>> {
        let mut jobs: Vec<Job> = self.read_all(JOBS)?;
        jobs.sort_by(|a, b| a.order.cmp(&b.order).then(a.id.cmp(&b.id)));
        Ok(jobs)
    }

    /// Overwrite exactly the given jobs, keyed by id, in one transaction.
    /// Readers never observe a partially-applied reassignment.
    pub fn replace_jobs(&self, jobs: &[Job]) -> Result<()> {
        let wt = self.db.begin_write().map_err(storage)?;
        {
            let mut table = wt.open_table(JOBS).map_err(storage)?;
            for job in jobs {
                table
                    .insert(job.id, encode(job)?.as_slice())
                    .map_err(storage)?;
            }
        }
        wt.commit().map_err(storage)?;
        Ok(())
    }

    /// Apply a reorder intent against current board order and persist the
    /// renumbered sequence. Returns the new sorted sequence.
    pub fn reorder_jobs(&self, intent: ReorderIntent) -> Result<Vec<Job>> {
        let mut jobs = self.jobs_sorted()?;
        reorder::reorder(&mut jobs, intent)?;
        self.replace_jobs(&jobs)?;
        Ok(jobs)
    }

    pub fn job_count(&self) -> Result<u64> {
        self.count(JOBS)
    }

    // -----------------------------------------------------------------------
    // Candidates
    // -----------------------------------------------------------------------

    /// Create a candidate. Stage is forced to `applied` regardless of input.
    pub fn insert_candidate(&self, new: NewCandidate) -> Result<Candidate> {
        let wt = self.db.begin_write().map_err(storage)?;
        let candidate = {
            let mut table = wt.open_table(CANDIDATES).map_err(storage)?;
            let id = table
                .last()
                .map_err(storage)?
                .map(|(k, _)| k.value() + 1)
                .unwrap_or(1);
            let candidate = Candidate {
                id,
                name: new.name,
                email: new.email,
                stage: Stage::Applied,
                job_id: new.job_id,
            };
            table
                .insert(id, encode(&candidate)?.as_slice())
                .map_err(storage)?;
            candidate
        };
        wt.commit().map_err(storage)?;
        Ok(candidate)
    }

    /// Insert fully-formed candidates with explicit ids. Seed-only.
    pub fn bulk_add_candidates(&self, candidates: &[Candidate]) -> Result<()> {
        let wt = self.db.begin_write().map_err(storage)?;
        {
            let mut table = wt.open_table(CANDIDATES).map_err(storage)?;
            for candidate in candidates {
                table
                    .insert(candidate.id, encode(candidate)?.as_slice())
                    .map_err(storage)?;
            }
        }
        wt.commit().map_err(storage)?;
        Ok(())
    }

    pub fn candidate(&self, id: u64) -> Result<Candidate> {
        let rt = self.db.begin_read().map_err(storage)?;
        let table = rt.open_table(CANDIDATES).map_err(storage)?;
        let bytes = table
            .get(id)
            .map_err(storage)?
            .map(|g| g.value().to_vec())
            .ok_or(TalentError::CandidateNotFound(id))?;
        decode(&bytes)
    }

    pub fn candidates(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>> {
        let all: Vec<Candidate> = self.read_all(CANDIDATES)?;
        Ok(all.into_iter().filter(|c| filter.matches(c)).collect())
    }

    pub fn candidates_for_job(&self, job_id: u64) -> Result<Vec<Candidate>> {
        let all: Vec<Candidate> = self.read_all(CANDIDATES)?;
        Ok(all.into_iter().filter(|c| c.job_id == job_id).collect())
    }

    /// Move a candidate to a new stage and append the matching timeline
    /// event, atomically.
    pub fn change_stage(&self, id: u64, new_stage: Stage) -> Result<Candidate> {
        let wt = self.db.begin_write().map_err(storage)?;
        let updated = {
            let mut candidates = wt.open_table(CANDIDATES).map_err(storage)?;
            let bytes = candidates
                .get(id)
                .map_err(storage)?
                .map(|g| g.value().to_vec())
                .ok_or(TalentError::CandidateNotFound(id))?;
            let mut candidate: Candidate = decode(&bytes)?;
            let old_stage = candidate.stage;
            candidate.stage = new_stage;
            candidates
                .insert(id, encode(&candidate)?.as_slice())
                .map_err(storage)?;

            let mut events = wt.open_table(TIMELINE).map_err(storage)?;
            let event_id = events
                .last()
                .map_err(storage)?
                .map(|(k, _)| k.value() + 1)
                .unwrap_or(1);
            let event = TimelineEvent {
                id: event_id,
                candidate_id: id,
                timestamp: Utc::now(),
                text: stage_change_text(old_stage, new_stage),
            };
            events
                .insert(event_id, encode(&event)?.as_slice())
                .map_err(storage)?;

            candidate
        };
        wt.commit().map_err(storage)?;
        Ok(updated)
    }

    pub fn candidate_count(&self) -> Result<u64> {
        self.count(CANDIDATES)
    }

    // -----------------------------------------------------------------------
    // Timeline and notes
    // -----------------------------------------------------------------------

    pub fn add_timeline_event(
        &self,
        candidate_id: u64,
        timestamp: DateTime<Utc>,
        text: impl Into<String>,
    ) -> Result<TimelineEvent> {
        let wt = self.db.begin_write().map_err(storage)?;
        let event = {
            let mut table = wt.open_table(TIMELINE).map_err(storage)?;
            let id = table
                .last()
                .map_err(storage)?
                .map(|(k, _)| k.value() + 1)
                .unwrap_or(1);
            let event = TimelineEvent {
                id,
                candidate_id,
                timestamp,
                text: text.into(),
            };
            table
                .insert(id, encode(&event)?.as_slice())
                .map_err(storage)?;
            event
        };
        wt.commit().map_err(storage)?;
        Ok(event)
    }

    pub fn timeline_events(&self, candidate_id: u64) -> Result<Vec<TimelineEvent>> {
        let all: Vec<TimelineEvent> = self.read_all(TIMELINE)?;
        Ok(all
            .into_iter()
            .filter(|e| e.candidate_id == candidate_id)
            .collect())
    }

    pub fn timeline_event_count(&self) -> Result<u64> {
        self.count(TIMELINE)
    }

    pub fn add_note(&self, candidate_id: u64, content: impl Into<String>) -> Result<Note> {
        // Fail early rather than attach notes to a missing candidate.
        self.candidate(candidate_id)?;
        let wt = self.db.begin_write().map_err(storage)?;
        let note = {
            let mut table = wt.open_table(NOTES).map_err(storage)?;
            let id = table
                .last()
                .map_err(storage)?
                .map(|(k, _)| k.value() + 1)
                .unwrap_or(1);
            let note = Note {
                id,
                candidate_id,
                content: content.into(),
                created_at: Utc::now(),
            };
            table
                .insert(id, encode(&note)?.as_slice())
                .map_err(storage)?;
            note
        };
        wt.commit().map_err(storage)?;
        Ok(note)
    }

    /// Notes for a candidate in insertion order (oldest first).
    pub fn notes(&self, candidate_id: u64) -> Result<Vec<Note>> {
        let all: Vec<Note> = self.read_all(NOTES)?;
        Ok(all
            .into_iter()
            .filter(|n| n.candidate_id == candidate_id)
            .collect())
    }

    /// Stage events and notes merged into one newest-first history.
    pub fn candidate_timeline(&self, candidate_id: u64) -> Result<Vec<TimelineEntry>> {
        let events = self.timeline_events(candidate_id)?;
        let notes = self.notes(candidate_id)?;
        Ok(merge_timeline(&events, &notes))
    }

    // -----------------------------------------------------------------------
    // Assessments
    // -----------------------------------------------------------------------

    pub fn assessment(&self, job_id: u64) -> Result<Option<Assessment>> {
        let rt = self.db.begin_read().map_err(storage)?;
        let table = rt.open_table(ASSESSMENTS).map_err(storage)?;
        let bytes = table
            .get(job_id)
            .map_err(storage)?
            .map(|g| g.value().to_vec());
        match bytes {
            Some(b) => Ok(Some(decode(&b)?)),
            None => Ok(None),
        }
    }

    /// Insert or replace the assessment for its job.
    pub fn put_assessment(&self, assessment: &Assessment) -> Result<()> {
        let wt = self.db.begin_write().map_err(storage)?;
        {
            let mut table = wt.open_table(ASSESSMENTS).map_err(storage)?;
            table
                .insert(assessment.job_id, encode(assessment)?.as_slice())
                .map_err(storage)?;
        }
        wt.commit().map_err(storage)?;
        Ok(())
    }

    pub fn assessment_count(&self) -> Result<u64> {
        self.count(ASSESSMENTS)
    }

    pub fn record_submission(&self, submission: &Submission) -> Result<u64> {
        let wt = self.db.begin_write().map_err(storage)?;
        let id = {
            let mut table = wt.open_table(SUBMISSIONS).map_err(storage)?;
            let id = table
                .last()
                .map_err(storage)?
                .map(|(k, _)| k.value() + 1)
                .unwrap_or(1);
            table
                .insert(id, encode(submission)?.as_slice())
                .map_err(storage)?;
            id
        };
        wt.commit().map_err(storage)?;
        Ok(id)
    }

    pub fn submissions_for_job(&self, job_id: u64) -> Result<Vec<Submission>> {
        let all: Vec<Submission> = self.read_all(SUBMISSIONS)?;
        Ok(all.into_iter().filter(|s| s.job_id == job_id).collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

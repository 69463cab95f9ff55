//! Optimistic update coordinators.
//!
//! Both flows follow the same lifecycle: cancel the pending refetch of the
//! affected view, snapshot it, apply the mutation locally for immediate
//! feedback, issue the request, roll back to the snapshot on failure, and
//! in every case refetch the authoritative state. The refetch commits only
//! if its generation token is still current, so a reorder issued while a
//! slow read is in flight cannot be clobbered by that read landing late.
//!
//! Only one optimistic operation is outstanding per view: a second intent
//! snapshots from the then-current (possibly still-optimistic) view, so its
//! rollback restores the state immediately before that particular
//! operation, not the pre-session state. Each operation is independently
//! retryable by re-dragging.

use crate::api::{CandidatesApi, JobsApi};
use crate::cache::QueryCache;
use crate::notify::Notices;
use talentflow_core::candidate::Candidate;
use talentflow_core::job::Job;
use talentflow_core::reorder::{self, ReorderIntent};
use talentflow_core::types::Stage;

// ---------------------------------------------------------------------------
// JobsCoordinator
// ---------------------------------------------------------------------------

/// Cached jobs-board view plus the reorder flow over it.
pub struct JobsCoordinator {
    pub cache: QueryCache<Job>,
    notices: Notices,
}

impl JobsCoordinator {
    pub fn new(notices: Notices) -> Self {
        Self {
            cache: QueryCache::new(),
            notices,
        }
    }

    /// Authoritative load of the board. Discarded if a newer operation
    /// cancels it while the fetch is in flight.
    pub async fn refresh(&self, api: &impl JobsApi) -> bool {
        let token = self.cache.token();
        match api.fetch_jobs().await {
            Ok(jobs) => self.cache.commit_if_current(token, jobs),
            Err(err) => {
                tracing::warn!(error = %err, "jobs refresh failed");
                false
            }
        }
    }

    /// Drag-and-drop reorder with optimistic feedback and rollback.
    pub async fn reorder(&self, api: &impl JobsApi, intent: ReorderIntent) {
        // Cancel any in-flight refresh so a stale read cannot clobber the
        // optimistic write below.
        let token = self.cache.cancel();
        let snapshot = self.cache.read();

        // Apply the same single-element move the server will perform. No
        // renumbering client-side: array position encodes display order.
        if let Some(mut view) = snapshot.clone() {
            if reorder::apply_move(&mut view, intent).is_ok() {
                self.cache.set(view);
            }
        }

        match api.reorder_job(intent).await {
            Ok(()) => {
                tracing::debug!(
                    moved = intent.moved_id,
                    reference = intent.reference_id,
                    "reorder confirmed"
                );
                self.notices.success("Job order saved.");
            }
            Err(err) => {
                // Any failure kind triggers the same rollback; the
                // distinction only matters for the log line.
                tracing::warn!(error = %err, "reorder failed, rolling back");
                self.cache.restore(snapshot);
                self.notices.error("Failed to reorder job. Reverting change.");
            }
        }

        // Final consistency backstop: the optimistic view is provisional
        // until this lands (or is superseded by a newer operation).
        match api.fetch_jobs().await {
            Ok(jobs) => {
                self.cache.commit_if_current(token, jobs);
            }
            Err(err) => tracing::warn!(error = %err, "refetch after reorder failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// CandidatesCoordinator
// ---------------------------------------------------------------------------

/// Cached pipeline view plus the optimistic stage-move flow over it.
pub struct CandidatesCoordinator {
    pub cache: QueryCache<Candidate>,
    notices: Notices,
}

impl CandidatesCoordinator {
    pub fn new(notices: Notices) -> Self {
        Self {
            cache: QueryCache::new(),
            notices,
        }
    }

    pub async fn refresh(&self, api: &impl CandidatesApi) -> bool {
        let token = self.cache.token();
        match api.fetch_candidates().await {
            Ok(candidates) => self.cache.commit_if_current(token, candidates),
            Err(err) => {
                tracing::warn!(error = %err, "candidates refresh failed");
                false
            }
        }
    }

    /// Kanban card drop: optimistically move one candidate to a new stage.
    pub async fn move_stage(&self, api: &impl CandidatesApi, candidate_id: u64, stage: Stage) {
        let token = self.cache.cancel();
        let snapshot = self.cache.read();

        if let Some(mut view) = snapshot.clone() {
            if let Some(candidate) = view.iter_mut().find(|c| c.id == candidate_id) {
                candidate.stage = stage;
                self.cache.set(view);
            }
        }

        match api.change_stage(candidate_id, stage).await {
            Ok(_) => {
                self.notices.success("Candidate stage updated!");
            }
            Err(err) => {
                tracing::warn!(error = %err, candidate = candidate_id, "stage move failed, rolling back");
                self.cache.restore(snapshot);
                self.notices.error("Failed to update stage. Reverting change.");
            }
        }

        match api.fetch_candidates().await {
            Ok(candidates) => {
                self.cache.commit_if_current(token, candidates);
            }
            Err(err) => tracing::warn!(error = %err, "refetch after stage move failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

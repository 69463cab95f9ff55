use crate::error::{Result, TalentError};
use crate::job::Job;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ReorderIntent
// ---------------------------------------------------------------------------

/// A drag-and-drop instruction: place `moved_id` at the position currently
/// occupied by `reference_id`. Both ids must exist in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderIntent {
    pub moved_id: u64,
    pub reference_id: u64,
}

// ---------------------------------------------------------------------------
// List-move + renumbering
// ---------------------------------------------------------------------------

/// Move the entity `moved_id` to the position `reference_id` currently holds.
///
/// Standard single-element list move, not a swap: both positions are located
/// against the incoming sequence, the moved element is removed, then
/// reinserted at the reference's former index. Moving forward shifts the
/// elements in between left by one; moving backward shifts them right.
///
/// Array position encodes the order here; `order` fields are untouched. The
/// client-side optimistic path uses this directly, the persistence path
/// follows it with [`renumber`].
pub fn apply_move(jobs: &mut Vec<Job>, intent: ReorderIntent) -> Result<()> {
    let from = jobs
        .iter()
        .position(|j| j.id == intent.moved_id)
        .ok_or(TalentError::JobNotFound(intent.moved_id))?;
    let to = jobs
        .iter()
        .position(|j| j.id == intent.reference_id)
        .ok_or(TalentError::JobNotFound(intent.reference_id))?;

    let moved = jobs.remove(from);
    jobs.insert(to, moved);
    Ok(())
}

/// Reassign `order = index + 1` across the whole sequence.
///
/// Full renumbering rather than delta patching, so the dense/unique/ascending
/// invariant holds after every successful reorder regardless of prior drift.
pub fn renumber(jobs: &mut [Job]) {
    for (index, job) in jobs.iter_mut().enumerate() {
        job.order = index as u32 + 1;
    }
}

/// The full reorder computation: move, then renumber. The result is the
/// exact sequence the store persists.
pub fn reorder(jobs: &mut Vec<Job>, intent: ReorderIntent) -> Result<()> {
    apply_move(jobs, intent)?;
    renumber(jobs);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TimelineEvent / Note
// ---------------------------------------------------------------------------

/// A recorded pipeline event for a candidate (stage moves, application).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: u64,
    pub candidate_id: u64,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

/// A free-form recruiter note attached to a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub candidate_id: u64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Merged timeline
// ---------------------------------------------------------------------------

/// One row of a candidate's combined history, newest first. Events and notes
/// keep distinct id prefixes so the two id spaces cannot collide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub event: String,
}

/// Merge stage events and notes into a single newest-first history.
pub fn merge_timeline(events: &[TimelineEvent], notes: &[Note]) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = events
        .iter()
        .map(|e| TimelineEntry {
            id: format!("evt-{}", e.id),
            date: e.timestamp,
            event: e.text.clone(),
        })
        .chain(notes.iter().map(|n| TimelineEntry {
            id: format!("note-{}", n.id),
            date: n.created_at,
            event: format!("Note added: \"{}\"", n.content),
        }))
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

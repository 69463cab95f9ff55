use crate::types::Stage;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub stage: Stage,
    pub job_id: u64,
}

impl Candidate {
    /// Case-insensitive name/email match used by the pipeline search box.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.email.to_lowercase().contains(&term)
    }
}

/// Payload for creating a candidate. The store assigns the id and forces
/// `stage = applied`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub job_id: u64,
}

/// Timeline text recorded when a candidate moves between stages.
pub fn stage_change_text(from: Stage, to: Stage) -> String {
    format!("Moved from '{from}' to '{to}' stage.")
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Server-side filtering for the candidates listing.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub stage: Option<Stage>,
    pub search: Option<String>,
}

impl CandidateFilter {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        if let Some(stage) = self.stage {
            if candidate.stage != stage {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !candidate.matches_search(search) {
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        Candidate {
            id: 1,
            name: "Aisha Khan #1".into(),
            email: "aisha.khan1@example.com".into(),
            stage: Stage::Screen,
            job_id: 3,
        }
    }

    #[test]
    fn search_matches_name_or_email() {
        let c = candidate();
        assert!(c.matches_search("aisha"));
        assert!(c.matches_search("KHAN1@example"));
        assert!(!c.matches_search("bob"));
    }

    #[test]
    fn filter_by_stage_and_search() {
        let c = candidate();
        let f = CandidateFilter {
            stage: Some(Stage::Screen),
            search: Some("aisha".into()),
        };
        assert!(f.matches(&c));

        let f = CandidateFilter {
            stage: Some(Stage::Hired),
            search: None,
        };
        assert!(!f.matches(&c));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(CandidateFilter::default().matches(&candidate()));
    }

    #[test]
    fn stage_change_text_format() {
        assert_eq!(
            stage_change_text(Stage::Applied, Stage::Screen),
            "Moved from 'applied' to 'screen' stage."
        );
    }
}

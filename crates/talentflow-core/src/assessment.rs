use crate::types::QuestionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Assessment structure
// ---------------------------------------------------------------------------

/// A quiz attached to a job, keyed by the job's id. One assessment per job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub job_id: u64,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Assessment {
    /// The default structure returned when a job has no stored assessment.
    pub fn empty(job_id: u64) -> Self {
        Self {
            job_id,
            sections: Vec::new(),
        }
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// A completed assessment run. Answers are stored as submitted, keyed by
/// question id; the engine does not interpret them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub job_id: u64,
    pub answers: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_assessment_has_no_sections() {
        let a = Assessment::empty(42);
        assert_eq!(a.job_id, 42);
        assert!(a.sections.is_empty());
        assert_eq!(a.question_count(), 0);
    }

    #[test]
    fn assessment_json_roundtrip() {
        let a = Assessment {
            job_id: 1,
            sections: vec![Section {
                id: "s1".into(),
                title: "React Fundamentals".into(),
                questions: vec![
                    Question {
                        id: "q1".into(),
                        kind: QuestionKind::SingleChoice,
                        text: "What is JSX?".into(),
                        options: vec![
                            ChoiceOption {
                                id: "o1".into(),
                                text: "A JavaScript syntax extension".into(),
                            },
                            ChoiceOption {
                                id: "o2".into(),
                                text: "A CSS preprocessor".into(),
                            },
                        ],
                    },
                    Question {
                        id: "q2".into(),
                        kind: QuestionKind::ShortText,
                        text: "Describe a component.".into(),
                        options: Vec::new(),
                    },
                ],
            }],
        };
        let json = serde_json::to_string(&a).unwrap();
        let parsed: Assessment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, a);
        assert_eq!(parsed.question_count(), 2);
    }

    #[test]
    fn text_questions_omit_options_in_json() {
        let q = Question {
            id: "q1".into(),
            kind: QuestionKind::LongText,
            text: "Explain the request/response cycle.".into(),
            options: Vec::new(),
        };
        let json = serde_json::to_string(&q).unwrap();
        assert!(!json.contains("options"));
    }
}

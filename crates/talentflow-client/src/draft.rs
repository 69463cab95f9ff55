//! In-progress assessment form state: the builder edits sections and
//! questions locally, then saves the whole structure with one PUT. Freshly
//! added items carry `temp_` ids until the save round-trips.

use talentflow_core::assessment::{Assessment, Question, Section};
use talentflow_core::types::QuestionKind;

pub struct AssessmentDraft {
    job_id: u64,
    sections: Vec<Section>,
    next_temp: u32,
}

impl AssessmentDraft {
    pub fn new(job_id: u64) -> Self {
        Self {
            job_id,
            sections: Vec::new(),
            next_temp: 0,
        }
    }

    /// Replace the draft with a fetched assessment (builder page load).
    pub fn load(assessment: Assessment) -> Self {
        Self {
            job_id: assessment.job_id,
            sections: assessment.sections,
            next_temp: 0,
        }
    }

    pub fn job_id(&self) -> u64 {
        self.job_id
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    fn temp_id(&mut self, prefix: &str) -> String {
        self.next_temp += 1;
        format!("temp_{prefix}{}", self.next_temp)
    }

    /// Append a new empty section with a placeholder title.
    pub fn add_section(&mut self) -> &Section {
        let id = self.temp_id("s");
        self.sections.push(Section {
            id,
            title: "New Section".into(),
            questions: Vec::new(),
        });
        self.sections.last().unwrap()
    }

    /// Returns false when no section has the given id.
    pub fn update_section_title(&mut self, section_id: &str, title: impl Into<String>) -> bool {
        match self.sections.iter_mut().find(|s| s.id == section_id) {
            Some(section) => {
                section.title = title.into();
                true
            }
            None => false,
        }
    }

    pub fn add_question(&mut self, section_id: &str, kind: QuestionKind) -> Option<&Question> {
        let id = self.temp_id("q");
        let section = self.sections.iter_mut().find(|s| s.id == section_id)?;
        section.questions.push(Question {
            id,
            kind,
            text: String::new(),
            options: Vec::new(),
        });
        section.questions.last()
    }

    pub fn update_question_text(
        &mut self,
        section_id: &str,
        question_id: &str,
        text: impl Into<String>,
    ) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) else {
            return false;
        };
        match section.questions.iter_mut().find(|q| q.id == question_id) {
            Some(question) => {
                question.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_question(&mut self, section_id: &str, question_id: &str) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) else {
            return false;
        };
        let before = section.questions.len();
        section.questions.retain(|q| q.id != question_id);
        section.questions.len() != before
    }

    /// The PUT payload for saving the draft.
    pub fn to_assessment(&self) -> Assessment {
        Assessment {
            job_id: self.job_id,
            sections: self.sections.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

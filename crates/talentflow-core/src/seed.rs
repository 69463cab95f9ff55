//! Idempotent seed data for an empty store: a fixed jobs board, randomly
//! generated candidates, example history for the first few candidates, and
//! pre-built assessments for the first three jobs. Each section seeds only
//! when its table is empty, so re-running is safe.

use chrono::{TimeZone, Utc};
use rand::seq::SliceRandom;

use crate::assessment::{Assessment, ChoiceOption, Question, Section};
use crate::candidate::Candidate;
use crate::error::Result;
use crate::job::Job;
use crate::store::Store;
use crate::types::{JobStatus, QuestionKind, Stage};

pub const DEFAULT_CANDIDATE_COUNT: usize = 1000;

const FIRST_NAMES: [&str; 11] = [
    "John", "Aisha", "Ben", "Chloe", "David", "Eva", "Frank", "Grace", "Henry", "Isla", "Jack",
];
const LAST_NAMES: [&str; 11] = [
    "Doe", "Khan", "Smith", "Li", "Jones", "Chen", "Williams", "Garcia", "Miller", "Davis",
    "Rodriguez",
];

/// What a [`seed`] run actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub jobs: usize,
    pub candidates: usize,
    pub timeline_events: usize,
    pub assessments: usize,
}

/// Populate an empty store. Sections that already contain data are skipped.
pub fn seed(store: &Store, candidate_count: usize) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if store.job_count()? == 0 {
        let jobs = job_seed();
        store.bulk_add_jobs(&jobs)?;
        report.jobs = jobs.len();
    }

    let jobs = store.jobs_sorted()?;
    if store.candidate_count()? == 0 && !jobs.is_empty() {
        let candidates = generate_candidates(candidate_count, &jobs);
        store.bulk_add_candidates(&candidates)?;
        report.candidates = candidates.len();
    }

    if store.timeline_event_count()? == 0 && store.candidate_count()? >= 5 {
        report.timeline_events = seed_timeline(store)?;
    }

    if store.assessment_count()? == 0 {
        for assessment in assessment_seed() {
            store.put_assessment(&assessment)?;
        }
        report.assessments = 3;
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

fn generate_candidates(count: usize, jobs: &[Job]) -> Vec<Candidate> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let first = FIRST_NAMES.choose(&mut rng).unwrap();
            let last = LAST_NAMES.choose(&mut rng).unwrap();
            let n = i + 1;
            Candidate {
                id: n as u64,
                name: format!("{first} {last} #{n}"),
                email: format!(
                    "{}.{}{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    n
                ),
                stage: *Stage::all().choose(&mut rng).unwrap(),
                job_id: jobs.choose(&mut rng).unwrap().id,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

fn seed_timeline(store: &Store) -> Result<usize> {
    let events: [(u64, (u32, u32, u32, u32), &str); 9] = [
        (1, (2025, 9, 20, 10), "Applied for Frontend Developer."),
        (1, (2025, 9, 21, 11), "Moved from 'applied' to 'screen' stage."),
        (2, (2025, 9, 19, 14), "Applied for Backend Engineer."),
        (3, (2025, 9, 18, 9), "Applied for Full Stack Developer."),
        (3, (2025, 9, 20, 16), "Moved from 'applied' to 'screen' stage."),
        (3, (2025, 9, 22, 13), "Moved from 'screen' to 'tech' stage."),
        (4, (2025, 9, 21, 18), "Applied for Frontend Developer."),
        (5, (2025, 9, 22, 11), "Applied for Backend Engineer."),
        (5, (2025, 9, 23, 10), "Moved from 'applied' to 'rejected' stage."),
    ];
    for (candidate_id, (y, m, d, h), text) in events {
        let ts = Utc.with_ymd_and_hms(y as i32, m, d, h, 0, 0).unwrap();
        store.add_timeline_event(candidate_id, ts, text)?;
    }
    Ok(events.len())
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

fn job_seed() -> Vec<Job> {
    let rows: [(&str, &str, &str, JobStatus, [&str; 3]); 25] = [
        (
            "Frontend Developer",
            "frontend-developer",
            "We are looking for a skilled Frontend Developer to build high-quality user interfaces.",
            JobStatus::Active,
            ["React", "CSS", "TypeScript"],
        ),
        (
            "Backend Engineer",
            "backend-engineer",
            "Design and implement scalable backend services with REST APIs and databases.",
            JobStatus::Active,
            ["Node.js", "SQL", "MongoDB"],
        ),
        (
            "Full Stack Developer",
            "full-stack-developer",
            "Work across frontend and backend to deliver robust applications.",
            JobStatus::Archived,
            ["React", "Node.js", "SQL"],
        ),
        (
            "DevOps Engineer",
            "devops-engineer",
            "Maintain CI/CD pipelines and cloud infrastructure.",
            JobStatus::Active,
            ["AWS", "Docker", "Kubernetes"],
        ),
        (
            "Data Scientist",
            "data-scientist",
            "Analyze datasets and create predictive models.",
            JobStatus::Active,
            ["Python", "Machine Learning", "SQL"],
        ),
        (
            "Machine Learning Engineer",
            "ml-engineer",
            "Deploy machine learning models into production pipelines.",
            JobStatus::Archived,
            ["Python", "Machine Learning", "Docker"],
        ),
        (
            "UI/UX Designer",
            "ui-ux-designer",
            "Design intuitive and user-friendly interfaces.",
            JobStatus::Active,
            ["React", "CSS", "Agile"],
        ),
        (
            "Mobile App Developer",
            "mobile-app-developer",
            "Develop cross-platform mobile apps with smooth performance.",
            JobStatus::Active,
            ["React", "Java", "Testing"],
        ),
        (
            "Cloud Architect",
            "cloud-architect",
            "Design secure and scalable cloud solutions.",
            JobStatus::Archived,
            ["AWS", "Kubernetes", "Docker"],
        ),
        (
            "QA Engineer",
            "qa-engineer",
            "Test applications thoroughly to ensure quality.",
            JobStatus::Active,
            ["Testing", "Agile", "SQL"],
        ),
        (
            "Security Engineer",
            "security-engineer",
            "Implement security best practices and perform audits.",
            JobStatus::Active,
            ["Java", "SQL", "Agile"],
        ),
        (
            "System Administrator",
            "system-administrator",
            "Manage servers, networks, and IT infrastructure.",
            JobStatus::Archived,
            ["Linux", "AWS", "Docker"],
        ),
        (
            "Database Administrator",
            "database-administrator",
            "Maintain databases, ensure backups, and optimize performance.",
            JobStatus::Active,
            ["SQL", "MongoDB", "Python"],
        ),
        (
            "AI Researcher",
            "ai-researcher",
            "Conduct research in artificial intelligence and publish findings.",
            JobStatus::Active,
            ["Python", "Machine Learning", "C++"],
        ),
        (
            "Product Manager",
            "product-manager",
            "Define product strategy and coordinate between teams.",
            JobStatus::Archived,
            ["Agile", "React", "SQL"],
        ),
        (
            "Technical Writer",
            "technical-writer",
            "Create clear documentation for software systems.",
            JobStatus::Active,
            ["Agile", "Testing", "SQL"],
        ),
        (
            "Game Developer",
            "game-developer",
            "Develop engaging games with smooth graphics.",
            JobStatus::Active,
            ["C++", "Java", "React"],
        ),
        (
            "Blockchain Developer",
            "blockchain-developer",
            "Build decentralized applications and smart contracts.",
            JobStatus::Archived,
            ["Java", "SQL", "Testing"],
        ),
        (
            "Site Reliability Engineer",
            "sre",
            "Ensure high availability and reliability of services.",
            JobStatus::Active,
            ["AWS", "Kubernetes", "SQL"],
        ),
        (
            "Network Engineer",
            "network-engineer",
            "Design and maintain network infrastructure.",
            JobStatus::Active,
            ["Linux", "Docker", "Agile"],
        ),
        (
            "Data Engineer",
            "data-engineer",
            "Build and maintain data pipelines.",
            JobStatus::Archived,
            ["Python", "SQL", "AWS"],
        ),
        (
            "Business Analyst",
            "business-analyst",
            "Analyze requirements and bridge business needs with technical solutions.",
            JobStatus::Active,
            ["Agile", "SQL", "React"],
        ),
        (
            "Support Engineer",
            "support-engineer",
            "Provide technical support and troubleshoot issues.",
            JobStatus::Active,
            ["Testing", "Agile", "SQL"],
        ),
        (
            "Embedded Systems Engineer",
            "embedded-systems-engineer",
            "Develop low-level software for embedded systems.",
            JobStatus::Archived,
            ["C++", "Python", "Testing"],
        ),
        (
            "AR/VR Developer",
            "ar-vr-developer",
            "Create immersive AR/VR experiences.",
            JobStatus::Active,
            ["React", "C++", "Java"],
        ),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (title, slug, description, status, tags))| Job {
            id: i as u64 + 1,
            title: (*title).to_string(),
            slug: (*slug).to_string(),
            description: (*description).to_string(),
            status: *status,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            order: i as u32 + 1,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

fn choice(id: &str, text: &str) -> ChoiceOption {
    ChoiceOption {
        id: id.into(),
        text: text.into(),
    }
}

fn assessment_seed() -> Vec<Assessment> {
    vec![
        Assessment {
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
                            choice("o1", "A JavaScript syntax extension"),
                            choice("o2", "A CSS preprocessor"),
                            choice("o3", "A database query language"),
                        ],
                    },
                    Question {
                        id: "q2".into(),
                        kind: QuestionKind::MultiChoice,
                        text: "Which of the following are React hooks?".into(),
                        options: vec![
                            choice("o4", "useState"),
                            choice("o5", "useEffect"),
                            choice("o6", "useQuery"),
                        ],
                    },
                    Question {
                        id: "q3".into(),
                        kind: QuestionKind::ShortText,
                        text: "In one sentence, what is the purpose of a React component?".into(),
                        options: Vec::new(),
                    },
                ],
            }],
        },
        Assessment {
            job_id: 2,
            sections: vec![Section {
                id: "s2".into(),
                title: "API & Database Concepts".into(),
                questions: vec![
                    Question {
                        id: "q4".into(),
                        kind: QuestionKind::SingleChoice,
                        text: "Which HTTP method is typically used to create a new resource?"
                            .into(),
                        options: vec![
                            choice("o7", "GET"),
                            choice("o8", "POST"),
                            choice("o9", "DELETE"),
                        ],
                    },
                    Question {
                        id: "q5".into(),
                        kind: QuestionKind::ShortText,
                        text: "What is the purpose of a database index?".into(),
                        options: Vec::new(),
                    },
                ],
            }],
        },
        Assessment {
            job_id: 3,
            sections: vec![Section {
                id: "s3".into(),
                title: "Full Stack Knowledge".into(),
                questions: vec![
                    Question {
                        id: "q6".into(),
                        kind: QuestionKind::LongText,
                        text: "Describe the request/response cycle in a typical web application."
                            .into(),
                        options: Vec::new(),
                    },
                    Question {
                        id: "q7".into(),
                        kind: QuestionKind::SingleChoice,
                        text: "What does CORS stand for?".into(),
                        options: vec![
                            choice("o10", "Cross-Origin Resource Sharing"),
                            choice("o11", "Cascading Origin Style Sheets"),
                            choice("o12", "Central Origin Request Service"),
                        ],
                    },
                ],
            }],
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_tmp() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(&dir.path().join("seed.redb")).unwrap();
        (dir, store)
    }

    #[test]
    fn seeds_everything_on_empty_store() {
        let (_dir, store) = open_tmp();
        let report = seed(&store, 50).unwrap();
        assert_eq!(report.jobs, 25);
        assert_eq!(report.candidates, 50);
        assert_eq!(report.timeline_events, 9);
        assert_eq!(report.assessments, 3);

        let jobs = store.jobs_sorted().unwrap();
        assert_eq!(jobs.len(), 25);
        let orders: Vec<u32> = jobs.iter().map(|j| j.order).collect();
        assert_eq!(orders, (1..=25).collect::<Vec<u32>>());
    }

    #[test]
    fn reseed_is_a_noop() {
        let (_dir, store) = open_tmp();
        seed(&store, 10).unwrap();
        let report = seed(&store, 10).unwrap();
        assert_eq!(report, SeedReport::default());
        assert_eq!(store.candidate_count().unwrap(), 10);
    }

    #[test]
    fn candidates_reference_seeded_jobs() {
        let (_dir, store) = open_tmp();
        seed(&store, 20).unwrap();
        let candidates = store.candidates(&Default::default()).unwrap();
        assert_eq!(candidates.len(), 20);
        for c in candidates {
            assert!((1..=25).contains(&c.job_id));
            assert!(c.email.ends_with("@example.com"));
        }
    }

    #[test]
    fn first_job_has_assessment() {
        let (_dir, store) = open_tmp();
        seed(&store, 5).unwrap();
        let a = store.assessment(1).unwrap().unwrap();
        assert_eq!(a.sections[0].title, "React Fundamentals");
        assert_eq!(a.question_count(), 3);
    }
}

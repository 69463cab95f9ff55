use crate::output::print_json;
use talentflow_core::config::Config;
use talentflow_core::seed::{self, DEFAULT_CANDIDATE_COUNT};
use talentflow_core::store::Store;

pub fn run(config: &Config, candidates: Option<usize>, json: bool) -> anyhow::Result<()> {
    let store = Store::open(&config.db_path)?;
    let report = seed::seed(&store, candidates.unwrap_or(DEFAULT_CANDIDATE_COUNT))?;

    if json {
        return print_json(&serde_json::json!({
            "jobs": report.jobs,
            "candidates": report.candidates,
            "timeline_events": report.timeline_events,
            "assessments": report.assessments,
        }));
    }

    if report == Default::default() {
        println!("database already seeded, nothing to do");
    } else {
        println!(
            "seeded {} jobs, {} candidates, {} timeline events, {} assessments",
            report.jobs, report.candidates, report.timeline_events, report.assessments
        );
    }
    Ok(())
}

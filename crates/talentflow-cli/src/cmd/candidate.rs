use crate::output::{print_json, print_table};
use clap::Subcommand;
use talentflow_core::candidate::CandidateFilter;
use talentflow_core::config::Config;
use talentflow_core::store::Store;
use talentflow_core::types::Stage;

#[derive(Subcommand)]
pub enum CandidateSubcommand {
    /// List candidates in the pipeline
    List {
        /// Filter by stage (applied | screen | tech | offer | hired | rejected)
        #[arg(long)]
        stage: Option<String>,
        /// Case-insensitive name/email search
        #[arg(long)]
        search: Option<String>,
    },
    /// Move a candidate to a new stage (records a timeline event)
    Stage { id: u64, stage: String },
    /// Show a candidate's merged history, newest first
    Timeline { id: u64 },
}

pub fn run(config: &Config, subcmd: CandidateSubcommand, json: bool) -> anyhow::Result<()> {
    let store = Store::open(&config.db_path)?;
    match subcmd {
        CandidateSubcommand::List { stage, search } => list(&store, stage, search, json),
        CandidateSubcommand::Stage { id, stage } => change_stage(&store, id, &stage, json),
        CandidateSubcommand::Timeline { id } => timeline(&store, id, json),
    }
}

fn list(
    store: &Store,
    stage: Option<String>,
    search: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let stage = stage.map(|s| s.parse::<Stage>()).transpose()?;
    let candidates = store.candidates(&CandidateFilter { stage, search })?;

    if json {
        return print_json(&candidates);
    }
    let rows = candidates
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.email.clone(),
                c.stage.to_string(),
                c.job_id.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "EMAIL", "STAGE", "JOB"], rows);
    Ok(())
}

fn change_stage(store: &Store, id: u64, stage: &str, json: bool) -> anyhow::Result<()> {
    let stage: Stage = stage.parse()?;
    let candidate = store.change_stage(id, stage)?;

    if json {
        return print_json(&candidate);
    }
    println!("{} is now in '{}'", candidate.name, candidate.stage);
    Ok(())
}

fn timeline(store: &Store, id: u64, json: bool) -> anyhow::Result<()> {
    // 404 semantics: fail before printing an empty history for a ghost id.
    store.candidate(id)?;
    let entries = store.candidate_timeline(id)?;

    if json {
        return print_json(&entries);
    }
    for entry in entries {
        println!("{}  {}", entry.date.format("%Y-%m-%d %H:%M"), entry.event);
    }
    Ok(())
}

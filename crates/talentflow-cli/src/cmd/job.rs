use crate::output::{print_json, print_table};
use clap::Subcommand;
use talentflow_core::config::Config;
use talentflow_core::job::{Job, NewJob};
use talentflow_core::reorder::ReorderIntent;
use talentflow_core::store::Store;
use talentflow_core::types::JobStatus;

#[derive(Subcommand)]
pub enum JobSubcommand {
    /// List the board in display order
    List {
        /// Filter by status (active | archived)
        #[arg(long)]
        status: Option<String>,
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show one job
    Show { id: u64 },
    /// Create a job at the end of the board
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Repeatable: --tag React --tag CSS
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Create as archived instead of active
        #[arg(long)]
        archived: bool,
    },
    /// Move a job to another job's position
    Reorder { moved_id: u64, reference_id: u64 },
}

pub fn run(config: &Config, subcmd: JobSubcommand, json: bool) -> anyhow::Result<()> {
    let store = Store::open(&config.db_path)?;
    match subcmd {
        JobSubcommand::List {
            status,
            search,
            tag,
        } => list(&store, status, search, tag, json),
        JobSubcommand::Show { id } => show(&store, id, json),
        JobSubcommand::Add {
            title,
            description,
            tags,
            archived,
        } => add(&store, title, description, tags, archived, json),
        JobSubcommand::Reorder {
            moved_id,
            reference_id,
        } => reorder(&store, moved_id, reference_id, json),
    }
}

fn list(
    store: &Store,
    status: Option<String>,
    search: Option<String>,
    tag: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut jobs = store.jobs_sorted()?;
    if let Some(status) = status {
        let status: JobStatus = status.parse()?;
        jobs.retain(|j| j.status == status);
    }
    if let Some(tag) = tag {
        jobs.retain(|j| j.tags.iter().any(|t| *t == tag));
    }
    if let Some(search) = search {
        jobs.retain(|j| j.matches_search(&search));
    }

    if json {
        return print_json(&jobs);
    }
    print_board(&jobs);
    Ok(())
}

fn show(store: &Store, id: u64, json: bool) -> anyhow::Result<()> {
    let job = store.job(id)?;
    if json {
        return print_json(&job);
    }
    println!("#{} {} [{}]", job.id, job.title, job.status);
    println!("slug:  {}", job.slug);
    println!("order: {}", job.order);
    println!("tags:  {}", job.tags.join(", "));
    if !job.description.is_empty() {
        println!("\n{}", job.description);
    }
    Ok(())
}

fn add(
    store: &Store,
    title: String,
    description: String,
    tags: Vec<String>,
    archived: bool,
    json: bool,
) -> anyhow::Result<()> {
    let job = store.insert_job(NewJob {
        title,
        description,
        status: if archived {
            JobStatus::Archived
        } else {
            JobStatus::Active
        },
        tags,
    })?;

    if json {
        return print_json(&job);
    }
    println!("created job #{} '{}' at position {}", job.id, job.title, job.order);
    Ok(())
}

fn reorder(store: &Store, moved_id: u64, reference_id: u64, json: bool) -> anyhow::Result<()> {
    let jobs = store.reorder_jobs(ReorderIntent {
        moved_id,
        reference_id,
    })?;

    if json {
        return print_json(&jobs);
    }
    print_board(&jobs);
    Ok(())
}

fn print_board(jobs: &[Job]) {
    let rows = jobs
        .iter()
        .map(|j| {
            vec![
                j.order.to_string(),
                j.id.to_string(),
                j.title.clone(),
                j.status.to_string(),
                j.tags.join(", "),
            ]
        })
        .collect();
    print_table(&["ORDER", "ID", "TITLE", "STATUS", "TAGS"], rows);
}

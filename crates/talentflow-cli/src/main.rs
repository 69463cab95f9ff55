mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{candidate::CandidateSubcommand, job::JobSubcommand};
use std::path::PathBuf;
use talentflow_core::config::{Config, CONFIG_FILE};

#[derive(Parser)]
#[command(
    name = "talentflow",
    about = "Hiring pipeline engine — manage jobs, candidates, and assessments",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./talentflow.yaml if present)
    #[arg(long, global = true, env = "TALENTFLOW_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default talentflow.yaml in the current directory
    Init,

    /// Populate an empty database with demo data
    Seed {
        /// How many candidates to generate
        #[arg(long)]
        candidates: Option<usize>,
    },

    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Enable the demo unreliability preset (latency + 25% reorder failures)
        #[arg(long)]
        demo: bool,

        /// Seed the database before serving if it is empty
        #[arg(long)]
        seed: bool,
    },

    /// Inspect and mutate the jobs board
    Job {
        #[command(subcommand)]
        subcommand: JobSubcommand,
    },

    /// Inspect candidates and move them through the pipeline
    Candidate {
        #[command(subcommand)]
        subcommand: CandidateSubcommand,
    },
}

/// Load the config from `--config`, falling back to ./talentflow.yaml when
/// present, and defaults otherwise.
fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Ok(Config::load(path)?);
    }
    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return Ok(Config::load(&local)?);
    }
    Ok(Config::default())
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    // `init` runs before a config exists; everything else loads it first.
    let result = match cli.command {
        Commands::Init => cmd::init::run(cli.config.as_deref()),
        command => load_config(cli.config.as_ref()).and_then(|config| match command {
            Commands::Init => unreachable!("handled above"),
            Commands::Seed { candidates } => cmd::seed::run(&config, candidates, cli.json),
            Commands::Serve { port, demo, seed } => cmd::serve::run(&config, port, demo, seed),
            Commands::Job { subcommand } => cmd::job::run(&config, subcommand, cli.json),
            Commands::Candidate { subcommand } => {
                cmd::candidate::run(&config, subcommand, cli.json)
            }
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

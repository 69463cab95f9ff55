use std::sync::Arc;
use talentflow_core::config::{Config, SimulationConfig};
use talentflow_core::seed::{self, DEFAULT_CANDIDATE_COUNT};
use talentflow_core::store::Store;
use talentflow_server::state::AppState;

pub fn run(config: &Config, port: Option<u16>, demo: bool, seed_db: bool) -> anyhow::Result<()> {
    let store = Store::open(&config.db_path)?;

    if seed_db {
        let report = seed::seed(&store, DEFAULT_CANDIDATE_COUNT)?;
        if report.jobs > 0 {
            tracing::info!(jobs = report.jobs, candidates = report.candidates, "seeded database");
        }
    }

    let sim = if demo {
        SimulationConfig::demo()
    } else {
        config.simulation.clone()
    };
    if sim.enabled {
        tracing::info!(
            failure_rate = sim.reorder_failure_rate,
            "simulated unreliability enabled"
        );
    }

    let state = AppState::new(Arc::new(store), sim);
    let port = port.unwrap_or(config.server.port);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(talentflow_server::serve(state, port))
}

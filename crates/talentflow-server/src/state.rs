use crate::sim::Simulation;
use std::sync::Arc;
use talentflow_core::config::SimulationConfig;
use talentflow_core::store::Store;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub sim: Simulation,
}

impl AppState {
    pub fn new(store: Arc<Store>, sim: SimulationConfig) -> Self {
        Self {
            store,
            sim: Simulation::new(sim),
        }
    }
}

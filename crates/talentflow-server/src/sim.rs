//! Synthetic network unreliability: bounded random latency on reads and
//! writes, plus a failure roll on the reorder path. Everything is driven by
//! the injectable [`SimulationConfig`]; with `enabled = false` this module
//! is inert and the API is fully deterministic.

use rand::Rng;
use std::time::Duration;
use talentflow_core::config::SimulationConfig;

#[derive(Clone)]
pub struct Simulation {
    cfg: SimulationConfig,
}

impl Simulation {
    pub fn new(cfg: SimulationConfig) -> Self {
        Self { cfg }
    }

    /// Latency applied to collection reads and ordinary mutations.
    pub async fn read_delay(&self) {
        self.delay(self.cfg.read_latency_ms).await;
    }

    /// Latency applied to the reorder path (slower in the demo preset).
    pub async fn reorder_delay(&self) {
        self.delay(self.cfg.reorder_latency_ms).await;
    }

    async fn delay(&self, (lo, hi): (u64, u64)) {
        if !self.cfg.enabled || hi == 0 {
            return;
        }
        let ms = if lo == hi {
            lo
        } else {
            rand::thread_rng().gen_range(lo..=hi)
        };
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// Roll the synthetic failure for a reorder request. When it comes up,
    /// the handler must bail before touching the store.
    pub fn reorder_fails(&self) -> bool {
        if !self.cfg.enabled || self.cfg.reorder_failure_rate <= 0.0 {
            return false;
        }
        rand::thread_rng().gen_bool(self.cfg.reorder_failure_rate)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

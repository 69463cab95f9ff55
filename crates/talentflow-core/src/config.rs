use crate::error::{Result, TalentError};
use crate::io;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "talentflow.yaml";
pub const CONFIG_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_db_path() -> PathBuf {
    PathBuf::from("talentflow.redb")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            db_path: default_db_path(),
            server: ServerConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        let cfg = migrate(cfg)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        io::atomic_write(path, data.as_bytes())
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    4150
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// SimulationConfig
// ---------------------------------------------------------------------------

/// Synthetic network unreliability applied by the API layer.
///
/// Disabled by default: latency and the failure roll only apply when
/// `enabled` is true. [`SimulationConfig::demo`] reproduces the reference
/// behavior used for demoing client-side rollback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_read_latency")]
    pub read_latency_ms: (u64, u64),
    #[serde(default = "default_reorder_latency")]
    pub reorder_latency_ms: (u64, u64),
    #[serde(default = "default_failure_rate")]
    pub reorder_failure_rate: f64,
}

fn default_read_latency() -> (u64, u64) {
    (200, 1200)
}

fn default_reorder_latency() -> (u64, u64) {
    (500, 1300)
}

fn default_failure_rate() -> f64 {
    0.25
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            read_latency_ms: default_read_latency(),
            reorder_latency_ms: default_reorder_latency(),
            reorder_failure_rate: default_failure_rate(),
        }
    }
}

impl SimulationConfig {
    /// The reference demo preset: visible latency plus a 25% reorder
    /// failure rate so rollback is regularly exercised.
    pub fn demo() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Fully deterministic: no latency, no failures. What tests want.
    pub fn off() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.reorder_failure_rate) {
            return Err(TalentError::InvalidConfig(format!(
                "reorder_failure_rate must be within [0, 1], got {}",
                self.reorder_failure_rate
            )));
        }
        for (name, (lo, hi)) in [
            ("read_latency_ms", self.read_latency_ms),
            ("reorder_latency_ms", self.reorder_latency_ms),
        ] {
            if lo > hi {
                return Err(TalentError::InvalidConfig(format!(
                    "{name}: lower bound {lo} exceeds upper bound {hi}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Migration
// ---------------------------------------------------------------------------

/// Run any pending schema migrations on a loaded [`Config`].
///
/// Currently a no-op — config v1 has no migrations. When the schema changes
/// in ways that require transforms, add a match arm on `cfg.version` here.
pub fn migrate(cfg: Config) -> Result<Config> {
    Ok(cfg)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_simulation_is_disabled() {
        let cfg = Config::default();
        assert!(!cfg.simulation.enabled);
        assert_eq!(cfg.simulation.reorder_failure_rate, 0.25);
    }

    #[test]
    fn demo_preset_enables_simulation() {
        let sim = SimulationConfig::demo();
        assert!(sim.enabled);
        assert_eq!(sim.reorder_latency_ms, (500, 1300));
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut cfg = Config::default();
        cfg.server.port = 9000;
        cfg.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.version, CONFIG_VERSION);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "server:\n  port: 8080\n").unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.db_path, PathBuf::from("talentflow.redb"));
        assert!(!cfg.simulation.enabled);
    }

    #[test]
    fn validate_rejects_bad_failure_rate() {
        let mut sim = SimulationConfig::default();
        sim.reorder_failure_rate = 1.5;
        assert!(sim.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_latency_range() {
        let mut sim = SimulationConfig::default();
        sim.read_latency_ms = (500, 100);
        assert!(sim.validate().is_err());
    }
}

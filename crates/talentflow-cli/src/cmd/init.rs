use std::path::{Path, PathBuf};
use talentflow_core::config::{Config, CONFIG_FILE};

/// Write a default config file. Refuses to overwrite an existing one.
pub fn run(explicit_path: Option<&Path>) -> anyhow::Result<()> {
    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    Config::default().save(&path)?;
    println!("wrote {}", path.display());
    Ok(())
}

use crate::config::{default_config_template, DEFAULT_CONFIG_FILE};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write a starter `jsdce.toml` into the current directory
pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

/// Write a starter `jsdce.toml` into `dir`
pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs::write(&config_path, default_config_template())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created {} configuration file", DEFAULT_CONFIG_FILE);

    Ok(())
}

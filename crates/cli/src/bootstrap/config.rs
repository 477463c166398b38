use anyhow::Context;
use tinu_dns_domain::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Writes the effective configuration, overrides applied, as TOML.
pub fn write_config(config: &Config, path: &str) -> anyhow::Result<()> {
    config
        .save(path)
        .with_context(|| format!("failed to write configuration to {}", path))
}

/// Scene configuration files
use anyhow::{Context, Result};
use std::path::Path;
use sw3d_core::SceneConfig;

/// Parse a TOML scene configuration. Missing tables and fields keep their
/// defaults.
pub fn parse_config(text: &str) -> Result<SceneConfig> {
    toml::from_str(text).context("invalid scene configuration")
}

pub fn load_config(path: &Path) -> Result<SceneConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = parse_config(&text).with_context(|| format!("in {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded scene configuration");
    Ok(config)
}

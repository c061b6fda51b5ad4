use std::path::Path;

use anyhow::{Context, Result};
use datadesk::AppConfig;

/// Load and validate a JSON configuration. Missing fields take defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: AppConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

/// Pretty JSON of the default configuration.
pub fn default_config_json() -> Result<String> {
    serde_json::to_string_pretty(&AppConfig::default()).context("Failed to serialize default config")
}

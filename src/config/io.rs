use super::models::ViewerConfig;
use super::tables::{ConfigTables, TABLE_NAMES};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> ViewerConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded viewer config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return ViewerConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            ViewerConfig::default()
        }
    }
}

/// Parse either the sectioned layout or a flat list of keys.
pub fn parse_config(contents: &str) -> Result<ViewerConfig> {
    let raw: toml::Table = toml::from_str(contents).context("config is not valid TOML")?;
    let sectioned = raw.keys().any(|key| TABLE_NAMES.contains(&key.as_str()));
    if sectioned {
        let tables: ConfigTables =
            toml::from_str(contents).context("config tables have invalid values")?;
        Ok(tables.into())
    } else {
        toml::from_str(contents).context("flat config has invalid values")
    }
}

pub fn serialize_config(config: &ViewerConfig) -> Result<String> {
    let tables = ConfigTables::from(config);
    toml::to_string(&tables).context("Failed to serialize viewer config")
}

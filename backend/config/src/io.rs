//! Config file location and loading.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the mockai config directory.
/// Priority: `MOCKAI_CONFIG_DIR` env > `~/.mockai/` > `./.mockai`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MOCKAI_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".mockai"),
        None => PathBuf::from(".mockai"),
    }
}

/// Resolve the config file: explicit path > `MOCKAI_CONFIG` env > `<config_dir>/config.yaml`.
pub fn config_file_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("MOCKAI_CONFIG") {
        return PathBuf::from(path);
    }
    config_dir().join(CONFIG_FILE_NAME)
}

/// Read the raw YAML document as a JSON value tree.
///
/// A missing file is not an error: the result is an empty object so the
/// defaults apply.
pub async fn load_raw_config(path: &Path) -> Result<Value> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let value = parse_yaml(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(value)
}

/// Parse YAML text; an empty document is an empty object.
pub fn parse_yaml(raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    let value: Value = serde_yaml::from_str(raw)?;
    Ok(match value {
        Value::Null => Value::Object(Default::default()),
        other => other,
    })
}

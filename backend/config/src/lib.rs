//! `mockai-config`: runtime configuration for the mock API server.
//!
//! Provides:
//! - Typed config schema (server, models, streaming, logging, response rules)
//! - YAML loading with a defaults-only first run
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Validation with warnings and errors
//! - Registry construction from configured rules

pub mod defaults;
pub mod env;
pub mod io;
pub mod rules;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_raw_config, parse_yaml};
pub use rules::{build_registry, compile_rule};
pub use schema::{
    LoggingConfig, MockConfig, ModelsConfig, ResponsesConfig, RuleConfig, ServerConfig,
    StreamingConfig,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, apply defaults and env overrides, and validate.
///
/// Warnings are logged; any validation error aborts with all errors listed.
pub async fn load_and_prepare(path: &Path) -> Result<MockConfig> {
    let raw = load_raw_config(path).await?;
    prepare(raw, &std::env::vars().collect())
}

/// The processing pipeline behind [`load_and_prepare`], over an explicit env.
pub fn prepare(raw: Value, env: &HashMap<String, String>) -> Result<MockConfig> {
    let value = resolve_env_vars_with(&raw, env).context("Failed to resolve env vars in config")?;

    let config: MockConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(apply_all_defaults(config), env);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        let details: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration:\n  {}", details.join("\n  "));
    }

    Ok(config)
}

/// `MOCKAI_BIND` / `MOCKAI_PORT` take precedence over the file.
fn apply_env_overrides(mut config: MockConfig, env: &HashMap<String, String>) -> MockConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    if let Some(bind) = env.get("MOCKAI_BIND").filter(|b| !b.is_empty()) {
        server.bind = Some(bind.clone());
    }
    if let Some(port) = env.get("MOCKAI_PORT").and_then(|p| p.parse().ok()) {
        server.port = Some(port);
    }
    config
}

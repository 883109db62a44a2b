//! Config validation: deep schema checks with user-friendly error messages.

use regex::RegexBuilder;
use thiserror::Error;

use crate::schema::MockConfig;

/// Longest per-chunk delay accepted without a warning.
const MAX_REASONABLE_CHUNK_DELAY_MS: u64 = 10_000;

#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &MockConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_models(config, &mut report);
    validate_streaming(config, &mut report);
    validate_responses(config, &mut report);
    report
}

fn validate_server(config: &MockConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if let Some(port) = server.port {
        if port == 0 {
            report.error("server.port", "Port must be > 0");
        } else if port < 1024 && port != 80 && port != 443 {
            report.warn(
                "server.port",
                format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
            );
        }
    }
    if let Some(base) = &server.base_path {
        if !base.is_empty() && !base.starts_with('/') {
            report.error("server.basePath", format!("basePath '{base}' must start with '/'"));
        }
        if base.len() > 1 && base.ends_with('/') {
            report.warn("server.basePath", "Trailing '/' is ignored");
        }
    }
}

fn validate_models(config: &MockConfig, report: &mut ValidationReport) {
    let Some(models) = &config.models else { return };
    let fields = [
        ("models.chatModel", &models.chat_model),
        ("models.embeddingModel", &models.embedding_model),
    ];
    for (path, value) in fields {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            report.error(path, "Model id cannot be empty");
        }
    }
}

fn validate_streaming(config: &MockConfig, report: &mut ValidationReport) {
    let Some(delay) = config.streaming.as_ref().and_then(|s| s.chunk_delay_ms) else {
        return;
    };
    if delay > MAX_REASONABLE_CHUNK_DELAY_MS {
        report.warn(
            "streaming.chunkDelayMs",
            format!("{delay}ms per chunk will make streamed replies very slow"),
        );
    }
}

fn validate_responses(config: &MockConfig, report: &mut ValidationReport) {
    let Some(responses) = &config.responses else { return };

    if responses
        .fallback
        .as_deref()
        .is_some_and(|f| f.trim().is_empty())
    {
        report.error("responses.fallback", "Fallback text cannot be empty");
    }

    if responses.include_builtin == Some(false) && responses.rules.is_empty() {
        report.warn(
            "responses",
            "Built-in rules disabled and no rules configured; every prompt gets the fallback",
        );
    }

    for (i, rule) in responses.rules.iter().enumerate() {
        let path = format!("responses.rules[{i}]");
        if rule.pattern.is_empty() {
            report.warn(format!("{path}.pattern"), "Empty pattern matches every prompt");
        }
        if let Err(e) = RegexBuilder::new(&rule.pattern).case_insensitive(true).build() {
            report.error(format!("{path}.pattern"), format!("Invalid regex: {e}"));
        }
        match (&rule.response, &rule.tool) {
            (Some(_), Some(_)) => {
                report.error(&path, "Set either 'response' or 'tool', not both");
            }
            (None, None) => report.error(&path, "One of 'response' or 'tool' is required"),
            (None, Some(tool)) if tool.trim().is_empty() => {
                report.error(format!("{path}.tool"), "Tool name cannot be empty");
            }
            _ => {}
        }
    }
}

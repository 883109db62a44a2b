//! mockai configuration schema.
//!
//! Typed for serde YAML/JSON with camelCase keys. Every section is optional;
//! `defaults::apply_all_defaults` fills in whatever the file leaves out.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockConfig {
    /// HTTP listener and route prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Model identifiers reported to clients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<ModelsConfig>,

    /// Simulated streaming behaviour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming: Option<StreamingConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    /// Extra response rules and fallback override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<ResponsesConfig>,
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Prefix every API route is nested under, e.g. `/mock/v1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
}

// ---------------------------------------------------------------------------
// Streaming
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingConfig {
    /// Delay before each streamed chunk, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_delay_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// "trace" | "debug" | "info" | "warn" | "error", or any EnvFilter directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for daily-rolling NDJSON logs; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Emit JSON on the console instead of human-readable lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsesConfig {
    /// Keep the built-in workshop rules after the configured ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_builtin: Option<bool>,
    /// Replaces the default fallback text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    /// Evaluated in order, before the built-in rules
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// One configured rule. Exactly one of `response` / `tool` must be set;
/// a `response` of the form `TOOL_CALL:<name>` is also read as a tool call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

// ---------------------------------------------------------------------------
// Accessors over the defaulted config
// ---------------------------------------------------------------------------

impl MockConfig {
    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn models(&self) -> ModelsConfig {
        self.models.clone().unwrap_or_default()
    }

    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }

    pub fn responses(&self) -> ResponsesConfig {
        self.responses.clone().unwrap_or_default()
    }

    pub fn chunk_delay_ms(&self) -> u64 {
        self.streaming
            .as_ref()
            .and_then(|s| s.chunk_delay_ms)
            .unwrap_or(crate::defaults::DEFAULT_CHUNK_DELAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
server:
  port: 9090
  basePath: /v1
models:
  chatModel: my-model
streaming:
  chunkDelayMs: 5
responses:
  includeBuiltin: false
  rules:
    - pattern: "refund"
      response: "Refunds take 5 days."
    - pattern: "status page"
      tool: web_search
"#;
        let cfg: MockConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.server().port, Some(9090));
        assert_eq!(cfg.server().base_path.as_deref(), Some("/v1"));
        assert_eq!(cfg.models().chat_model.as_deref(), Some("my-model"));
        assert_eq!(cfg.chunk_delay_ms(), 5);
        let responses = cfg.responses();
        assert_eq!(responses.include_builtin, Some(false));
        assert_eq!(responses.rules.len(), 2);
        assert_eq!(responses.rules[1].tool.as_deref(), Some("web_search"));
    }

    #[test]
    fn empty_document_is_default() {
        let cfg: MockConfig = serde_yaml::from_str("{}").unwrap();
        assert!(cfg.server.is_none());
        assert_eq!(cfg.chunk_delay_ms(), crate::defaults::DEFAULT_CHUNK_DELAY_MS);
    }
}

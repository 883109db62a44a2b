//! Bridges the loaded [`MockConfig`] onto the gateway, logger, and listener.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use logging::LogSettings;
use mockai_config::defaults::{
    DEFAULT_BASE_PATH, DEFAULT_BIND, DEFAULT_CHAT_MODEL,
    DEFAULT_EMBEDDING_MODEL, DEFAULT_LOG_LEVEL, DEFAULT_OWNED_BY, DEFAULT_PORT,
};
use mockai_config::MockConfig;
use mockai_gateway::GatewaySettings;

pub fn gateway_settings(config: &MockConfig) -> GatewaySettings {
    let server = config.server();
    let models = config.models();
    GatewaySettings {
        base_path: server.base_path.unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
        chat_model: models.chat_model.unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
        embedding_model: models
            .embedding_model
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
        owned_by: models.owned_by.unwrap_or_else(|| DEFAULT_OWNED_BY.to_string()),
        chunk_delay: Duration::from_millis(config.chunk_delay_ms()),
    }
}

pub fn log_settings(config: &MockConfig) -> LogSettings {
    let logging = config.logging();
    LogSettings {
        level: logging.level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        dir: logging.dir.map(PathBuf::from),
        json: logging.json.unwrap_or(false),
    }
}

/// Listener address; `port_override` comes from `serve --port`.
pub fn bind_addr(config: &MockConfig, port_override: Option<u16>) -> Result<SocketAddr> {
    let server = config.server();
    let bind = server.bind.unwrap_or_else(|| DEFAULT_BIND.to_string());
    let port = port_override.or(server.port).unwrap_or(DEFAULT_PORT);
    format!("{bind}:{port}")
        .parse()
        .with_context(|| format!("Invalid bind address {bind}:{port}"))
}

/// Base URL clients should use for a server on `port` with this config.
pub fn local_base_url(config: &MockConfig, port: u16) -> String {
    let base = mockai_gateway::server::normalize_base_path(&gateway_settings(config).base_path);
    format!("http://127.0.0.1:{port}{base}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockai_config::{apply_all_defaults, ServerConfig, StreamingConfig};

    #[test]
    fn defaults_flow_into_settings() {
        let config = apply_all_defaults(MockConfig::default());
        let settings = gateway_settings(&config);
        assert_eq!(settings.base_path, "/mock/v1");
        assert_eq!(settings.chat_model, "mock-gpt-4");
        assert_eq!(settings.chunk_delay, Duration::from_millis(50));
        assert_eq!(bind_addr(&config, None).unwrap().port(), 8080);
        assert_eq!(log_settings(&config).level, "info");
    }

    #[test]
    fn port_flag_wins_over_file() {
        let config = MockConfig {
            server: Some(ServerConfig {
                bind: Some("127.0.0.1".into()),
                port: Some(9000),
                base_path: None,
            }),
            streaming: Some(StreamingConfig {
                chunk_delay_ms: Some(0),
            }),
            ..Default::default()
        };
        let addr = bind_addr(&config, Some(9100)).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:9100");
        assert_eq!(gateway_settings(&config).chunk_delay, Duration::ZERO);
    }

    #[test]
    fn rejects_unparseable_bind() {
        let config = MockConfig {
            server: Some(ServerConfig {
                bind: Some("not an address".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(bind_addr(&config, None).is_err());
    }

    #[test]
    fn base_url_includes_base_path() {
        let config = apply_all_defaults(MockConfig::default());
        assert_eq!(local_base_url(&config, 8080), "http://127.0.0.1:8080/mock/v1");
    }
}

//! Config defaults: applies the values the workshop mock ships with.

use crate::schema::{
    LoggingConfig, MockConfig, ModelsConfig, ResponsesConfig, ServerConfig, StreamingConfig,
};

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BASE_PATH: &str = "/mock/v1";

pub const DEFAULT_CHAT_MODEL: &str = "mock-gpt-4";
pub const DEFAULT_EMBEDDING_MODEL: &str = "mock-text-embedding-ada-002";
pub const DEFAULT_OWNED_BY: &str = "tanzu-workshop";

/// Pause before each streamed chunk.
pub const DEFAULT_CHUNK_DELAY_MS: u64 = 50;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: MockConfig) -> MockConfig {
    let config = apply_server_defaults(config);
    let config = apply_model_defaults(config);
    let config = apply_streaming_defaults(config);
    let config = apply_logging_defaults(config);
    apply_response_defaults(config)
}

fn apply_server_defaults(mut config: MockConfig) -> MockConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server
        .base_path
        .get_or_insert_with(|| DEFAULT_BASE_PATH.to_string());
    config
}

fn apply_model_defaults(mut config: MockConfig) -> MockConfig {
    let models = config.models.get_or_insert_with(ModelsConfig::default);
    models
        .chat_model
        .get_or_insert_with(|| DEFAULT_CHAT_MODEL.to_string());
    models
        .embedding_model
        .get_or_insert_with(|| DEFAULT_EMBEDDING_MODEL.to_string());
    models
        .owned_by
        .get_or_insert_with(|| DEFAULT_OWNED_BY.to_string());
    config
}

fn apply_streaming_defaults(mut config: MockConfig) -> MockConfig {
    let streaming = config.streaming.get_or_insert_with(StreamingConfig::default);
    streaming.chunk_delay_ms.get_or_insert(DEFAULT_CHUNK_DELAY_MS);
    config
}

fn apply_logging_defaults(mut config: MockConfig) -> MockConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}

fn apply_response_defaults(mut config: MockConfig) -> MockConfig {
    let responses = config.responses.get_or_insert_with(ResponsesConfig::default);
    responses.include_builtin.get_or_insert(true);
    config
}

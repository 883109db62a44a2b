//! Structured Logger
//!
//! Wraps `tracing` with an env-controlled filter, a console layer, and an
//! optional daily-rolling NDJSON file.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// What the logger needs from the loaded configuration.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Fallback filter when `RUST_LOG` is unset
    pub level: String,
    /// Directory for `mockai.log.YYYY-MM-DD`; console only when `None`
    pub dir: Option<PathBuf>,
    /// JSON console output
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            json: false,
        }
    }
}

/// Initialize the global subscriber. Safe to call twice; the second call is a no-op.
pub fn init_logger(settings: &LogSettings) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let console_layer = if settings.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true)
            .boxed()
    };

    let file_layer = settings.dir.as_ref().map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "mockai.log");
        fmt::layer()
            .json()
            .with_writer(appender)
            .with_ansi(false)
            .boxed()
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

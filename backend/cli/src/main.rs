mod client;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use logging::{init_logger, LogSettings};
use mockai_config::{build_registry, config_file_path, load_and_prepare, MockConfig};
use mockai_core::ChatClient;
use mockai_gateway::{start_server, GatewayState};

use client::HttpChatClient;

#[derive(Parser)]
#[command(name = "mockai")]
#[command(about = "mockai: deterministic OpenAI-compatible mock server")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $MOCKAI_CONFIG or ~/.mockai/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the mock API server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List the models a running server reports
    Status {
        /// API base URL, e.g. http://localhost:8080/mock/v1
        #[arg(long)]
        url: Option<String>,
    },
    /// Send one prompt to a running server and print the reply
    Ask {
        prompt: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Print the canned result of a tool
    Tool {
        name: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
        /// Ask a running server instead of answering locally
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_and_prepare(&config_file_path(cli.config.as_deref())).await?;

    match cli.command {
        Commands::Serve { port } => {
            init_logger(&config::log_settings(&config));
            run_server(config, port).await?;
        }
        Commands::Status { url } => {
            init_quiet_logger();
            check_status(&HttpChatClient::new(resolve_url(&config, url), "")).await?;
        }
        Commands::Ask { prompt, url, model } => {
            init_quiet_logger();
            let model = model.unwrap_or_else(|| config::gateway_settings(&config).chat_model);
            let client = HttpChatClient::new(resolve_url(&config, url), model);
            let reply = client.prompt(&prompt).await?;
            println!("{reply}");
        }
        Commands::Tool { name, args, url } => {
            init_quiet_logger();
            let arguments: Value =
                serde_json::from_str(&args).context("--args must be a JSON value")?;
            let result = match url {
                Some(url) => {
                    HttpChatClient::new(url, "")
                        .tool_result(&name, &arguments)
                        .await?
                }
                None => mockai_core::tool_result(&name, &arguments),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

async fn run_server(config: MockConfig, port: Option<u16>) -> Result<()> {
    let addr = config::bind_addr(&config, port)?;
    let registry = build_registry(&config.responses())?;
    let settings = config::gateway_settings(&config);

    info!(
        addr = %addr,
        chat_model = %settings.chat_model,
        embedding_model = %settings.embedding_model,
        chunk_delay_ms = settings.chunk_delay.as_millis() as u64,
        "Starting mock OpenAI server"
    );

    start_server(addr, GatewayState::new(registry, settings)).await
}

/// Print the model list, or fail when the server cannot be reached.
async fn check_status(client: &HttpChatClient) -> Result<()> {
    match client.list_models().await {
        Ok(models) => {
            output::note_success(&format!("mock server is up at {}", client.base_url()));
            print_models(&models);
            Ok(())
        }
        Err(e) => {
            output::note_error(&format!("mock server is not reachable: {e}"));
            bail!("status check failed for {}", client.base_url());
        }
    }
}

/// Client commands only surface warnings.
fn init_quiet_logger() {
    init_logger(&LogSettings {
        level: "warn".into(),
        ..Default::default()
    });
}

fn resolve_url(config: &MockConfig, url: Option<String>) -> String {
    url.unwrap_or_else(|| {
        let port = config.server().port.unwrap_or(mockai_config::defaults::DEFAULT_PORT);
        config::local_base_url(config, port)
    })
}

fn print_models(models: &Value) {
    let Some(data) = models["data"].as_array() else {
        output::note_info("server returned no model list");
        return;
    };
    for model in data {
        let pairs = [
            ("model", model["id"].as_str().unwrap_or("?").to_string()),
            ("owned_by", model["owned_by"].as_str().unwrap_or("?").to_string()),
        ];
        print!("{}", output::render_pairs(&pairs));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn status_fails_when_server_is_down() {
        let client = HttpChatClient::new("http://127.0.0.1:1/mock/v1", "");
        let err = check_status(&client).await.unwrap_err();
        assert!(err.to_string().contains("status check failed"));
    }
}

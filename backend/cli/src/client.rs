//! HTTP client for a running mock server.

use async_trait::async_trait;
use mockai_core::{ChatClient, ChatRequest, ConversationMessage, MockError, Response};
use serde_json::Value;
use tracing::debug;

/// Talks to `{base_url}/chat/completions` and friends over reqwest.
pub struct HttpChatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl HttpChatClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/models`, returned as raw JSON.
    pub async fn list_models(&self) -> Result<Value, MockError> {
        self.get_json(&format!("{}/models", self.base_url)).await
    }

    /// `POST {base}/tools/{name}` with `arguments` as the body.
    pub async fn tool_result(&self, name: &str, arguments: &Value) -> Result<Value, MockError> {
        let url = format!("{}/tools/{name}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(arguments)
            .send()
            .await
            .map_err(|e| MockError::ClientError(format!("{url}: {e}")))?;
        Self::read_json(&url, resp).await
    }

    /// Non-streamed completion, returned as raw JSON.
    pub async fn complete(&self, request: &ChatRequest) -> Result<Value, MockError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, messages = request.messages.len(), "Sending chat completion");
        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| MockError::ClientError(format!("{url}: {e}")))?;
        Self::read_json(&url, resp).await
    }

    async fn get_json(&self, url: &str) -> Result<Value, MockError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| MockError::ClientError(format!("{url}: {e}")))?;
        Self::read_json(url, resp).await
    }

    async fn read_json(url: &str, resp: reqwest::Response) -> Result<Value, MockError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(MockError::ClientError(format!("{url} returned {status}")));
        }
        resp.json()
            .await
            .map_err(|e| MockError::ClientError(format!("{url}: invalid JSON: {e}")))
    }
}

/// Assistant text of a completion body; a tool call renders in marker form.
pub fn reply_text(body: &Value) -> Result<String, MockError> {
    let message = &body["choices"][0]["message"];
    if let Some(content) = message["content"].as_str() {
        return Ok(content.to_string());
    }
    match message["tool_calls"][0]["function"]["name"].as_str() {
        Some(name) => Ok(Response::ToolCall(name.to_string()).to_string()),
        None => Err(MockError::ClientError(
            "completion carried neither content nor a tool call".into(),
        )),
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn prompt(&self, user_prompt: &str) -> Result<String, MockError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ConversationMessage::user(user_prompt)],
            ..Default::default()
        };
        let body = self.complete(&request).await?;
        reply_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockai_core::ResponseRegistry;
    use mockai_gateway::{serve, GatewaySettings, GatewayState};
    use serde_json::json;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    async fn spawn_gateway() -> (String, oneshot::Sender<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let state = GatewayState::new(
            ResponseRegistry::builtin().unwrap(),
            GatewaySettings {
                chunk_delay: Duration::ZERO,
                ..Default::default()
            },
        );
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            serve(listener, state, async {
                let _ = rx.await;
            })
            .await
            .unwrap();
        });
        (format!("http://127.0.0.1:{port}/mock/v1"), tx)
    }

    #[tokio::test]
    async fn asks_the_running_gateway() {
        let (url, shutdown) = spawn_gateway().await;
        let client = HttpChatClient::new(url, "mock-gpt-4");

        let reply = client.prompt("What is Tanzu Spring?").await.unwrap();
        assert!(reply.contains("Tanzu Spring"));

        let models = client.list_models().await.unwrap();
        assert_eq!(models["data"][0]["id"], "mock-gpt-4");

        let ticket = client
            .tool_result("create_ticket", &json!({"summary": "broken"}))
            .await
            .unwrap();
        assert_eq!(ticket["status"], "CREATED");

        let _ = shutdown.send(());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_client_error() {
        let client = HttpChatClient::new("http://127.0.0.1:1/mock/v1/", "m");
        assert_eq!(client.base_url(), "http://127.0.0.1:1/mock/v1");
        let err = client.prompt("hi").await.unwrap_err();
        assert!(matches!(err, MockError::ClientError(_)));
    }

    #[test]
    fn tool_call_bodies_render_as_marker() {
        let body = json!({"choices": [{"message": {
            "content": null,
            "tool_calls": [{"function": {"name": "get_weather", "arguments": "{}"}}]
        }}]});
        assert_eq!(reply_text(&body).unwrap(), "TOOL_CALL:get_weather");
        assert!(reply_text(&json!({})).is_err());
    }
}

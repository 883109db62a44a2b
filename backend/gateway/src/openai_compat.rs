//! OpenAI Compatible Endpoints (`/models`, `/chat/completions`, `/embeddings`).
//!
//! Bodies are parsed permissively: anything that does not deserialize is
//! treated as an empty request, so these handlers never answer with an error.

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response as HttpResponse},
    Json,
};
use chrono::Utc;
use logging::{EventLogger, RequestEvent};
use mockai_core::{ChatRequest, EmbeddingRequest, Response, ResponseRegistry};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::server::GatewayState;
use crate::streaming::{stream_text, StreamMeta};

/// Fixed prompt-token figure reported for every chat completion.
pub const MOCK_PROMPT_TOKENS: usize = 50;
/// Completion tokens reported for a tool-call reply.
pub const TOOL_CALL_COMPLETION_TOKENS: usize = 25;

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ModelList {
    pub object: &'static str,
    pub data: Vec<ModelCard>,
}

#[derive(Debug, Serialize)]
pub struct ModelCard {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub owned_by: String,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletion {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

#[derive(Debug, Serialize)]
pub struct Choice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AssistantMessage {
    pub role: &'static str,
    /// Serialized as `null` for tool calls.
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Serialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionCall,
}

#[derive(Debug, Serialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Serialize)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

#[derive(Debug, Serialize)]
pub struct EmbeddingList {
    pub object: &'static str,
    pub data: Vec<EmbeddingData>,
    pub model: String,
    pub usage: EmbeddingUsage,
}

#[derive(Debug, Serialize)]
pub struct EmbeddingData {
    pub object: &'static str,
    pub index: usize,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
pub struct EmbeddingUsage {
    pub prompt_tokens: usize,
    pub total_tokens: usize,
}

// ---------------------------------------------------------------------------
// Decision logic
// ---------------------------------------------------------------------------

/// What a chat request resolves to, before any wire shaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionPlan {
    /// Emit a tool call for a tool the request declared.
    ToolCall { tool_name: String },
    /// Emit assistant text. `degraded_tool` names a tool-triggering match that
    /// could not be served as a tool call.
    Content {
        text: String,
        fallback: bool,
        degraded_tool: Option<String>,
    },
}

/// Plain text for `response`; an unconsumed tool call becomes the fallback.
fn text_or_default(registry: &ResponseRegistry, response: &Response) -> (String, bool) {
    match response {
        Response::PlainText(text) => (text.clone(), text == registry.default_response()),
        Response::ToolCall(_) => (registry.default_response().to_string(), true),
    }
}

/// Resolve a chat request against the registry.
pub fn plan_completion(registry: &ResponseRegistry, request: &ChatRequest) -> CompletionPlan {
    let prompt = request.latest_user_text();
    let resolved = registry.find_response(&prompt);

    if !request.declared_tools().is_empty() {
        if let Response::ToolCall(tool_name) = resolved {
            if request.find_tool(tool_name).is_some() {
                return CompletionPlan::ToolCall {
                    tool_name: tool_name.clone(),
                };
            }
            debug!(tool = %tool_name, "Matched tool is not declared by the request");
            let (text, fallback) = text_or_default(registry, registry.find_response(""));
            return CompletionPlan::Content {
                text,
                fallback,
                degraded_tool: Some(tool_name.clone()),
            };
        }
    }

    let (text, fallback) = text_or_default(registry, resolved);
    CompletionPlan::Content {
        text,
        fallback,
        degraded_tool: resolved.tool_name().map(str::to_owned),
    }
}

// ---------------------------------------------------------------------------
// Response builders
// ---------------------------------------------------------------------------

fn short_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{prefix}{}", &uuid[..12])
}

pub fn completion_id() -> String {
    short_id("chatcmpl-mock-")
}

pub fn tool_call_id() -> String {
    short_id("call_mock_")
}

pub fn content_completion(id: String, model: &str, content: String) -> ChatCompletion {
    let completion_tokens = content.chars().count() / 4;
    ChatCompletion {
        id,
        object: "chat.completion",
        created: Utc::now().timestamp(),
        model: model.to_string(),
        choices: vec![Choice {
            index: 0,
            message: AssistantMessage {
                role: "assistant",
                content: Some(content),
                tool_calls: None,
            },
            finish_reason: "stop",
        }],
        usage: Usage {
            prompt_tokens: MOCK_PROMPT_TOKENS,
            completion_tokens,
            total_tokens: MOCK_PROMPT_TOKENS + completion_tokens,
        },
    }
}

pub fn tool_call_completion(id: String, model: &str, tool_name: String, arguments: String) -> ChatCompletion {
    ChatCompletion {
        id,
        object: "chat.completion",
        created: Utc::now().timestamp(),
        model: model.to_string(),
        choices: vec![Choice {
            index: 0,
            message: AssistantMessage {
                role: "assistant",
                content: None,
                tool_calls: Some(vec![ToolCall {
                    id: tool_call_id(),
                    kind: "function",
                    function: FunctionCall {
                        name: tool_name,
                        arguments,
                    },
                }]),
            },
            finish_reason: "tool_calls",
        }],
        usage: Usage {
            prompt_tokens: MOCK_PROMPT_TOKENS,
            completion_tokens: TOOL_CALL_COMPLETION_TOKENS,
            total_tokens: MOCK_PROMPT_TOKENS + TOOL_CALL_COMPLETION_TOKENS,
        },
    }
}

fn parse_lenient<T: DeserializeOwned + Default>(body: &[u8], what: &str) -> T {
    if body.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        warn!(error = %e, request = what, "Malformed request body; treating it as empty");
        T::default()
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Handler for `GET {base}/models`.
pub async fn list_models(State(state): State<GatewayState>) -> Json<ModelList> {
    info!("Listing models");
    Json(ModelList {
        object: "list",
        data: vec![ModelCard {
            id: state.settings.chat_model.clone(),
            object: "model",
            created: Utc::now().timestamp(),
            owned_by: state.settings.owned_by.clone(),
        }],
    })
}

/// Handler for `POST {base}/chat/completions`.
pub async fn chat_completions(State(state): State<GatewayState>, body: Bytes) -> HttpResponse {
    let request: ChatRequest = parse_lenient(&body, "chat.completions");
    info!(
        stream = request.stream,
        messages = request.messages.len(),
        tools = request.declared_tools().len(),
        "Chat completion request"
    );

    let prompt = request.latest_user_text();
    let id = completion_id();
    let model = state.settings.chat_model.as_str();

    match plan_completion(&state.registry, &request) {
        CompletionPlan::ToolCall { tool_name } => {
            EventLogger::log_event(
                &id,
                RequestEvent::ToolCall {
                    prompt,
                    tool_name: tool_name.clone(),
                },
            );
            Json(tool_call_completion(id, model, tool_name, "{}".to_string())).into_response()
        }
        CompletionPlan::Content {
            text,
            fallback,
            degraded_tool,
        } => {
            // Step-2 degradation (tools declared, matched tool missing) always
            // answers with a single body, even when streaming was requested.
            let tools_declared = !request.declared_tools().is_empty();
            let stream = request.stream && !(tools_declared && degraded_tool.is_some());

            let event = match degraded_tool {
                Some(tool_name) => RequestEvent::ToolDegraded {
                    prompt,
                    tool_name,
                    reason: if tools_declared {
                        "tool not declared by request".into()
                    } else {
                        "request declared no tools".into()
                    },
                },
                None => RequestEvent::Completion {
                    prompt,
                    streamed: stream,
                    fallback,
                },
            };
            EventLogger::log_event(&id, event);

            if stream {
                let meta = StreamMeta {
                    id,
                    model: model.to_string(),
                    created: Utc::now().timestamp(),
                };
                stream_text(&text, state.settings.chunk_delay, meta).into_response()
            } else {
                Json(content_completion(id, model, text)).into_response()
            }
        }
    }
}

/// Handler for `POST {base}/embeddings`.
pub async fn create_embeddings(State(state): State<GatewayState>, body: Bytes) -> Json<EmbeddingList> {
    let request: EmbeddingRequest = parse_lenient(&body, "embeddings");
    let inputs = request.inputs();
    info!(inputs = inputs.len(), "Embedding request");

    let data = inputs
        .iter()
        .enumerate()
        .map(|(index, text)| EmbeddingData {
            object: "embedding",
            index,
            embedding: state.registry.embedding_of(text),
        })
        .collect();

    let tokens = request.approximate_tokens();
    EventLogger::log_event(
        &short_id("embd-mock-"),
        RequestEvent::Embeddings {
            inputs: inputs.len(),
            total_chars: inputs.iter().map(|s| s.chars().count()).sum(),
        },
    );

    Json(EmbeddingList {
        object: "list",
        data,
        model: state.settings.embedding_model.clone(),
        usage: EmbeddingUsage {
            prompt_tokens: tokens,
            total_tokens: tokens,
        },
    })
}

/// Handler for `POST {base}/tools/{name}`: the canned result for a tool call.
pub async fn invoke_tool(
    State(state): State<GatewayState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Json<Value> {
    let arguments: Value = parse_lenient(&body, "tools");
    info!(tool = %name, "Tool result requested");
    Json(state.registry.tool_result(&name, &arguments))
}

//! Mock Request Events
//!
//! One structured record per served request on the `mock_events` target, so a
//! workshop run can be replayed from the NDJSON log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::prompt_preview;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestEvent {
    /// Plain assistant text was returned.
    Completion {
        prompt: String,
        streamed: bool,
        fallback: bool,
    },
    /// A tool call was emitted.
    ToolCall { prompt: String, tool_name: String },
    /// A tool-triggering prompt could not be served as a tool call.
    ToolDegraded {
        prompt: String,
        tool_name: String,
        reason: String,
    },
    /// An embeddings batch was generated.
    Embeddings { inputs: usize, total_chars: usize },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: RequestEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redact prompt text, then emit the entry through `tracing`.
    pub fn log_event(request_id: &str, event: RequestEvent) -> EventLogEntry {
        let event = match event {
            RequestEvent::Completion {
                prompt,
                streamed,
                fallback,
            } => RequestEvent::Completion {
                prompt: prompt_preview(&prompt),
                streamed,
                fallback,
            },
            RequestEvent::ToolCall { prompt, tool_name } => RequestEvent::ToolCall {
                prompt: prompt_preview(&prompt),
                tool_name,
            },
            RequestEvent::ToolDegraded {
                prompt,
                tool_name,
                reason,
            } => RequestEvent::ToolDegraded {
                prompt: prompt_preview(&prompt),
                tool_name,
                reason,
            },
            other @ RequestEvent::Embeddings { .. } => other,
        };

        let entry = EventLogEntry {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        };

        match serde_json::to_string(&entry.event) {
            Ok(json) => info!(target: "mock_events", request_id = %entry.request_id, event = %json, "Mock request served"),
            Err(e) => info!(target: "mock_events", request_id = %entry.request_id, error = %e, "Mock request served"),
        }
        entry
    }
}

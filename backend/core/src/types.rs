//! Request-side data model shared by the gateway and clients.
//!
//! Every field is optional on the wire: a missing or mistyped value
//! deserializes to its default instead of failing the request, and a
//! malformed message is dropped on its own.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Author of a conversation message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    Tool,
    System,
    /// Missing, null, or unrecognised; never counts as the user.
    #[default]
    #[serde(other)]
    Other,
}

/// Message content: a plain string or an array of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl MessageContent {
    /// Text view; non-text parts are skipped.
    pub fn text(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    #[serde(default, deserialize_with = "or_default")]
    pub role: Role,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Text(content.into())),
            ..Default::default()
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Text(content.into())),
            ..Default::default()
        }
    }

    /// Content as text; missing content is the empty string.
    pub fn text(&self) -> String {
        self.content.as_ref().map(MessageContent::text).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "or_default")]
    pub model: String,
    #[serde(default, deserialize_with = "valid_items")]
    pub messages: Vec<ConversationMessage>,
    #[serde(default, deserialize_with = "flag")]
    pub stream: bool,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
}

impl ChatRequest {
    /// Latest user message, else the last message of any role, else empty.
    pub fn latest_user_text(&self) -> String {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .or_else(|| self.messages.last())
            .map(ConversationMessage::text)
            .unwrap_or_default()
    }

    pub fn declared_tools(&self) -> &[Value] {
        self.tools.as_deref().unwrap_or_default()
    }

    /// Tool definition whose `function.name` equals `name`.
    pub fn find_tool(&self, name: &str) -> Option<&Value> {
        self.declared_tools().iter().find(|tool| {
            tool.get("function")
                .and_then(|f| f.get("name"))
                .and_then(Value::as_str)
                == Some(name)
        })
    }
}

/// Embedding inputs, normalised to an ordered list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "EmbeddingInputWire")]
pub struct EmbeddingInput(pub Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum EmbeddingInputWire {
    One(String),
    Many(Vec<String>),
    Missing(Option<()>),
}

impl From<EmbeddingInputWire> for EmbeddingInput {
    fn from(wire: EmbeddingInputWire) -> Self {
        match wire {
            EmbeddingInputWire::One(text) => EmbeddingInput(vec![text]),
            EmbeddingInputWire::Many(texts) => EmbeddingInput(texts),
            EmbeddingInputWire::Missing(_) => EmbeddingInput(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    #[serde(default, deserialize_with = "or_default")]
    pub model: String,
    #[serde(default, deserialize_with = "or_default")]
    pub input: EmbeddingInput,
}

impl EmbeddingRequest {
    pub fn inputs(&self) -> &[String] {
        &self.input.0
    }

    /// Crude token estimate: total characters / 4.
    pub fn approximate_tokens(&self) -> usize {
        self.inputs().iter().map(|s| s.chars().count()).sum::<usize>() / 4
    }
}

/// The field's value, or its default when the value has the wrong shape.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Array elements that deserialize; anything else is skipped.
fn valid_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// `true` only for a JSON `true`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn latest_user_message_wins() {
        let req: ChatRequest = serde_json::from_value(json!({
            "messages": [
                {"role": "user", "content": "first"},
                {"role": "assistant", "content": "reply"},
                {"role": "user", "content": "second"},
                {"role": "tool", "content": "{}", "tool_call_id": "call_1"}
            ]
        }))
        .unwrap();
        assert_eq!(req.latest_user_text(), "second");
    }

    #[test]
    fn falls_back_to_last_message_then_empty() {
        let req: ChatRequest = serde_json::from_value(json!({
            "messages": [
                {"role": "system", "content": "be nice"},
                {"role": "assistant", "content": "last"}
            ]
        }))
        .unwrap();
        assert_eq!(req.latest_user_text(), "last");
        assert_eq!(ChatRequest::default().latest_user_text(), "");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let req: ChatRequest =
            serde_json::from_value(json!({"messages": [{"role": "user"}], "stream": null})).unwrap();
        assert!(!req.stream);
        assert!(req.model.is_empty());
        assert_eq!(req.latest_user_text(), "");
        assert!(req.declared_tools().is_empty());
    }

    #[test]
    fn content_parts_are_joined() {
        let msg: ConversationMessage = serde_json::from_value(json!({
            "role": "user",
            "content": [{"type": "text", "text": "what's"}, {"type": "image_url"}, {"type": "text", "text": "up"}]
        }))
        .unwrap();
        assert_eq!(msg.text(), "what's\nup");
    }

    #[test]
    fn unknown_role_is_tolerated() {
        let msg: ConversationMessage =
            serde_json::from_value(json!({"role": "developer", "content": "x"})).unwrap();
        assert_eq!(msg.role, Role::Other);
    }

    #[test]
    fn finds_tool_by_function_name() {
        let req = ChatRequest {
            tools: Some(vec![
                json!({"type": "function", "function": {"name": "web_search"}}),
                json!({"type": "function", "function": {"name": "get_weather"}}),
            ]),
            ..Default::default()
        };
        assert!(req.find_tool("get_weather").is_some());
        assert!(req.find_tool("create_ticket").is_none());
    }

    #[test]
    fn embedding_input_accepts_string_or_list() {
        let one: EmbeddingRequest = serde_json::from_value(json!({"input": "abcd"})).unwrap();
        assert_eq!(one.inputs(), ["abcd"]);
        let many: EmbeddingRequest = serde_json::from_value(json!({"input": ["a", "b"]})).unwrap();
        assert_eq!(many.inputs(), ["a", "b"]);
        let none: EmbeddingRequest = serde_json::from_value(json!({"model": "m"})).unwrap();
        assert!(none.inputs().is_empty());
    }

    #[test]
    fn mistyped_fields_fall_back_individually() {
        let req: ChatRequest = serde_json::from_value(json!({
            "model": null,
            "stream": "false",
            "messages": [
                {"role": null, "content": "x"},
                42,
                {"role": "user", "content": "what's the weather", "tool_call_id": 7}
            ],
            "tools": [{"type": "function", "function": {"name": "get_weather"}}]
        }))
        .unwrap();
        assert!(req.model.is_empty());
        assert!(!req.stream);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, Role::Other);
        assert_eq!(req.messages[1].tool_call_id, None);
        assert_eq!(req.latest_user_text(), "what's the weather");
        assert!(req.find_tool("get_weather").is_some());
    }

    #[test]
    fn non_list_collections_become_empty() {
        let req: ChatRequest =
            serde_json::from_value(json!({"messages": "hi", "tools": "get_weather", "stream": 1})).unwrap();
        assert!(req.messages.is_empty());
        assert!(req.declared_tools().is_empty());
        assert!(!req.stream);

        let emb: EmbeddingRequest = serde_json::from_value(json!({"model": 3, "input": 5})).unwrap();
        assert!(emb.model.is_empty());
        assert!(emb.inputs().is_empty());
    }

    #[test]
    fn roleless_message_is_not_the_user() {
        let req: ChatRequest = serde_json::from_value(json!({
            "messages": [
                {"role": "user", "content": "earlier question"},
                {"content": "no role here"}
            ]
        }))
        .unwrap();
        assert_eq!(req.messages[1].role, Role::Other);
        assert_eq!(req.latest_user_text(), "earlier question");
    }

    #[test]
    fn approximate_tokens_floor_divides() {
        let req: EmbeddingRequest =
            serde_json::from_value(json!({"input": ["hello", "world!!"]})).unwrap();
        assert_eq!(req.approximate_tokens(), 3);
    }
}

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::MockError;

/// Marker prefix of the textual tool-call form (`TOOL_CALL:get_weather`).
pub const TOOL_CALL_PREFIX: &str = "TOOL_CALL:";

/// Strip the tool-call marker from a response text.
///
/// Returns `None` for anything that is not a tool-call marker.
pub fn tool_name_of(response_text: &str) -> Option<&str> {
    response_text.strip_prefix(TOOL_CALL_PREFIX)
}

/// What a matched rule resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Literal assistant text.
    PlainText(String),
    /// Ask the client to invoke the named tool.
    ToolCall(String),
}

impl Response {
    /// Interpret a rule payload, recognising the `TOOL_CALL:<name>` marker.
    pub fn parse(payload: impl Into<String>) -> Self {
        let payload = payload.into();
        match tool_name_of(&payload) {
            Some(name) => Response::ToolCall(name.to_string()),
            None => Response::PlainText(payload),
        }
    }

    pub fn is_tool_call(&self) -> bool {
        matches!(self, Response::ToolCall(_))
    }

    pub fn tool_name(&self) -> Option<&str> {
        match self {
            Response::ToolCall(name) => Some(name),
            Response::PlainText(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Response::PlainText(text) => Some(text),
            Response::ToolCall(_) => None,
        }
    }
}

/// Renders the wire form: plain text verbatim, tool calls as the marker.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::PlainText(text) => f.write_str(text),
            Response::ToolCall(name) => write!(f, "{TOOL_CALL_PREFIX}{name}"),
        }
    }
}

/// One ordered `(matcher, response)` rule.
#[derive(Debug, Clone)]
pub struct ResponsePattern {
    matcher: Regex,
    response: Response,
}

impl ResponsePattern {
    /// Compile `pattern` case-insensitively.
    pub fn new(pattern: &str, response: Response) -> Result<Self, MockError> {
        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| MockError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self { matcher, response })
    }

    pub fn text(pattern: &str, text: impl Into<String>) -> Result<Self, MockError> {
        Self::new(pattern, Response::PlainText(text.into()))
    }

    pub fn tool(pattern: &str, tool_name: impl Into<String>) -> Result<Self, MockError> {
        Self::new(pattern, Response::ToolCall(tool_name.into()))
    }

    /// Unanchored search, like `Matcher::find`.
    pub fn matches(&self, prompt: &str) -> bool {
        self.matcher.is_match(prompt)
    }

    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    pub fn response(&self) -> &Response {
        &self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tool_call_marker() {
        assert_eq!(
            Response::parse("TOOL_CALL:get_weather"),
            Response::ToolCall("get_weather".into())
        );
        assert_eq!(
            Response::parse("just text"),
            Response::PlainText("just text".into())
        );
    }

    #[test]
    fn display_restores_marker() {
        let r = Response::ToolCall("web_search".into());
        assert_eq!(r.to_string(), "TOOL_CALL:web_search");
        assert_eq!(tool_name_of(&r.to_string()), Some("web_search"));
    }

    #[test]
    fn tool_name_of_plain_text_is_none() {
        assert_eq!(tool_name_of("Hello there"), None);
        assert_eq!(tool_name_of(""), None);
    }

    #[test]
    fn matching_is_case_insensitive_and_unanchored() {
        let rule = ResponsePattern::text("spring.*cloud", "cloud").unwrap();
        assert!(rule.matches("Tell me about SPRING CLOUD please"));
        assert!(!rule.matches("cloud before spring"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = ResponsePattern::text("(unclosed", "x").unwrap_err();
        assert!(matches!(err, MockError::InvalidPattern { .. }));
        assert!(err.to_string().contains("(unclosed"));
    }
}

//! The response registry: ordered rules, fallback, tool results, embeddings.

use serde_json::Value;
use tracing::debug;

use crate::catalog::{builtin_rules, DEFAULT_RESPONSE};
use crate::embedding;
use crate::error::MockError;
use crate::response::{Response, ResponsePattern};
use crate::tools;

/// Read-only after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ResponseRegistry {
    patterns: Vec<ResponsePattern>,
    fallback: Response,
}

impl ResponseRegistry {
    /// Registry with only the built-in workshop rules.
    pub fn builtin() -> Result<Self, MockError> {
        RegistryBuilder::new().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// First rule whose pattern matches anywhere in `prompt`, else the fallback.
    pub fn find_response(&self, prompt: &str) -> &Response {
        match self.patterns.iter().position(|p| p.matches(prompt)) {
            Some(index) => {
                debug!(rule = index, pattern = self.patterns[index].pattern(), "Matched response rule");
                self.patterns[index].response()
            }
            None => {
                debug!("No rule matched; using fallback");
                &self.fallback
            }
        }
    }

    pub fn is_tool_call(&self, prompt: &str) -> bool {
        self.find_response(prompt).is_tool_call()
    }

    pub fn default_response(&self) -> &str {
        match &self.fallback {
            Response::PlainText(text) => text,
            Response::ToolCall(_) => DEFAULT_RESPONSE,
        }
    }

    pub fn tool_result(&self, tool_name: &str, arguments: &Value) -> Value {
        tools::tool_result(tool_name, arguments)
    }

    pub fn embedding_of(&self, text: &str) -> Vec<f32> {
        embedding::embedding_of(text)
    }

    pub fn rules(&self) -> &[ResponsePattern] {
        &self.patterns
    }
}

/// Assembles a [`ResponseRegistry`]. Custom rules always precede built-ins.
#[derive(Debug)]
pub struct RegistryBuilder {
    custom: Vec<ResponsePattern>,
    include_builtin: bool,
    fallback: Option<String>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            custom: Vec::new(),
            include_builtin: true,
            fallback: None,
        }
    }

    pub fn rule(mut self, rule: ResponsePattern) -> Self {
        self.custom.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = ResponsePattern>) -> Self {
        self.custom.extend(rules);
        self
    }

    pub fn include_builtin(mut self, include: bool) -> Self {
        self.include_builtin = include;
        self
    }

    pub fn fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = Some(text.into());
        self
    }

    pub fn build(self) -> Result<ResponseRegistry, MockError> {
        let mut patterns = self.custom;
        if self.include_builtin {
            patterns.extend(builtin_rules()?);
        }

        let fallback = self.fallback.unwrap_or_else(|| DEFAULT_RESPONSE.to_string());
        if fallback.trim().is_empty() {
            return Err(MockError::InvalidRule("fallback response cannot be empty".into()));
        }

        Ok(ResponseRegistry {
            patterns,
            fallback: Response::PlainText(fallback),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::tool_name_of;

    fn registry() -> ResponseRegistry {
        ResponseRegistry::builtin().unwrap()
    }

    #[test]
    fn unmatched_text_returns_fallback() {
        let r = registry();
        for text in ["", "zzz", "qwerty 12345"] {
            assert_eq!(r.find_response(text), &Response::PlainText(DEFAULT_RESPONSE.into()));
        }
        assert_eq!(r.default_response(), DEFAULT_RESPONSE);
    }

    #[test]
    fn first_declared_rule_wins() {
        let r = registry();
        // Matches both the Tanzu Spring rule and the broader security rule.
        let text = "Tell me about Tanzu Spring Enterprise security patches";
        let text_response = r.find_response(text).as_text().unwrap();
        assert!(text_response.starts_with("Tanzu Spring is Broadcom's"));

        // Billing is declared before security.
        let billing = r.find_response("What does a CVE patch subscription cost?");
        assert!(billing.as_text().unwrap().contains("billing-related question"));
    }

    #[test]
    fn custom_rules_precede_builtin() {
        let r = ResponseRegistry::builder()
            .rule(ResponsePattern::text("security", "custom security answer").unwrap())
            .build()
            .unwrap();
        assert_eq!(
            r.find_response("any security news?"),
            &Response::PlainText("custom security answer".into())
        );
    }

    #[test]
    fn tool_call_classification() {
        let r = registry();
        assert!(r.is_tool_call("what's the weather"));
        assert!(r.is_tool_call("What time is it in Berlin?"));
        assert!(r.is_tool_call("please open a ticket for me"));
        assert!(!r.is_tool_call("hello there"));

        let marker = r.find_response("what's the weather").to_string();
        assert_eq!(tool_name_of(&marker), Some("get_weather"));
    }

    #[test]
    fn greeting_is_anchored_at_start() {
        let r = registry();
        assert!(r.find_response("Hello!").as_text().unwrap().starts_with("Hello! I'm"));
        // "hi" mid-sentence does not trigger the anchored greeting.
        assert_eq!(r.find_response("this is it"), &Response::PlainText(DEFAULT_RESPONSE.into()));
    }

    #[test]
    fn without_builtin_only_custom_rules_apply() {
        let r = ResponseRegistry::builder()
            .include_builtin(false)
            .fallback("nothing here")
            .build()
            .unwrap();
        assert!(r.rules().is_empty());
        assert_eq!(r.find_response("what's the weather").as_text(), Some("nothing here"));
        assert_eq!(r.default_response(), "nothing here");
    }

    #[test]
    fn empty_fallback_is_rejected() {
        let err = ResponseRegistry::builder().fallback("  ").build().unwrap_err();
        assert!(matches!(err, MockError::InvalidRule(_)));
    }

    #[test]
    fn delegates_generation() {
        let r = registry();
        assert_eq!(r.embedding_of("x").len(), embedding::EMBEDDING_DIM);
        assert_eq!(r.tool_result("nope", &Value::Null)["error"], "Unknown tool");
    }
}

//! Turns the `responses` section into a [`ResponseRegistry`].

use mockai_core::{MockError, Response, ResponsePattern, ResponseRegistry};
use tracing::info;

use crate::schema::{ResponsesConfig, RuleConfig};

/// Compile one configured rule.
pub fn compile_rule(rule: &RuleConfig) -> Result<ResponsePattern, MockError> {
    let response = match (&rule.response, &rule.tool) {
        (Some(text), None) => Response::parse(text.clone()),
        (None, Some(tool)) => Response::ToolCall(tool.clone()),
        (Some(_), Some(_)) => {
            return Err(MockError::InvalidRule(format!(
                "rule `{}` sets both response and tool",
                rule.pattern
            )))
        }
        (None, None) => {
            return Err(MockError::InvalidRule(format!(
                "rule `{}` needs a response or a tool",
                rule.pattern
            )))
        }
    };
    ResponsePattern::new(&rule.pattern, response)
}

/// Build the process-wide registry: configured rules first, then built-ins.
pub fn build_registry(responses: &ResponsesConfig) -> Result<ResponseRegistry, MockError> {
    let rules = responses
        .rules
        .iter()
        .map(compile_rule)
        .collect::<Result<Vec<_>, _>>()?;

    let mut builder = ResponseRegistry::builder()
        .rules(rules)
        .include_builtin(responses.include_builtin.unwrap_or(true));
    if let Some(fallback) = &responses.fallback {
        builder = builder.fallback(fallback.clone());
    }

    let registry = builder.build()?;
    info!(
        rules = registry.rules().len(),
        custom = responses.rules.len(),
        "Response registry ready"
    );
    Ok(registry)
}

//! Canned tool results.
//!
//! Everything except the current-time payload is a static literal.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Tools the mock knows how to answer for.
pub const KNOWN_TOOLS: &[&str] = &["get_weather", "get_current_time", "create_ticket", "web_search"];

/// Simulated result for `tool_name`; `arguments` are accepted but ignored.
pub fn tool_result(tool_name: &str, arguments: &Value) -> Value {
    tool_result_at(tool_name, arguments, Utc::now())
}

/// Same as [`tool_result`] with an explicit clock.
pub fn tool_result_at(tool_name: &str, _arguments: &Value, now: DateTime<Utc>) -> Value {
    match tool_name {
        "get_weather" => json!({
            "location": "San Francisco",
            "temperature": "18°C",
            "condition": "Partly cloudy",
            "humidity": "65%"
        }),
        "get_current_time" => json!({
            "datetime": now.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            "timezone": "UTC"
        }),
        "create_ticket" => json!({
            "ticket_id": "TSE-12345",
            "status": "CREATED",
            "message": "Support ticket created successfully"
        }),
        "web_search" => json!({
            "results": [
                {
                    "title": "Spring Boot 3.4.1 Released",
                    "url": "https://spring.io/blog/2025/01/spring-boot-3-4-1"
                },
                {
                    "title": "Spring Framework 6.2 GA",
                    "url": "https://spring.io/blog/2024/11/spring-framework-6-2"
                }
            ]
        }),
        _ => json!({ "error": "Unknown tool" }),
    }
}

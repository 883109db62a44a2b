//! Log Redaction Layer
//!
//! Prompts are user-controlled text; scrub credentials and phone numbers and
//! bound their length before they reach a log line.

use regex::Regex;
use std::sync::LazyLock;

/// Longest prompt preview written to logs, in characters.
pub const PREVIEW_CHARS: usize = 120;

static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});
static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9_\-]{20,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = TELEPHONE_RE.replace_all(input, "[REDACTED_PHONE]");
    API_KEY_RE
        .replace_all(&redacted, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Redacted, length-bounded preview of a prompt.
pub fn prompt_preview(prompt: &str) -> String {
    let redacted = redact_sensitive_data(prompt);
    if redacted.chars().count() <= PREVIEW_CHARS {
        return redacted;
    }
    let mut preview: String = redacted.chars().take(PREVIEW_CHARS).collect();
    preview.push('…');
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let raw = "Call +1-555-123-4567, key sk-abcdefghijklmnopqrstuvwx1234";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("555-123-4567"));
        assert!(!clean.contains("sk-abcdefghijklmnopqrstuvwx1234"));
        assert!(clean.contains("[REDACTED_TOKEN]"));
    }

    #[test]
    fn preview_is_bounded() {
        let long = "spring ".repeat(100);
        let preview = prompt_preview(&long);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));
        assert_eq!(prompt_preview("short"), "short");
    }
}

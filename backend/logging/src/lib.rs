//! Structured logging for mockai.
//!
//! Handles subscriber setup, prompt redaction, and per-request event records.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, RequestEvent};
pub use logger::{init_logger, LogSettings};
pub use redact::{prompt_preview, redact_sensitive_data};

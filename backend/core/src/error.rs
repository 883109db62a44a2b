use thiserror::Error;

/// Top-level error type for the mockai runtime.
///
/// Request handling never produces one of these. Rule errors surface while the
/// registry is being built; client errors come from [`crate::ChatClient`] calls.
#[derive(Debug, Error)]
pub enum MockError {
    #[error("invalid rule pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid rule: {0}")]
    InvalidRule(String),

    #[error("chat client error: {0}")]
    ClientError(String),
}

use async_trait::async_trait;

use crate::error::MockError;

/// Anything that can send one user prompt to a chat model and return its reply.
///
/// The mock server never calls this itself; clients exercising it do.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Model the client addresses.
    fn model(&self) -> &str;

    /// Send `user_prompt` as a single-turn conversation and return the content.
    async fn prompt(&self, user_prompt: &str) -> Result<String, MockError>;
}

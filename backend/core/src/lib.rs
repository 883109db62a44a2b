pub mod catalog;
pub mod embedding;
pub mod error;
pub mod registry;
pub mod response;
pub mod tools;
pub mod traits;
pub mod types;

pub use catalog::DEFAULT_RESPONSE;
pub use embedding::{embedding_of, EMBEDDING_DIM};
pub use error::MockError;
pub use registry::{RegistryBuilder, ResponseRegistry};
pub use response::{tool_name_of, Response, ResponsePattern, TOOL_CALL_PREFIX};
pub use tools::{tool_result, KNOWN_TOOLS};
pub use traits::ChatClient;
pub use types::{
    ChatRequest, ConversationMessage, EmbeddingInput, EmbeddingRequest, MessageContent, Role,
};

pub mod broker;
pub mod chat_session;
pub mod gateway;
pub mod gateways;
pub mod models;

pub use broker::LlmBroker;
pub use chat_session::{ChatSession, ChatSessionBuilder};
pub use gateway::{CompletionConfig, LlmGateway};
pub use models::{LlmGatewayResponse, LlmMessage, MessageRole};

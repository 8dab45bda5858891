pub mod app;
pub mod error;
pub mod latex;
pub mod llm;

pub use error::{LatexGeniusError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::app::{AppController, GenerationState, GenerationStatus, LatexPreview};
    pub use crate::error::{LatexGeniusError, Result};
    pub use crate::latex::LatexGenerator;
    pub use crate::llm::gateways::{GeminiConfig, GeminiGateway};
    pub use crate::llm::{ChatSession, CompletionConfig, LlmBroker, LlmGateway, LlmMessage};
}

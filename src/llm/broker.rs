use crate::error::Result;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::LlmMessage;
use std::sync::Arc;
use tracing::{debug, warn};

/// Main interface for LLM interactions
#[derive(Clone)]
pub struct LlmBroker {
    model: String,
    gateway: Arc<dyn LlmGateway>,
}

impl LlmBroker {
    /// Create a new LLM broker
    pub fn new(model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            model: model.into(),
            gateway,
        }
    }

    /// Name of the model requests are routed to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text response from LLM
    ///
    /// A response without any text content yields an empty string; callers decide
    /// how to present that.
    pub async fn generate(
        &self,
        messages: &[LlmMessage],
        config: Option<CompletionConfig>,
    ) -> Result<String> {
        let config = config.unwrap_or_default();

        debug!(model = %self.model, messages = messages.len(), "Generating response");

        let response = self.gateway.complete(&self.model, messages, &config).await?;

        if let Some(reason) = response.finish_reason.as_deref() {
            if reason != "STOP" {
                warn!(model = %self.model, finish_reason = reason, "Generation ended early");
            }
        }

        Ok(response.content.unwrap_or_default())
    }
}

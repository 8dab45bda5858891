//! LaTeX generation sessions.
//!
//! [`LatexGenerator`] creates chat sessions preconfigured for document generation and
//! turns raw model replies into clean LaTeX source.

use crate::error::{LatexGeniusError, Result};
use crate::latex::prompt::{SYSTEM_INSTRUCTION, TEMPERATURE, THINKING_BUDGET};
use crate::latex::sanitize::sanitize_latex;
use crate::llm::gateways::{GeminiConfig, GeminiGateway};
use crate::llm::{ChatSession, LlmBroker};
use std::sync::Arc;
use tracing::{debug, error, info};

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Shown when a failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate LaTeX.";

/// Creates LaTeX chat sessions and sends requests through them.
#[derive(Clone)]
pub struct LatexGenerator {
    broker: LlmBroker,
}

impl LatexGenerator {
    pub fn new(broker: LlmBroker) -> Self {
        Self { broker }
    }

    /// Build a generator against Gemini from the process environment.
    ///
    /// Fails when no API key is configured. `LATEXGENIUS_MODEL` overrides the model.
    pub fn from_env() -> Result<Self> {
        let config = GeminiConfig::from_env()?;
        let model = std::env::var("LATEXGENIUS_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        info!(model = %model, "Using Gemini model");

        let gateway = Arc::new(GeminiGateway::with_config(config)?);
        Ok(Self::new(LlmBroker::new(model, gateway)))
    }

    pub fn model(&self) -> &str {
        self.broker.model()
    }

    /// Start a fresh conversation with the document-generation instruction.
    pub fn create_session(&self) -> ChatSession {
        ChatSession::builder(self.broker.clone())
            .system_prompt(SYSTEM_INSTRUCTION)
            .temperature(TEMPERATURE)
            .thinking_budget(THINKING_BUDGET)
            .build()
    }

    /// Send a request (or follow-up edit) and return the sanitized document.
    ///
    /// Never returns an empty string on success. Every failure is reported as
    /// [`LatexGeniusError::GenerationFailed`] carrying a human-readable message.
    pub async fn send(&self, session: &mut ChatSession, message: &str) -> Result<String> {
        match session.send(message).await {
            Ok(text) => {
                debug!(turns = session.turn_count(), "Received document revision");
                Ok(sanitize_latex(&text))
            }
            Err(e) => {
                error!("Gemini generation error: {}", e);
                Err(LatexGeniusError::GenerationFailed(failure_message(&e)))
            }
        }
    }
}

/// The detail to show the user for a failed generation.
pub fn failure_message(err: &LatexGeniusError) -> String {
    let detail = match err {
        LatexGeniusError::GatewayError(m)
        | LatexGeniusError::ApiError(m)
        | LatexGeniusError::GenerationFailed(m) => m.clone(),
        other => other.to_string(),
    };

    if detail.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        detail
    }
}

//! Gemini Gateway for LLM interactions.
//!
//! This module provides a gateway for Google's Gemini `generateContent` API.

use crate::error::{LatexGeniusError, Result};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::gateways::gemini_messages_adapter::{
    adapt_messages_to_gemini, extract_error_message, extract_response_text,
};
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for connecting to the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<std::time::Duration>,
}

impl GeminiConfig {
    /// Read configuration from the process environment.
    ///
    /// The key comes from `GEMINI_API_KEY`, falling back to `API_KEY`. A missing or blank
    /// key is a configuration error. `GEMINI_API_ENDPOINT` overrides the base URL.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup. Blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = non_blank("GEMINI_API_KEY")
            .or_else(|| non_blank("API_KEY"))
            .ok_or_else(|| {
                LatexGeniusError::ConfigError(
                    "GEMINI_API_KEY (or API_KEY) must be set to a Gemini API key".to_string(),
                )
            })?;

        let base_url = non_blank("GEMINI_API_ENDPOINT")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url,
            timeout: None,
        })
    }
}

/// Gateway for the Gemini LLM service.
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    /// Create a new Gemini gateway with custom configuration.
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Self { client, config })
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(GeminiConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: None,
        })
    }

    fn build_request_body(&self, messages: &[LlmMessage], config: &CompletionConfig) -> Value {
        let parts = adapt_messages_to_gemini(messages);

        let mut generation_config = serde_json::json!({
            "temperature": config.temperature,
        });
        if let Some(budget) = config.thinking_budget {
            generation_config["thinkingConfig"] = serde_json::json!({ "thinkingBudget": budget });
        }

        let mut body = serde_json::json!({
            "contents": parts.contents,
            "generationConfig": generation_config,
        });
        if let Some(instruction) = parts.system_instruction {
            body["systemInstruction"] = instruction;
        }

        body
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        info!("Delegating to Gemini for completion");
        debug!("Model: {}, Message count: {}", model, messages.len());

        let body = self.build_request_body(messages, config);

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.config.base_url, model))
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let message = extract_error_message(&error_text)
                .unwrap_or_else(|| error_text.trim().to_string());
            return Err(LatexGeniusError::GatewayError(if message.is_empty() {
                format!("Gemini API error ({})", status)
            } else {
                format!("Gemini API error ({}): {}", status, message)
            }));
        }

        let response_text = response.text().await?;
        let response_body: Value = serde_json::from_str(&response_text)?;

        if let Some(reason) = response_body["promptFeedback"]["blockReason"].as_str() {
            return Err(LatexGeniusError::ApiError(format!("Request was blocked: {}", reason)));
        }

        Ok(LlmGatewayResponse {
            content: extract_response_text(&response_body),
            finish_reason: response_body["candidates"][0]["finishReason"]
                .as_str()
                .map(String::from),
        })
    }
}

//! Multi-turn chat session management.
//!
//! This module provides a chat session abstraction that owns the conversation history
//! and the fixed generation settings used for every turn.

use crate::error::Result;
use crate::llm::broker::LlmBroker;
use crate::llm::gateway::CompletionConfig;
use crate::llm::models::{LlmMessage, MessageRole};

/// A chat session that accumulates conversation history across turns.
///
/// `ChatSession` keeps the system prompt as its first message and appends one user and
/// one assistant message per completed turn. Every turn is sent with the same
/// temperature and thinking budget.
///
/// # Examples
///
/// ```ignore
/// use latexgenius::llm::{ChatSession, LlmBroker};
/// use latexgenius::llm::gateways::{GeminiConfig, GeminiGateway};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let gateway = Arc::new(GeminiGateway::with_config(GeminiConfig::from_env()?)?);
///     let broker = LlmBroker::new("gemini-3-pro-preview", gateway);
///     let mut session = ChatSession::builder(broker)
///         .system_prompt("Answer in LaTeX.")
///         .build();
///
///     let response = session.send("Write a haiku about LaTeX").await?;
///     println!("Response: {}", response);
///
///     Ok(())
/// }
/// ```
pub struct ChatSession {
    broker: LlmBroker,
    messages: Vec<LlmMessage>,
    temperature: f32,
    thinking_budget: Option<u32>,
}

impl ChatSession {
    /// Create a chat session builder for custom configuration.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let session = ChatSession::builder(broker)
    ///     .system_prompt("You are a LaTeX expert.")
    ///     .temperature(0.2)
    ///     .thinking_budget(2048)
    ///     .build();
    /// ```
    pub fn builder(broker: LlmBroker) -> ChatSessionBuilder {
        ChatSessionBuilder::new(broker)
    }

    /// Send a message to the LLM and get a response.
    ///
    /// The user message and the assistant's reply are both recorded in the history, so
    /// calling this twice with the same text produces two turns. If the call fails the
    /// history is left exactly as it was before the call.
    pub async fn send(&mut self, query: &str) -> Result<String> {
        self.messages.push(LlmMessage::user(query));

        let config = CompletionConfig {
            temperature: self.temperature,
            thinking_budget: self.thinking_budget,
        };

        match self.broker.generate(&self.messages, Some(config)).await {
            Ok(response) => {
                self.messages.push(LlmMessage::assistant(&response));
                Ok(response)
            }
            Err(e) => {
                // Withdraw the unanswered turn
                self.messages.pop();
                Err(e)
            }
        }
    }

    /// Get the current conversation history
    pub fn messages(&self) -> &[LlmMessage] {
        &self.messages
    }

    /// Number of completed user/assistant exchanges
    pub fn turn_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == MessageRole::Assistant)
            .count()
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn thinking_budget(&self) -> Option<u32> {
        self.thinking_budget
    }
}

/// Builder for constructing a `ChatSession` with custom configuration.
pub struct ChatSessionBuilder {
    broker: LlmBroker,
    system_prompt: Option<String>,
    temperature: f32,
    thinking_budget: Option<u32>,
}

impl ChatSessionBuilder {
    /// Create a new builder
    fn new(broker: LlmBroker) -> Self {
        Self {
            broker,
            system_prompt: None,
            temperature: 1.0,
            thinking_budget: None,
        }
    }

    /// Set the system prompt (default: none)
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the temperature for generation (default: 1.0)
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the reasoning budget granted to the model per turn (default: provider default)
    pub fn thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }

    /// Build the chat session
    pub fn build(self) -> ChatSession {
        ChatSession {
            broker: self.broker,
            messages: self.system_prompt.map(LlmMessage::system).into_iter().collect(),
            temperature: self.temperature,
            thinking_budget: self.thinking_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LatexGeniusError;
    use crate::llm::gateway::LlmGateway;
    use crate::llm::models::LlmGatewayResponse;
    use std::sync::{Arc, Mutex};

    // Mock gateway for testing
    struct MockGateway {
        responses: Vec<Result<String>>,
        call_count: Mutex<usize>,
        configs: Mutex<Vec<CompletionConfig>>,
    }

    impl MockGateway {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses,
                call_count: Mutex::new(0),
                configs: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait::async_trait]
    impl LlmGateway for MockGateway {
        async fn complete(
            &self,
            _model: &str,
            _messages: &[LlmMessage],
            config: &CompletionConfig,
        ) -> Result<LlmGatewayResponse> {
            self.configs.lock().unwrap().push(config.clone());

            let mut count = self.call_count.lock().unwrap();
            let idx = *count;
            *count += 1;

            match self.responses.get(idx) {
                Some(Ok(content)) => Ok(LlmGatewayResponse {
                    content: Some(content.clone()),
                    finish_reason: None,
                }),
                Some(Err(e)) => Err(LatexGeniusError::GatewayError(e.to_string())),
                None => Ok(LlmGatewayResponse {
                    content: Some("default response".to_string()),
                    finish_reason: None,
                }),
            }
        }
    }

    fn broker(gateway: Arc<MockGateway>) -> LlmBroker {
        LlmBroker::new("test-model", gateway)
    }

    fn session(gateway: Arc<MockGateway>) -> ChatSession {
        ChatSession::builder(broker(gateway))
            .system_prompt("Answer in LaTeX.")
            .build()
    }

    #[test]
    fn test_new_session_has_system_message() {
        let session = session(Arc::new(MockGateway::new(vec![])));

        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].role, MessageRole::System);
        assert_eq!(session.messages[0].content, "Answer in LaTeX.");
        assert_eq!(session.turn_count(), 0);
    }

    #[test]
    fn test_builder_without_system_prompt_starts_empty() {
        let session = ChatSession::builder(broker(Arc::new(MockGateway::new(vec![])))).build();

        assert!(session.messages().is_empty());
        assert_eq!(session.turn_count(), 0);
    }

    #[test]
    fn test_builder_custom_settings() {
        let session = ChatSession::builder(broker(Arc::new(MockGateway::new(vec![]))))
            .system_prompt("Custom system prompt")
            .temperature(0.2)
            .thinking_budget(2048)
            .build();

        assert_eq!(session.messages[0].content, "Custom system prompt");
        assert_eq!(session.temperature(), 0.2);
        assert_eq!(session.thinking_budget(), Some(2048));
    }

    #[tokio::test]
    async fn test_send_adds_messages_to_history() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("Hello, World!".to_string())]));
        let mut session = session(gateway);

        let response = session.send("Hi").await.unwrap();

        assert_eq!(response, "Hello, World!");
        // Should have: system, user, assistant
        assert_eq!(session.messages.len(), 3);
        assert_eq!(session.messages[1].role, MessageRole::User);
        assert_eq!(session.messages[1].content, "Hi");
        assert_eq!(session.messages[2].role, MessageRole::Assistant);
        assert_eq!(session.messages[2].content, "Hello, World!");
    }

    #[tokio::test]
    async fn test_send_multiple_turns() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok("First response".to_string()),
            Ok("Second response".to_string()),
        ]));
        let mut session = session(gateway);

        session.send("First query").await.unwrap();
        session.send("Second query").await.unwrap();

        assert_eq!(session.messages.len(), 5);
        assert_eq!(session.messages[3].content, "Second query");
        assert_eq!(session.messages[4].content, "Second response");
        assert_eq!(session.turn_count(), 2);
    }

    #[tokio::test]
    async fn test_repeated_query_creates_new_turn() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let mut session = session(gateway);

        session.send("Same").await.unwrap();
        session.send("Same").await.unwrap();

        assert_eq!(session.turn_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_send_leaves_history_untouched() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok("First".to_string()),
            Err(LatexGeniusError::GatewayError("quota".to_string())),
        ]));
        let mut session = session(gateway);

        session.send("One").await.unwrap();
        let result = session.send("Two").await;

        assert!(result.is_err());
        assert_eq!(session.messages.len(), 3);
        assert_eq!(session.messages[2].content, "First");
    }

    #[tokio::test]
    async fn test_send_uses_session_settings() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let mut session = ChatSession::builder(broker(gateway.clone()))
            .temperature(0.2)
            .thinking_budget(2048)
            .build();

        session.send("Hi").await.unwrap();

        let configs = gateway.configs.lock().unwrap();
        assert_eq!(configs[0].temperature, 0.2);
        assert_eq!(configs[0].thinking_budget, Some(2048));
    }
}

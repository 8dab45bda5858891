//! Adapter for converting LLM messages to Gemini format.
//!
//! Gemini takes the system prompt out-of-band as `systemInstruction` and calls the
//! assistant role `model`.

use crate::llm::models::{LlmMessage, MessageRole};
use serde_json::Value;

/// Messages split into the two halves of a `generateContent` request.
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiRequestParts {
    pub system_instruction: Option<Value>,
    pub contents: Vec<Value>,
}

fn text_parts(text: &str) -> Value {
    serde_json::json!([{ "text": text }])
}

/// Adapt LLM messages to Gemini format.
///
/// Multiple system messages are joined with blank lines into one instruction.
pub fn adapt_messages_to_gemini(messages: &[LlmMessage]) -> GeminiRequestParts {
    let mut system_texts = Vec::new();
    let mut contents = Vec::new();

    for msg in messages {
        match msg.role {
            MessageRole::System => system_texts.push(msg.content.as_str()),
            MessageRole::User => contents.push(serde_json::json!({
                "role": "user",
                "parts": text_parts(&msg.content),
            })),
            MessageRole::Assistant => contents.push(serde_json::json!({
                "role": "model",
                "parts": text_parts(&msg.content),
            })),
        }
    }

    let system_instruction = if system_texts.is_empty() {
        None
    } else {
        Some(serde_json::json!({ "parts": text_parts(&system_texts.join("\n\n")) }))
    };

    GeminiRequestParts {
        system_instruction,
        contents,
    }
}

/// Extract the answer text from a `generateContent` response body.
///
/// Parts flagged as `thought` carry the model's reasoning summary and are skipped.
/// Returns `None` when the first candidate has no text parts at all.
pub fn extract_response_text(body: &Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;

    let texts: Vec<&str> = parts
        .iter()
        .filter(|part| !part["thought"].as_bool().unwrap_or(false))
        .filter_map(|part| part["text"].as_str())
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

/// Extract the provider error message from an error response body, if any.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value["error"]["message"]
        .as_str()
        .filter(|m| !m.trim().is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_system_message_becomes_instruction() {
        let messages = vec![LlmMessage::system("Be terse"), LlmMessage::user("Hi")];

        let parts = adapt_messages_to_gemini(&messages);

        assert_eq!(parts.system_instruction, Some(json!({"parts": [{"text": "Be terse"}]})));
        assert_eq!(parts.contents.len(), 1);
        assert_eq!(parts.contents[0]["role"], "user");
        assert_eq!(parts.contents[0]["parts"][0]["text"], "Hi");
    }

    #[test]
    fn test_assistant_role_maps_to_model() {
        let messages = vec![
            LlmMessage::user("Make a letter"),
            LlmMessage::assistant("\\documentclass{letter}"),
            LlmMessage::user("Make it formal"),
        ];

        let parts = adapt_messages_to_gemini(&messages);

        assert!(parts.system_instruction.is_none());
        let roles: Vec<&str> = parts.contents.iter().map(|c| c["role"].as_str().unwrap()).collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
    }

    #[test]
    fn test_multiple_system_messages_are_joined() {
        let messages = vec![LlmMessage::system("One"), LlmMessage::system("Two")];

        let parts = adapt_messages_to_gemini(&messages);

        assert_eq!(parts.system_instruction.unwrap()["parts"][0]["text"], "One\n\nTwo");
    }

    #[test]
    fn test_extract_response_text_skips_thoughts() {
        let body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "planning the layout", "thought": true},
                        {"text": "\\documentclass{article}"},
                        {"text": "\n\\end{document}"}
                    ]
                }
            }]
        });

        assert_eq!(
            extract_response_text(&body),
            Some("\\documentclass{article}\n\\end{document}".to_string())
        );
    }

    #[test]
    fn test_extract_response_text_missing_candidates() {
        assert_eq!(extract_response_text(&json!({"candidates": []})), None);
        assert_eq!(extract_response_text(&json!({})), None);
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(extract_error_message(body), Some("Resource has been exhausted".to_string()));
    }

    #[test]
    fn test_extract_error_message_non_json() {
        assert_eq!(extract_error_message("Bad Gateway"), None);
        assert_eq!(extract_error_message(r#"{"error":{"message":""}}"#), None);
    }
}

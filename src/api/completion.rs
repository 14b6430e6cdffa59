//! Chat Completion API
//!
//! Request and response types for the chat completion endpoint.

use crate::error::{AgentryError, Result};
use serde::{Deserialize, Serialize};

/// Role of a message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation; if present, must come first
    System,

    /// End-user input
    User,

    /// Model output
    Assistant,
}

/// A message in a chat conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role: system, user, or assistant
    pub role: Role,

    /// Message text
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Chat completion request
///
/// Unset sampling fields are filled from [`SamplingDefaults`] when the request
/// is issued; the caller's value is never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (falls back to the configured default when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Messages in the conversation
    pub messages: Vec<Message>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Top-p sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Enable streaming
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl CompletionRequest {
    /// Create a new completion request
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            model: None,
            messages,
            max_tokens: None,
            temperature: None,
            top_p: None,
            stream: None,
        }
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set top-p
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Enable streaming
    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Resolve the request into the exact wire body.
    ///
    /// Rejects an empty message list before any network call is made. Every
    /// field the service expects is present in the result.
    pub(crate) fn finalize(&self, defaults: &SamplingDefaults) -> Result<WireRequest> {
        if self.messages.is_empty() {
            return Err(AgentryError::Config(
                "completion request requires at least one message".to_string(),
            ));
        }

        Ok(WireRequest {
            model: self
                .model
                .clone()
                .unwrap_or_else(|| defaults.model.clone()),
            messages: self.messages.clone(),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            top_p: self.top_p.unwrap_or(defaults.top_p),
            stream: self.stream.unwrap_or(false),
        })
    }
}

/// Fully-resolved request body as sent over the wire
#[derive(Debug, Clone, Serialize)]
pub(crate) struct WireRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stream: bool,
}

/// Fallback values applied to unset request fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingDefaults {
    /// Default model identifier
    pub model: String,

    /// Default max output tokens
    pub max_tokens: u32,

    /// Default sampling temperature
    pub temperature: f32,

    /// Default nucleus-sampling top-p
    pub top_p: f32,
}

impl Default for SamplingDefaults {
    fn default() -> Self {
        Self {
            model: "llama3.1-8b".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Response ID
    pub id: String,

    /// Object type
    pub object: String,

    /// Creation timestamp
    pub created: u64,

    /// Model used
    pub model: String,

    /// Response choices
    pub choices: Vec<Choice>,

    /// Token usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// A choice in the completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Choice index
    pub index: u32,

    /// The message
    pub message: Message,

    /// Finish reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    pub prompt_tokens: u32,

    /// Completion tokens
    pub completion_tokens: u32,

    /// Total tokens
    pub total_tokens: u32,
}

impl CompletionResponse {
    /// Get the first choice's message content
    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// Error body shape returned by the service on non-success statuses
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireError {
    #[serde(default)]
    pub error: WireErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

impl WireError {
    /// Best-effort extraction of the service message from an error body.
    pub(crate) fn message_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<WireError>(body)
            .ok()
            .and_then(|e| e.error.message)
    }
}

/// Model listing response for `GET /models`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ModelList {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelEntry {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), r#""system""#);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    #[test]
    fn test_finalize_applies_defaults() {
        let request = CompletionRequest::new(vec![Message::user("Hello")]);
        let wire = request.finalize(&SamplingDefaults::default()).unwrap();

        assert_eq!(wire.model, "llama3.1-8b");
        assert_eq!(wire.max_tokens, 1000);
        assert_eq!(wire.temperature, 0.7);
        assert_eq!(wire.top_p, 0.9);
        assert!(!wire.stream);
    }

    #[test]
    fn test_finalize_keeps_explicit_values() {
        let request = CompletionRequest::new(vec![Message::user("Hello")])
            .with_model("llama3.1-70b")
            .with_max_tokens(50)
            .with_temperature(0.2)
            .with_top_p(0.5)
            .with_stream(true);
        let wire = request.finalize(&SamplingDefaults::default()).unwrap();

        assert_eq!(wire.model, "llama3.1-70b");
        assert_eq!(wire.max_tokens, 50);
        assert_eq!(wire.temperature, 0.2);
        assert_eq!(wire.top_p, 0.5);
        assert!(wire.stream);
    }

    #[test]
    fn test_finalize_rejects_empty_messages() {
        let request = CompletionRequest::new(vec![]);
        let err = request.finalize(&SamplingDefaults::default()).unwrap_err();
        assert!(matches!(err, AgentryError::Config(_)));
    }

    #[test]
    fn test_wire_request_serialization() {
        let wire = CompletionRequest::new(vec![Message::user("Hi")])
            .finalize(&SamplingDefaults::default())
            .unwrap();
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["model"], "llama3.1-8b");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hi");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_completion_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "llama3.1-8b",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Hello!"
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 5,
                "total_tokens": 15
            }
        }"#;

        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, "chatcmpl-123");
        assert_eq!(response.content(), Some("Hello!"));
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_error_body_extraction() {
        let body = r#"{"error":{"message":"invalid api key","type":"auth"}}"#;
        assert_eq!(
            WireError::message_from_body(body),
            Some("invalid api key".to_string())
        );

        assert_eq!(WireError::message_from_body("not json"), None);
        assert_eq!(WireError::message_from_body("{}"), None);
    }

    #[test]
    fn test_model_list_tolerates_other_shapes() {
        let list: ModelList = serde_json::from_str(r#"{"object":"list"}"#).unwrap();
        assert!(list.data.is_empty());

        let list: ModelList =
            serde_json::from_str(r#"{"data":[{"id":"llama3.1-8b","owned_by":"x"}]}"#).unwrap();
        assert_eq!(list.data[0].id, "llama3.1-8b");
    }
}

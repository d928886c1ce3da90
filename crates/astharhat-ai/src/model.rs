//! Generative model abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::AiError;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A single generation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    /// Standing instructions for the model.
    pub system_instruction: Option<String>,
    /// Conversation so far, oldest first. The last turn is the prompt.
    pub turns: Vec<Turn>,
    /// When set, the model must answer with JSON matching this schema.
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    /// Single-turn request.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::user(text)],
            ..Self::default()
        }
    }

    /// Multi-turn request.
    pub fn conversation(turns: Vec<Turn>) -> Self {
        Self {
            turns,
            ..Self::default()
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Ask for a JSON response matching `schema`.
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// A text-generation backend.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model name, for logs.
    fn name(&self) -> &str;

    /// Generate a response. Returns the response text, which may be empty.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, AiError>;
}

/// Model used when no API key is configured. Every call fails with
/// [`AiError::Offline`], so services serve their fallbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineModel;

#[async_trait]
impl GenerativeModel for OfflineModel {
    fn name(&self) -> &str {
        "offline"
    }

    async fn generate(&self, _request: &GenerateRequest) -> Result<String, AiError> {
        Err(AiError::Offline)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Model returning canned responses in order and recording requests.
    #[derive(Default)]
    pub struct ScriptedModel {
        responses: Mutex<Vec<Result<String, AiError>>>,
        pub requests: Mutex<Vec<GenerateRequest>>,
    }

    impl ScriptedModel {
        pub fn new(responses: Vec<Result<String, AiError>>) -> Self {
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }

        pub fn last_request(&self) -> GenerateRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl GenerativeModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, request: &GenerateRequest) -> Result<String, AiError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(AiError::Request("script exhausted".into())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = GenerateRequest::prompt("hi")
            .with_system_instruction("be brief")
            .with_json_schema(serde_json::json!({"type": "OBJECT"}));
        assert_eq!(request.turns, vec![Turn::user("hi")]);
        assert_eq!(request.system_instruction.as_deref(), Some("be brief"));
        assert!(request.response_schema.is_some());
    }

    #[tokio::test]
    async fn test_offline_model_always_fails() {
        let result = OfflineModel.generate(&GenerateRequest::prompt("hi")).await;
        assert!(matches!(result, Err(AiError::Offline)));
    }
}

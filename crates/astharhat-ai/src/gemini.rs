//! Gemini `generateContent` REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{GenerateRequest, GenerativeModel, Turn};
use crate::policy::RequestPolicy;
use crate::AiError;

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
/// Default API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the Generative Language API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    policy: RequestPolicy,
}

impl GeminiClient {
    /// Create a client for `model`.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, AiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AiError::MissingApiKey);
        }

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AiError::Request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            policy: RequestPolicy::default(),
        })
    }

    /// Override the API base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the timeout and retry policy.
    pub fn with_policy(mut self, policy: RequestPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn send_once(&self, body: &GeminiRequest<'_>) -> Result<String, AiError> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response".to_string());
            return Err(AiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GeminiResponse = response.json().await?;
        Ok(parsed.text())
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, AiError> {
        let body = GeminiRequest::from_request(request);
        info!(
            model = %self.model,
            turns = request.turns.len(),
            json = request.response_schema.is_some(),
            "model call"
        );

        let body = &body;
        let text = self.policy.execute(move || self.send_once(body)).await?;
        debug!(model = %self.model, chars = text.len(), "model response");
        Ok(text)
    }
}

// Wire types.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

impl<'a> GeminiRequest<'a> {
    fn from_request(request: &'a GenerateRequest) -> Self {
        Self {
            contents: request.turns.iter().map(Content::from_turn).collect(),
            system_instruction: request.system_instruction.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            generation_config: request.response_schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    fn from_turn(turn: &'a Turn) -> Self {
        Self {
            role: Some(turn.role.as_str()),
            parts: vec![Part { text: &turn.text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate; empty if there are none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{BackoffStrategy, RetryPolicy};
    use mockito::{Matcher, Server};

    const PATH: &str = "/models/gemini-3-flash-preview:generateContent";

    fn client(server: &Server) -> GeminiClient {
        GeminiClient::new("test-api-key", DEFAULT_MODEL)
            .unwrap()
            .with_endpoint(server.url())
            .with_policy(RequestPolicy::new(
                Duration::from_secs(5),
                RetryPolicy::new(2).with_backoff(BackoffStrategy::None),
            ))
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(
            GeminiClient::new("  ", DEFAULT_MODEL),
            Err(AiError::MissingApiKey)
        ));
    }

    #[test]
    fn test_request_wire_format() {
        let request = GenerateRequest::conversation(vec![
            Turn::user("hi"),
            Turn::model("hello"),
            Turn::user("compare"),
        ])
        .with_system_instruction("be brief")
        .with_json_schema(serde_json::json!({"type": "OBJECT"}));
        let json = serde_json::to_value(GeminiRequest::from_request(&request)).unwrap();

        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][2]["parts"][0]["text"], "compare");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[tokio::test]
    async fn test_generate_returns_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "test-api-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "candidates": [{
                    "content": {
                        "parts": [{"text": "Hello! "}, {"text": "How can I help?"}],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }]
            }"#,
            )
            .create_async()
            .await;

        let text = client(&server)
            .generate(&GenerateRequest::prompt("hello"))
            .await
            .unwrap();

        assert_eq!(text, "Hello! How can I help?");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_text() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let text = client(&server)
            .generate(&GenerateRequest::prompt("hello"))
            .await
            .unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .with_status(503)
            .with_body("overloaded")
            .expect(3)
            .create_async()
            .await;

        let result = client(&server).generate(&GenerateRequest::prompt("hello")).await;

        assert!(matches!(result, Err(AiError::Http { status: 503, .. })));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .with_status(400)
            .with_body("API key not valid")
            .expect(1)
            .create_async()
            .await;

        let result = client(&server).generate(&GenerateRequest::prompt("hello")).await;

        assert!(matches!(result, Err(AiError::Http { status: 400, ref body }) if body.contains("not valid")));
        mock.assert_async().await;
    }
}

//! Client for an OpenAI-compatible chat completion endpoint.
//!
//! One prompt in, one block of text out. No retries and no streaming: a
//! transport failure or non-2xx status surfaces as `ApiError::Provider`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::error::ApiError;

/// Anything that turns a prompt into completion text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ApiError>;
}

/// Client for the language-model provider.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error envelope returned by OpenAI-style APIs.
#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

impl LlmClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(base_url = base_url, model = model, "LLM client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
        })
    }

    fn completions_url(&self) -> String {
        if self.base_url.ends_with("/chat/completions") {
            self.base_url.clone()
        } else {
            format!("{}/chat/completions", self.base_url)
        }
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String, ApiError> {
        let url = self.completions_url();
        let body = ChatRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(url = %url, "LLM completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "LLM request failed");
                ApiError::Provider(format!("request failed: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("provider returned {status}"));
            error!(status = %status, message = %message, "LLM provider error");
            return Err(ApiError::Provider(message));
        }

        let parsed = response.json::<ChatResponse>().await.map_err(|e| {
            error!(error = %e, "Failed to decode LLM response");
            ApiError::Provider(format!("invalid provider response: {e}"))
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        debug!(response_len = text.len(), "LLM completion received");

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(base_url: &str) -> LlmClient {
        LlmClient::new(base_url, "sk-test", "gpt-4o", 4096, 5).unwrap()
    }

    #[tokio::test]
    async fn sends_single_user_message_and_returns_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o",
                "max_tokens": 4096,
                "messages": [{"role": "user", "content": "plan Paris"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"  {\"city\":\"Paris\"}\n"}}]}"#)
            .expect(1)
            .create_async()
            .await;

        let text = client(&server.url()).complete("plan Paris").await.unwrap();
        assert_eq!(text, r#"{"city":"Paris"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_content_is_empty_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let text = client(&server.url()).complete("x").await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn non_success_status_is_provider_error_with_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#)
            .expect(1)
            .create_async()
            .await;

        let err = client(&server.url()).complete("x").await.unwrap_err();
        match err {
            ApiError::Provider(msg) => assert_eq!(msg, "Rate limit reached"),
            other => panic!("unexpected error: {other:?}"),
        }
        // No retry on failure
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn undecodable_envelope_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let err = client(&server.url()).complete("x").await.unwrap_err();
        assert!(matches!(err, ApiError::Provider(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_provider_error() {
        let err = client("http://127.0.0.1:1").complete("x").await.unwrap_err();
        assert!(matches!(err, ApiError::Provider(_)));
    }

    #[test]
    fn completions_url_is_not_duplicated() {
        assert_eq!(
            client("https://api.example.test/v1/").completions_url(),
            "https://api.example.test/v1/chat/completions"
        );
        assert_eq!(
            client("https://api.example.test/v1/chat/completions").completions_url(),
            "https://api.example.test/v1/chat/completions"
        );
    }
}

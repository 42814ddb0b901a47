// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for an OpenAI-compatible API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, transient error retry, and base64 decoding for the
//! image generation endpoint. Pointing `base_url` at a local
//! OpenAI-compatible server (Ollama, vLLM) requires no code changes.

use std::time::Duration;

use base64::Engine as _;
use memeforge_core::MemeForgeError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{
    ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, ImageGenerationRequest,
    ImageGenerationResponse,
};

/// HTTP client for OpenAI-compatible API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503, 529).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    default_model: String,
    max_retries: u32,
}

impl OpenAiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `base_url` - API base URL without a trailing slash, e.g. `https://api.openai.com/v1`
    /// * `api_key` - Bearer token; `None` sends no Authorization header
    /// * `model` - Default chat model identifier
    pub fn new(
        base_url: String,
        api_key: Option<&str>,
        model: String,
    ) -> Result<Self, MemeForgeError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            headers.insert(
                "authorization",
                HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                    MemeForgeError::Config(format!("invalid API key header value: {e}"))
                })?,
            );
        }
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| MemeForgeError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model: model,
            max_retries: 1,
        })
    }

    /// Returns the default chat model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Sends a chat completion request and returns the full response.
    ///
    /// On transient errors (429, 500, 503, 529), retries once after a
    /// 1-second delay.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, MemeForgeError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.post_with_retry(&url, request, "completion").await?;
        serde_json::from_str(&body).map_err(|e| MemeForgeError::Provider {
            message: format!("failed to parse chat completion response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Generates exactly one image and returns its decoded bytes.
    ///
    /// The request must use `response_format = "b64_json"`; URL-returning
    /// responses are rejected because the bytes are persisted directly.
    pub async fn generate_image(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<Vec<u8>, MemeForgeError> {
        let url = format!("{}/images/generations", self.base_url);
        let body = self.post_with_retry(&url, request, "image generation").await?;
        let response: ImageGenerationResponse =
            serde_json::from_str(&body).map_err(|e| MemeForgeError::Provider {
                message: format!("failed to parse image generation response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let encoded = response
            .data
            .first()
            .and_then(|img| img.b64_json.as_deref())
            .ok_or_else(|| MemeForgeError::Provider {
                message: "image generation response contained no b64_json data".into(),
                source: None,
            })?;

        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| MemeForgeError::Provider {
                message: format!("failed to decode base64 image data: {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// POST a JSON body with the shared retry discipline, returning the
    /// raw success body text.
    async fn post_with_retry<T: serde::Serialize>(
        &self,
        url: &str,
        request: &T,
        what: &str,
    ) -> Result<String, MemeForgeError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, what, "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(url)
                .json(request)
                .send()
                .await
                .map_err(|e| MemeForgeError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, what, "response received");

            if status.is_success() {
                return response.text().await.map_err(|e| MemeForgeError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(MemeForgeError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(MemeForgeError::Provider {
                message: error_msg,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| MemeForgeError::Provider {
            message: "request failed after retries".into(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new(base_url.to_string(), Some("test-api-key"), "gpt-4o-mini".into())
            .unwrap()
    }

    fn test_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            temperature: 0.2,
            max_tokens: 1024,
        }
    }

    fn chat_body(id: &str, content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    #[tokio::test]
    async fn chat_completion_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("chatcmpl-1", "Hi!")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.chat_completion(&test_request()).await.unwrap();

        assert_eq!(result.id, "chatcmpl-1");
        assert_eq!(result.choices[0].message.content, "Hi!");
    }

    #[tokio::test]
    async fn chat_completion_retries_on_429() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"type": "rate_limit_error", "message": "Rate limited"}
        });

        // First request returns 429, second returns 200.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(chat_body("chatcmpl-retry", "ok")),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.chat_completion(&test_request()).await.unwrap();
        assert_eq!(result.id, "chatcmpl-retry");
    }

    #[tokio::test]
    async fn chat_completion_fails_on_400() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"type": "invalid_request_error", "message": "Bad model"}
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat_completion(&test_request()).await.unwrap_err();
        assert!(err.to_string().contains("invalid_request_error"), "got: {err}");
    }

    #[tokio::test]
    async fn chat_completion_exhausts_retries_on_503() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"type": "overloaded_error", "message": "Service overloaded"}
        });

        // Both attempts return 503.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_json(&error_body))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat_completion(&test_request()).await.unwrap_err();
        assert!(err.to_string().contains("overloaded_error"), "got: {err}");
    }

    #[tokio::test]
    async fn client_sends_bearer_header() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("chatcmpl-h", "ok")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.chat_completion(&test_request()).await.unwrap();
    }

    #[tokio::test]
    async fn generate_image_decodes_base64() {
        let server = MockServer::start().await;

        // "PNG" bytes stand in for real image data.
        let body = serde_json::json!({"created": 1, "data": [{"b64_json": "UE5H"}]});

        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .and(body_partial_json(serde_json::json!({
                "n": 1,
                "response_format": "b64_json"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let request = ImageGenerationRequest {
            model: "dall-e-3".into(),
            prompt: "a meme".into(),
            n: 1,
            size: "1024x1024".into(),
            response_format: "b64_json".into(),
        };
        let bytes = client.generate_image(&request).await.unwrap();
        assert_eq!(bytes, b"PNG");
    }

    #[tokio::test]
    async fn generate_image_rejects_missing_data() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"created": 1, "data": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let request = ImageGenerationRequest {
            model: "dall-e-3".into(),
            prompt: "a meme".into(),
            n: 1,
            size: "1024x1024".into(),
            response_format: "b64_json".into(),
        };
        let err = client.generate_image(&request).await.unwrap_err();
        assert!(err.to_string().contains("b64_json"), "got: {err}");
    }
}

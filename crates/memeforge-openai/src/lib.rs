// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible provider adapter for MemeForge.
//!
//! Exposes [`OpenAiClient`] for direct use (image generation) and
//! implements [`CompletionProvider`] for the extraction/generation
//! pipeline.

pub mod client;
pub mod types;

pub use client::OpenAiClient;

use async_trait::async_trait;
use memeforge_core::{CompletionProvider, CompletionRequest, MemeForgeError};

use crate::types::{ChatCompletionRequest, ChatMessage};

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, MemeForgeError> {
        let api_request = ChatCompletionRequest {
            model: self.default_model().to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self.chat_completion(&api_request).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| MemeForgeError::Provider {
                message: "chat completion response contained no choices".into(),
                source: None,
            })?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn complete_returns_first_choice_text() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "{\"ok\":true}"},
                "finish_reason": "stop"
            }]
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({"temperature": 0.2})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client =
            OpenAiClient::new(server.uri(), None, "gpt-4o-mini".into()).unwrap();
        let text = client
            .complete(CompletionRequest {
                prompt: "return json".into(),
                temperature: 0.2,
                max_tokens: 512,
            })
            .await
            .unwrap();
        assert_eq!(text, "{\"ok\":true}");
    }
}

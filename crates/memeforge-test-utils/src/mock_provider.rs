// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock LLM provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with pre-configured
//! responses, enabling fast, CI-runnable tests without external API
//! calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::CompletionProvider;
use memeforge_core::types::CompletionRequest;

/// A mock LLM provider that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. The call counter lets
/// retry tests assert how many attempts were made.
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    calls: AtomicU32,
}

impl MockProvider {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: AtomicU32::new(0),
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            calls: AtomicU32::new(0),
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Pop the next response, or return the default.
    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<String, MemeForgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.next_response().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_pop_in_fifo_order() {
        let provider = MockProvider::with_responses(vec!["one".into(), "two".into()]);
        let request = CompletionRequest {
            prompt: "p".into(),
            temperature: 0.0,
            max_tokens: 16,
        };
        assert_eq!(provider.complete(request.clone()).await.unwrap(), "one");
        assert_eq!(provider.complete(request.clone()).await.unwrap(), "two");
        assert_eq!(provider.complete(request).await.unwrap(), "mock response");
        assert_eq!(provider.call_count(), 3);
    }
}

// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for LLM completions.

use async_trait::async_trait;

use crate::error::MemeForgeError;
use crate::types::CompletionRequest;

/// Adapter for LLM provider integrations.
///
/// Providers return the raw response text; structured-output parsing
/// happens at the caller, which owns the schema and the retry policy.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name used in logs ("openai", "ollama", "mock", ...).
    fn name(&self) -> &str;

    /// Sends a single-prompt completion request and returns the raw text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, MemeForgeError>;
}

// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding trait for vector generation from structured content.

use async_trait::async_trait;

use crate::error::MemeForgeError;
use crate::types::EmbeddingContent;

/// Adapter for turning content into a fixed-dimensionality float vector.
///
/// `embed` returns `Ok(None)` when the content joins to an empty text
/// blob -- an absent result, not an error. Under a fixed model version
/// the same input text must yield the same vector.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Backend name used in logs.
    fn name(&self) -> &str;

    /// Vector dimensionality produced by this backend.
    fn dimensions(&self) -> usize;

    /// Embed the joined content text, or `None` if there is nothing to embed.
    async fn embed(
        &self,
        content: &EmbeddingContent,
    ) -> Result<Option<Vec<f32>>, MemeForgeError>;
}

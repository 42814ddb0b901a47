// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic mock embedding backend.
//!
//! Produces a seeded vector from the joined content text so retrieval
//! tests get stable, repeatable embeddings without model files.

use async_trait::async_trait;

use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::EmbeddingBackend;
use memeforge_core::types::EmbeddingContent;

/// Mock embedder hashing text bytes into a fixed-dimension vector.
pub struct MockEmbedder {
    dimensions: usize,
}

impl MockEmbedder {
    /// Create a mock embedder producing vectors of the given size.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Deterministically spread the text bytes over the vector.
    fn encode(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for (i, byte) in text.bytes().enumerate() {
            vector[i % self.dimensions] += f32::from(byte) / 255.0;
        }
        vector
    }
}

#[async_trait]
impl EmbeddingBackend for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(
        &self,
        content: &EmbeddingContent,
    ) -> Result<Option<Vec<f32>>, MemeForgeError> {
        Ok(content.joined_text().map(|text| self.encode(&text)))
    }
}

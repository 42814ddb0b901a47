// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector index trait for nearest-neighbor template lookup.

use async_trait::async_trait;

use crate::error::MemeForgeError;
use crate::types::IndexMatch;

/// Read-only nearest-neighbor query interface over a managed vector index.
///
/// The index is scoped to one fixed collection at construction time.
/// Ranked order is index-reported; callers take the top match as-is.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Index name used in logs.
    fn name(&self) -> &str;

    /// Top-K nearest-neighbor query with metadata included.
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<IndexMatch>, MemeForgeError>;
}

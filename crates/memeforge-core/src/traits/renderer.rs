// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renderer trait shared by the template and generative strategies.

use async_trait::async_trait;

use crate::types::{MemeConcept, RenderedAsset};

/// Renders one meme concept into a stored image asset.
///
/// Failures never escape this seam: a failed template match, rendering
/// call, or storage write degrades to `None` ("no asset for this
/// concept"), logged at warn level by the implementation.
#[async_trait]
pub trait MemeRenderer: Send + Sync {
    /// Strategy name used in logs ("template", "generative").
    fn name(&self) -> &str;

    /// Render and persist the concept, returning the stored asset or `None`.
    async fn render(
        &self,
        business_name: &str,
        concept: &MemeConcept,
    ) -> Option<RenderedAsset>;
}

// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template retrieval: embed content, query the index, keep the top match.
//!
//! Every failure on this path -- embedding, transport, malformed index
//! response -- downgrades to "no match". Template selection may degrade;
//! it must never abort the campaign or render pipeline.

use std::sync::Arc;

use memeforge_core::traits::{EmbeddingBackend, VectorIndex};
use memeforge_core::types::{BusinessProfile, EmbeddingContent, MemeConcept, TemplateMatch};
use tracing::{debug, warn};

/// Retrieval-based template selector.
pub struct TemplateRetriever {
    embedder: Arc<dyn EmbeddingBackend>,
    index: Arc<dyn VectorIndex>,
    top_k: usize,
}

impl TemplateRetriever {
    /// Creates a new retriever issuing top-K queries (K is usually 1).
    pub fn new(
        embedder: Arc<dyn EmbeddingBackend>,
        index: Arc<dyn VectorIndex>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            top_k,
        }
    }

    /// Find the best-matching template for an already-computed vector.
    ///
    /// Takes the single highest-ranked match in index-reported order;
    /// ties are not re-broken here.
    pub async fn find_template(&self, vector: &[f32]) -> Option<TemplateMatch> {
        let matches = match self.index.query(vector, self.top_k).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!(index = self.index.name(), "template query failed: {e}");
                return None;
            }
        };

        let top = matches.into_iter().next()?;
        let name = top
            .metadata_str("name")
            .unwrap_or(top.id.as_str())
            .to_string();
        debug!(template_id = %top.id, score = top.score, "template match selected");
        Some(TemplateMatch { id: top.id, name })
    }

    /// Embed the content and find the best-matching template.
    ///
    /// Empty content (nothing to embed) is a valid "no match" outcome.
    pub async fn find_for_content(&self, content: &EmbeddingContent) -> Option<TemplateMatch> {
        let vector = match self.embedder.embed(content).await {
            Ok(Some(vector)) => vector,
            Ok(None) => {
                debug!("empty embedding content, skipping template lookup");
                return None;
            }
            Err(e) => {
                warn!(embedder = self.embedder.name(), "embedding failed: {e}");
                return None;
            }
        };
        self.find_template(&vector).await
    }

    /// Retrieve up to `top_k` candidate templates for prompt enrichment.
    ///
    /// Used by the retrieval-augmented campaign variant; failures yield
    /// an empty candidate list.
    pub async fn candidates_for_content(
        &self,
        content: &EmbeddingContent,
        top_k: usize,
    ) -> Vec<TemplateMatch> {
        let vector = match self.embedder.embed(content).await {
            Ok(Some(vector)) => vector,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(embedder = self.embedder.name(), "embedding failed: {e}");
                return Vec::new();
            }
        };

        match self.index.query(&vector, top_k).await {
            Ok(matches) => matches
                .into_iter()
                .map(|m| {
                    let name = m.metadata_str("name").unwrap_or(m.id.as_str()).to_string();
                    TemplateMatch { id: m.id, name }
                })
                .collect(),
            Err(e) => {
                warn!(index = self.index.name(), "candidate query failed: {e}");
                Vec::new()
            }
        }
    }
}

/// Embedding content for a meme concept: template name, captions, and
/// visual description, in that order.
pub fn concept_content(concept: &MemeConcept) -> EmbeddingContent {
    EmbeddingContent::new()
        .field("template_name", concept.template_name.clone())
        .field("texts", concept.texts.join(" "))
        .field("visual_description", concept.visual_description.clone())
}

/// Embedding content for a business profile, keyed on the profile's own
/// fields in declaration order.
pub fn profile_content(profile: &BusinessProfile) -> EmbeddingContent {
    EmbeddingContent::new()
        .field("name", profile.name.clone())
        .field("industry", profile.industry.clone())
        .field("core_offerings", profile.core_offerings.join(" "))
        .field("value_propositions", profile.value_propositions.join(" "))
        .field("target_audience", profile.target_audience.join(" "))
        .field("brand_tone", profile.brand_tone.clone())
}

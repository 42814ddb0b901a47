// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types for the MemeForge marketing pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Business profile extracted from website analysis.
///
/// Produced once per analysis call, immutable after creation.
/// The strict serde shape doubles as the LLM output schema: any
/// missing or unknown field is a parse failure, not a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BusinessProfile {
    /// The business name.
    pub name: String,
    /// The primary industry the business operates in.
    pub industry: String,
    /// Main products/services/solutions offered.
    pub core_offerings: Vec<String>,
    /// Key differentiators and unique values.
    pub value_propositions: Vec<String>,
    /// Primary customer segments.
    pub target_audience: Vec<String>,
    /// The business's tone/voice (professional, casual, etc.).
    pub brand_tone: String,
}

/// Content for a single marketing meme, not yet rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemeConcept {
    /// The specific meme template to use.
    pub template_name: String,
    /// Caption texts in template slot order. Slot order is
    /// template-significant: the renderer encodes each positionally.
    pub texts: Vec<String>,
    /// Relevant hashtags, without the leading `#`.
    pub hashtags: Vec<String>,
    /// Detailed visual instructions for generating the image.
    pub visual_description: String,
}

/// Transport wrapper for a generated batch of meme concepts.
///
/// This is the exact JSON object shape the campaign generator requests
/// from the LLM (`{"memes": [...]}`). Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemeCampaign {
    pub memes: Vec<MemeConcept>,
}

/// The meme template selected by nearest-neighbor retrieval.
///
/// At most one match is kept (the top-ranked neighbor). Absence is a
/// valid, non-error outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMatch {
    /// Template identifier understood by the rendering API.
    pub id: String,
    /// Human-readable template name from index metadata.
    pub name: String,
}

/// One ranked result from a vector index query.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexMatch {
    pub id: String,
    #[serde(default)]
    pub score: f32,
    /// Arbitrary metadata map; contains at least a `name` field for
    /// meme templates.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl IndexMatch {
    /// Look up a string-valued metadata field.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }
}

/// The final rendered artifact: object-store key plus resolvable URL.
///
/// Created per concept, written once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedAsset {
    /// Derived key, `{business_name}_{template_name}_{timestamp}.png`.
    pub object_key: String,
    /// Durable or presigned access URL (never a bare filesystem path in
    /// a networked deployment).
    pub url: String,
}

/// Pipeline stage names used in terminal errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PipelineStage {
    Extraction,
    Generation,
}

/// Rendering strategy, selected by static configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Template-based rendering via a memegen-style HTTP API.
    Template,
    /// Fully generative rendering via a text-to-image API.
    Generative,
}

/// A single-prompt completion request to an LLM provider.
///
/// The prompt carries its own output-schema description; the response
/// is expected to be one JSON object with no markdown fencing.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Ordered field→value content submitted for embedding.
///
/// Join order is field declaration order; empty or whitespace-only
/// values are skipped entirely.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingContent {
    fields: Vec<(String, String)>,
}

impl EmbeddingContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Declaration order is preserved.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Concatenate all non-empty field values into one text blob.
    ///
    /// Returns `None` when nothing remains after trimming, which the
    /// embedding service treats as "nothing to embed", not an error.
    pub fn joined_text(&self) -> Option<String> {
        let joined = self
            .fields
            .iter()
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() { None } else { Some(joined) }
    }
}

/// Build the object-store key for a rendered asset.
///
/// Mirrors the original naming scheme: business name, template name,
/// and a second-resolution UTC timestamp.
pub fn asset_object_key(
    business_name: &str,
    template_name: &str,
    at: chrono::DateTime<chrono::Utc>,
) -> String {
    format!(
        "{business_name}_{template_name}_{}.png",
        at.format("%Y%m%d_%H%M%S")
    )
}

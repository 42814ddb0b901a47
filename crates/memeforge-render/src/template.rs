// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template-based rendering via a memegen-style HTTP API.
//!
//! The concept is embedded and matched against the template index; the
//! winning template id plus the escaped captions form a GET path whose
//! response body is the rendered image. Any failure along the way
//! degrades to "no asset for this concept".

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::{MemeRenderer, ObjectStore};
use memeforge_core::types::{asset_object_key, MemeConcept, RenderedAsset, TemplateMatch};
use memeforge_retrieval::{concept_content, TemplateRetriever};
use tracing::{debug, info, warn};

use crate::escape::caption_path;

/// Renders memes through the public templating API.
pub struct TemplateRenderer {
    retriever: Arc<TemplateRetriever>,
    store: Arc<dyn ObjectStore>,
    client: reqwest::Client,
    base_url: String,
}

impl TemplateRenderer {
    /// Creates a new template renderer against the given API base URL.
    pub fn new(
        retriever: Arc<TemplateRetriever>,
        store: Arc<dyn ObjectStore>,
        base_url: String,
    ) -> Result<Self, MemeForgeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| MemeForgeError::Render {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            retriever,
            store,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the rendered image and persist it.
    async fn try_render(
        &self,
        business_name: &str,
        concept: &MemeConcept,
        template: &TemplateMatch,
    ) -> Result<RenderedAsset, MemeForgeError> {
        let path = caption_path(&concept.texts);
        let url = format!("{}/images/{}/{}.png", self.base_url, template.id, path);
        debug!(%url, "requesting template render");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MemeForgeError::Render {
                message: format!("templating API request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MemeForgeError::Render {
                message: format!("templating API returned {status}"),
            });
        }

        // The body is the raw image, no JSON envelope.
        let bytes = response.bytes().await.map_err(|e| MemeForgeError::Render {
            message: format!("failed to read image bytes: {e}"),
        })?;

        let object_key =
            asset_object_key(business_name, &concept.template_name, chrono::Utc::now());
        let stored_url = self
            .store
            .put(bytes.to_vec(), &object_key, "image/png")
            .await?;

        Ok(RenderedAsset {
            object_key,
            url: stored_url,
        })
    }
}

#[async_trait]
impl MemeRenderer for TemplateRenderer {
    fn name(&self) -> &str {
        "template"
    }

    async fn render(
        &self,
        business_name: &str,
        concept: &MemeConcept,
    ) -> Option<RenderedAsset> {
        let Some(template) = self
            .retriever
            .find_for_content(&concept_content(concept))
            .await
        else {
            warn!(
                template_name = %concept.template_name,
                "no suitable template found, skipping render"
            );
            return None;
        };

        match self.try_render(business_name, concept, &template).await {
            Ok(asset) => {
                info!(object_key = %asset.object_key, "template render stored");
                Some(asset)
            }
            Err(e) => {
                warn!(template_id = %template.id, "template render failed: {e}");
                None
            }
        }
    }
}

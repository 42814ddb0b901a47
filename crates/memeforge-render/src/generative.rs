// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fully generative rendering via a text-to-image API.
//!
//! Composes a natural-language prompt from the concept and requests one
//! square base64-encoded image. Failures degrade to an absent asset.

use std::sync::Arc;

use async_trait::async_trait;
use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::{MemeRenderer, ObjectStore};
use memeforge_core::types::{asset_object_key, MemeConcept, RenderedAsset};
use memeforge_openai::types::ImageGenerationRequest;
use memeforge_openai::OpenAiClient;
use tracing::{debug, info, warn};

/// Renders memes through a text-to-image generation endpoint.
pub struct GenerativeRenderer {
    client: Arc<OpenAiClient>,
    store: Arc<dyn ObjectStore>,
    model: String,
    size: String,
}

impl GenerativeRenderer {
    /// Creates a new generative renderer.
    pub fn new(
        client: Arc<OpenAiClient>,
        store: Arc<dyn ObjectStore>,
        model: String,
        size: String,
    ) -> Self {
        Self {
            client,
            store,
            model,
            size,
        }
    }

    /// Generate, decode, and persist the image.
    async fn try_render(
        &self,
        business_name: &str,
        concept: &MemeConcept,
    ) -> Result<RenderedAsset, MemeForgeError> {
        let prompt = compose_image_prompt(business_name, concept);
        debug!(model = %self.model, "requesting generative render");

        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt,
            n: 1,
            size: self.size.clone(),
            response_format: "b64_json".to_string(),
        };
        let bytes = self.client.generate_image(&request).await?;

        let object_key =
            asset_object_key(business_name, &concept.template_name, chrono::Utc::now());
        let stored_url = self.store.put(bytes, &object_key, "image/png").await?;

        Ok(RenderedAsset {
            object_key,
            url: stored_url,
        })
    }
}

/// Build the text-to-image prompt from the business name and concept.
fn compose_image_prompt(business_name: &str, concept: &MemeConcept) -> String {
    let texts = concept
        .texts
        .iter()
        .enumerate()
        .map(|(i, text)| format!("- Text {}: {text}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = format!(
        "Create a high-quality marketing meme for {business_name}.\n\n\
         Meme template to use: {}\n\
         Visual description: {}\n\n\
         Text to include:\n{texts}\n",
        concept.template_name, concept.visual_description
    );

    if !concept.hashtags.is_empty() {
        prompt.push_str(&format!("\nHashtags: {}\n", concept.hashtags.join(" ")));
    }

    prompt
}

#[async_trait]
impl MemeRenderer for GenerativeRenderer {
    fn name(&self) -> &str {
        "generative"
    }

    async fn render(
        &self,
        business_name: &str,
        concept: &MemeConcept,
    ) -> Option<RenderedAsset> {
        match self.try_render(business_name, concept).await {
            Ok(asset) => {
                info!(object_key = %asset.object_key, "generative render stored");
                Some(asset)
            }
            Err(e) => {
                warn!(template_name = %concept.template_name, "generative render failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memeforge_test_utils::MemoryObjectStore;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn concept() -> MemeConcept {
        MemeConcept {
            template_name: "distracted boyfriend".into(),
            texts: vec!["manual payroll".into(), "instant payouts".into()],
            hashtags: vec!["payroll".into(), "fintech".into()],
            visual_description: "a person looking away from spreadsheets".into(),
        }
    }

    #[test]
    fn prompt_numbers_texts_and_appends_hashtags() {
        let prompt = compose_image_prompt("Acme Payroll", &concept());
        assert!(prompt.contains("Acme Payroll"));
        assert!(prompt.contains("distracted boyfriend"));
        assert!(prompt.contains("- Text 1: manual payroll"));
        assert!(prompt.contains("- Text 2: instant payouts"));
        assert!(prompt.contains("Hashtags: payroll fintech"));
    }

    #[test]
    fn prompt_omits_hashtag_block_when_empty() {
        let mut c = concept();
        c.hashtags.clear();
        let prompt = compose_image_prompt("Acme Payroll", &c);
        assert!(!prompt.contains("Hashtags:"));
    }

    #[tokio::test]
    async fn renders_one_square_base64_image() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .and(body_partial_json(serde_json::json!({
                "model": "dall-e-3",
                "n": 1,
                "size": "1024x1024",
                "response_format": "b64_json"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"created": 1, "data": [{"b64_json": "UE5H"}]}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            Arc::new(OpenAiClient::new(server.uri(), None, "gpt-4o-mini".into()).unwrap());
        let store = Arc::new(MemoryObjectStore::new("memes"));
        let renderer = GenerativeRenderer::new(
            client,
            store.clone(),
            "dall-e-3".into(),
            "1024x1024".into(),
        );

        let asset = renderer.render("Acme Payroll", &concept()).await.unwrap();
        assert!(asset
            .object_key
            .starts_with("Acme Payroll_distracted boyfriend_"));
        assert_eq!(store.get(&asset.object_key).await.unwrap(), b"PNG");
    }

    #[tokio::test]
    async fn api_failure_degrades_to_absent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                serde_json::json!({"error": {"message": "bad prompt", "type": "invalid_request_error"}}),
            ))
            .mount(&server)
            .await;

        let client =
            Arc::new(OpenAiClient::new(server.uri(), None, "gpt-4o-mini".into()).unwrap());
        let renderer = GenerativeRenderer::new(
            client,
            Arc::new(MemoryObjectStore::new("memes")),
            "dall-e-3".into(),
            "1024x1024".into(),
        );

        assert!(renderer.render("Acme Payroll", &concept()).await.is_none());
    }
}

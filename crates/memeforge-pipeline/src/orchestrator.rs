// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline orchestration: extract → generate → render per concept.
//!
//! Sequencing is strict: extraction must fully succeed before
//! generation starts. Renders are independent per concept and run
//! concurrently; the returned asset sequence preserves concept order
//! and a failed render yields an absent entry at its position, never an
//! error.

use std::sync::Arc;

use futures::future::join_all;
use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::MemeRenderer;
use memeforge_core::types::{BusinessProfile, MemeConcept, RenderedAsset};
use tracing::info;

use crate::analyzer::BusinessAnalyzer;
use crate::campaign::CampaignGenerator;

/// Result of one full pipeline run.
#[derive(Debug)]
pub struct CampaignOutcome {
    /// The extracted business profile.
    pub profile: BusinessProfile,
    /// Generated concepts, in LLM-returned order.
    pub memes: Vec<MemeConcept>,
    /// One entry per concept, same order; `None` marks a degraded render.
    pub assets: Vec<Option<RenderedAsset>>,
}

/// End-to-end pipeline: URL in, ordered asset sequence out.
pub struct MemePipeline {
    analyzer: BusinessAnalyzer,
    generator: CampaignGenerator,
    renderer: Arc<dyn MemeRenderer>,
}

impl MemePipeline {
    /// Assemble the pipeline from its three stages.
    pub fn new(
        analyzer: BusinessAnalyzer,
        generator: CampaignGenerator,
        renderer: Arc<dyn MemeRenderer>,
    ) -> Self {
        Self {
            analyzer,
            generator,
            renderer,
        }
    }

    /// Run the full pipeline for `url`, producing `num_memes` concepts.
    ///
    /// Only extraction/generation exhaustion propagates; per-concept
    /// render failures degrade to `None` in `assets`.
    pub async fn run(
        &self,
        url: &str,
        num_memes: usize,
    ) -> Result<CampaignOutcome, MemeForgeError> {
        let profile = self.analyzer.analyze(url).await?;
        let memes = self.generator.generate(&profile, num_memes).await?;

        let renders = memes
            .iter()
            .map(|concept| self.renderer.render(&profile.name, concept));
        let assets = join_all(renders).await;

        let rendered = assets.iter().filter(|a| a.is_some()).count();
        info!(
            business = %profile.name,
            concepts = memes.len(),
            rendered,
            "campaign pipeline completed"
        );

        Ok(CampaignOutcome {
            profile,
            memes,
            assets,
        })
    }

    /// Stage access: extract a profile only.
    pub async fn analyze(&self, url: &str) -> Result<BusinessProfile, MemeForgeError> {
        self.analyzer.analyze(url).await
    }

    /// Stage access: generate concepts for an existing profile.
    pub async fn generate(
        &self,
        profile: &BusinessProfile,
        num_memes: usize,
    ) -> Result<Vec<MemeConcept>, MemeForgeError> {
        self.generator.generate(profile, num_memes).await
    }

    /// Stage access: render one concept.
    pub async fn render_concept(
        &self,
        business_name: &str,
        concept: &MemeConcept,
    ) -> Option<RenderedAsset> {
        self.renderer.render(business_name, concept).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webpage::PageFetcher;
    use memeforge_config::model::{CampaignConfig, ExtractionConfig, LlmConfig};
    use memeforge_test_utils::{MockProvider, MockRenderer};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PROFILE_JSON: &str = r#"{
        "name": "Acme Payroll",
        "industry": "fintech",
        "core_offerings": ["payroll"],
        "value_propositions": ["fast payouts"],
        "target_audience": ["HR managers"],
        "brand_tone": "professional"
    }"#;

    const CAMPAIGN_JSON: &str = r#"{"memes": [
        {"template_name": "drake", "texts": ["a", "b"], "hashtags": ["x"], "visual_description": "d1"},
        {"template_name": "fine", "texts": ["c"], "hashtags": ["y"], "visual_description": "d2"}
    ]}"#;

    async fn page_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>Acme Payroll website</body></html>"),
            )
            .mount(&server)
            .await;
        server
    }

    fn pipeline(provider: Arc<MockProvider>, renderer: MockRenderer) -> MemePipeline {
        let llm = LlmConfig::default();
        MemePipeline::new(
            BusinessAnalyzer::new(
                provider.clone(),
                PageFetcher::new().unwrap(),
                ExtractionConfig::default(),
                &llm,
            ),
            CampaignGenerator::new(provider, None, CampaignConfig::default(), &llm),
            Arc::new(renderer),
        )
    }

    #[tokio::test]
    async fn run_produces_one_asset_per_concept_in_order() {
        let page = page_server().await;
        let provider = Arc::new(MockProvider::with_responses(vec![
            PROFILE_JSON.into(),
            CAMPAIGN_JSON.into(),
        ]));
        let outcome = pipeline(provider, MockRenderer::succeeding())
            .run(&page.uri(), 2)
            .await
            .unwrap();

        assert_eq!(outcome.profile.name, "Acme Payroll");
        assert_eq!(outcome.memes.len(), 2);
        assert_eq!(outcome.assets.len(), 2);
        let keys: Vec<_> = outcome
            .assets
            .iter()
            .map(|a| a.as_ref().unwrap().object_key.clone())
            .collect();
        assert!(keys[0].contains("drake"));
        assert!(keys[1].contains("fine"));
    }

    #[tokio::test]
    async fn failed_render_yields_absent_at_its_position() {
        let page = page_server().await;
        let provider = Arc::new(MockProvider::with_responses(vec![
            PROFILE_JSON.into(),
            CAMPAIGN_JSON.into(),
        ]));
        let outcome = pipeline(provider, MockRenderer::with_outcomes(vec![false, true]))
            .run(&page.uri(), 2)
            .await
            .unwrap();

        assert_eq!(outcome.assets.len(), 2);
        assert!(outcome.assets[0].is_none());
        let asset = outcome.assets[1].as_ref().unwrap();
        assert!(asset.object_key.contains("fine"));
    }

    #[tokio::test]
    async fn extraction_failure_stops_before_generation() {
        let page = page_server().await;
        let provider = Arc::new(MockProvider::with_responses(vec![
            "bad".to_string();
            3
        ]));
        let err = pipeline(provider.clone(), MockRenderer::succeeding())
            .run(&page.uri(), 2)
            .await
            .unwrap_err();
        assert!(matches!(err, MemeForgeError::ExhaustedRetries { .. }));
        // All three calls were extraction attempts; generation never ran.
        assert_eq!(provider.call_count(), 3);
    }
}

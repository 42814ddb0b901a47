// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meme campaign generation from a business profile.
//!
//! Serializes the profile into bulleted prompt blocks, optionally
//! enriches the prompt with retrieved template candidates, and drives a
//! bounded retry loop around the LLM call with strict parsing of the
//! `{"memes": [...]}` response.

use std::sync::Arc;

use memeforge_config::model::{CampaignConfig, LlmConfig};
use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::CompletionProvider;
use memeforge_core::types::{
    BusinessProfile, CompletionRequest, MemeCampaign, MemeConcept, PipelineStage, TemplateMatch,
};
use memeforge_retrieval::{profile_content, TemplateRetriever};
use tracing::{info, warn};

/// Generation prompt. Placeholders are substituted per call; the
/// rendered prompt is retried verbatim on failure.
const CAMPAIGN_PROMPT: &str = r#"You are a viral marketing expert who creates memes that actually get shared and saved.
You understand internet culture, current trends, and what makes content relatable to real people.

BUSINESS PROFILE:
Name: {name}
Industry: {industry}

Core Offerings:
{core_offerings}

Value Propositions:
{value_propositions}

Target Audience:
{target_audience}

Brand Tone: {brand_tone}
{template_candidates}
TASK:
Create {num_memes} VIRAL-WORTHY meme concept(s) that people will actually want to share, save, and relate to.

CREATIVITY REQUIREMENTS:
1. Use recognizable meme templates that fit the message
2. Connect business value to genuine pain points people experience daily
3. Make it actually funny or relatable, not corporate-cringe
4. Use language and references the target audience naturally uses
5. Address real problems with humor, not generic business speak
6. Make people think "this is so me" or "I need to send this to my friend"

RELATABILITY CHECKLIST:
- Does this sound like something a real person would say?
- Would someone screenshot this and send it in a group chat?
- Does it acknowledge a real struggle or universal experience?
- Does it use meme formats people actually recognize and share?

FORMAT:
Return a JSON object with a single key "memes" that maps to a JSON array of meme concepts.
Each meme concept has exactly these fields:
{
  "template_name": "<the specific meme template to use>",
  "texts": ["<text components placed on the meme, ordered as required by the template>"],
  "hashtags": ["<relevant hashtags without the # symbol>"],
  "visual_description": "<detailed visual instructions for generating the image>"
}

Return ONLY the JSON object."#;

/// Generates creative meme marketing campaigns.
pub struct CampaignGenerator {
    provider: Arc<dyn CompletionProvider>,
    retriever: Option<Arc<TemplateRetriever>>,
    config: CampaignConfig,
    temperature: f32,
    max_tokens: u32,
}

impl CampaignGenerator {
    /// Creates a new generator. Generation uses the higher temperature
    /// configured for creative output.
    ///
    /// Passing a retriever enables the retrieval-augmented variant:
    /// template candidates matched against the profile's own content
    /// are offered to the model in the prompt.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        retriever: Option<Arc<TemplateRetriever>>,
        config: CampaignConfig,
        llm: &LlmConfig,
    ) -> Self {
        Self {
            provider,
            retriever,
            config,
            temperature: llm.generation_temperature,
            max_tokens: llm.max_tokens,
        }
    }

    /// Generate `num_memes` meme concepts for the profile.
    ///
    /// Retries immediately with the identical prompt up to
    /// `max_attempts`; the terminal error names the business and the
    /// attempt count.
    pub async fn generate(
        &self,
        profile: &BusinessProfile,
        num_memes: usize,
    ) -> Result<Vec<MemeConcept>, MemeForgeError> {
        let candidates = match &self.retriever {
            Some(retriever) => {
                retriever
                    .candidates_for_content(&profile_content(profile), self.config.hint_top_k)
                    .await
            }
            None => Vec::new(),
        };

        let request = CompletionRequest {
            prompt: build_campaign_prompt(profile, num_memes, &candidates),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        for attempt in 1..=self.config.max_attempts {
            info!(
                business = %profile.name,
                num_memes,
                provider = self.provider.name(),
                attempt,
                "generating meme concepts"
            );
            match self.attempt(&request).await {
                Ok(memes) => {
                    info!(
                        business = %profile.name,
                        generated = memes.len(),
                        provider = self.provider.name(),
                        "meme concepts generated"
                    );
                    return Ok(memes);
                }
                Err(e) => {
                    warn!(
                        business = %profile.name,
                        provider = self.provider.name(),
                        attempt,
                        max_attempts = self.config.max_attempts,
                        "generation attempt failed: {e}"
                    );
                }
            }
        }

        Err(MemeForgeError::ExhaustedRetries {
            stage: PipelineStage::Generation,
            subject: profile.name.clone(),
            attempts: self.config.max_attempts,
        })
    }

    async fn attempt(
        &self,
        request: &CompletionRequest,
    ) -> Result<Vec<MemeConcept>, MemeForgeError> {
        let response = self.provider.complete(request.clone()).await?;
        parse_campaign(&response).map(|campaign| campaign.memes)
    }
}

/// Render the generation prompt from the profile and candidate list.
fn build_campaign_prompt(
    profile: &BusinessProfile,
    num_memes: usize,
    candidates: &[TemplateMatch],
) -> String {
    let candidate_block = if candidates.is_empty() {
        String::new()
    } else {
        let names = bullet_list(
            &candidates
                .iter()
                .map(|c| c.name.clone())
                .collect::<Vec<_>>(),
        );
        format!(
            "\nTEMPLATE CANDIDATES:\nThese templates from the template library match the business; prefer one when it fits:\n{names}\n"
        )
    };

    CAMPAIGN_PROMPT
        .replace("{name}", &profile.name)
        .replace("{industry}", &profile.industry)
        .replace("{core_offerings}", &bullet_list(&profile.core_offerings))
        .replace(
            "{value_propositions}",
            &bullet_list(&profile.value_propositions),
        )
        .replace("{target_audience}", &bullet_list(&profile.target_audience))
        .replace("{brand_tone}", &profile.brand_tone)
        .replace("{template_candidates}", &candidate_block)
        .replace("{num_memes}", &num_memes.to_string())
}

/// One bullet per item, original order preserved.
fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strict parse of the LLM response against the campaign schema.
fn parse_campaign(response: &str) -> Result<MemeCampaign, MemeForgeError> {
    serde_json::from_str(response.trim()).map_err(|e| MemeForgeError::SchemaParse {
        stage: PipelineStage::Generation,
        message: e.to_string(),
    })
}

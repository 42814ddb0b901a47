// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Business profile extraction from website content.
//!
//! Fetches the page once, then drives a bounded retry loop around the
//! LLM call: fetch/parse failures and schema violations all count
//! against the same attempt budget, and the fetched content is reused
//! verbatim across retries.

use std::sync::Arc;

use memeforge_config::model::{ExtractionConfig, LlmConfig};
use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::CompletionProvider;
use memeforge_core::types::{BusinessProfile, CompletionRequest, PipelineStage};
use tracing::{info, warn};

use crate::webpage::PageFetcher;

/// Extraction prompt. `{content}` is replaced with the truncated page text.
const EXTRACTION_PROMPT: &str = r#"You are an expert business analyst and marketing professional.

Analyze this website content and extract structured information about the business:

WEBSITE CONTENT:
{content}

INSTRUCTIONS:
Extract key business information and return it as a structured profile.

1. Look for the business name, core offerings, and unique value propositions
2. Identify their target audience/customer segments
3. Determine the industry they operate in
4. Pay attention to their brand tone/voice

FORMAT:
Return a single JSON object with exactly these fields:
{
  "name": "<the business name>",
  "industry": "<the primary industry the business operates in>",
  "core_offerings": ["<main products/services/solutions offered>"],
  "value_propositions": ["<key differentiators and unique values>"],
  "target_audience": ["<primary customer segments>"],
  "brand_tone": "<the business's tone/voice (professional, casual, etc.)>"
}

Return ONLY the JSON object with no additional explanation or markdown formatting."#;

/// Analyzes business websites to extract key information.
pub struct BusinessAnalyzer {
    provider: Arc<dyn CompletionProvider>,
    fetcher: PageFetcher,
    config: ExtractionConfig,
    temperature: f32,
    max_tokens: u32,
}

impl BusinessAnalyzer {
    /// Creates a new analyzer. Extraction uses the lower temperature
    /// configured for factual output.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        fetcher: PageFetcher,
        config: ExtractionConfig,
        llm: &LlmConfig,
    ) -> Self {
        Self {
            provider,
            fetcher,
            config,
            temperature: llm.extraction_temperature,
            max_tokens: llm.max_tokens,
        }
    }

    /// Analyze the website at `url`, fetching its content first.
    pub async fn analyze(&self, url: &str) -> Result<BusinessProfile, MemeForgeError> {
        self.analyze_with_content(url, None).await
    }

    /// Analyze with optionally pre-supplied raw content.
    ///
    /// The page is fetched at most once: once content is available it
    /// is retried verbatim, and a supplied `content` means no fetch at
    /// all. After `max_attempts` failures the terminal error names the
    /// URL and the attempt count.
    pub async fn analyze_with_content(
        &self,
        url: &str,
        content: Option<String>,
    ) -> Result<BusinessProfile, MemeForgeError> {
        let mut content = content;

        for attempt in 1..=self.config.max_attempts {
            match self.attempt(url, &mut content).await {
                Ok(profile) => {
                    info!(
                        business = %profile.name,
                        provider = self.provider.name(),
                        "business profile extracted"
                    );
                    return Ok(profile);
                }
                Err(e) => {
                    warn!(
                        url,
                        attempt,
                        max_attempts = self.config.max_attempts,
                        "extraction attempt failed: {e}"
                    );
                }
            }
        }

        Err(MemeForgeError::ExhaustedRetries {
            stage: PipelineStage::Extraction,
            subject: url.to_string(),
            attempts: self.config.max_attempts,
        })
    }

    /// One attempt: fetch if needed, prompt, strict-parse.
    async fn attempt(
        &self,
        url: &str,
        content: &mut Option<String>,
    ) -> Result<BusinessProfile, MemeForgeError> {
        if content.is_none() {
            let fetched = self
                .fetcher
                .fetch_text(url, self.config.character_limit)
                .await?;
            *content = Some(fetched);
        }
        let text = content.as_deref().unwrap_or_default();

        let request = CompletionRequest {
            prompt: EXTRACTION_PROMPT.replace("{content}", text),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let response = self.provider.complete(request).await?;
        parse_profile(&response)
    }
}

/// Strict parse of the LLM response against the profile schema.
///
/// Markdown fencing, commentary, missing fields, and unknown fields are
/// all parse failures; the retry loop owns recovery.
fn parse_profile(response: &str) -> Result<BusinessProfile, MemeForgeError> {
    serde_json::from_str(response.trim()).map_err(|e| MemeForgeError::SchemaParse {
        stage: PipelineStage::Extraction,
        message: e.to_string(),
    })
}

// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handlers for the gateway routes.
//!
//! Error mapping: retry exhaustion in extraction/generation surfaces as
//! 502 (the upstream LLM kept failing), a request timeout as 504, and
//! anything else as 500. Partial results -- some assets absent -- are a
//! 200, not an error.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use memeforge_core::types::{BusinessProfile, MemeCampaign, MemeConcept};
use memeforge_core::MemeForgeError;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::server::GatewayState;

/// Error payload returned to clients.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    error: String,
}

impl ApiError {
    fn timeout() -> Self {
        Self {
            status: StatusCode::GATEWAY_TIMEOUT,
            error: "request timed out".to_string(),
        }
    }
}

impl From<MemeForgeError> for ApiError {
    fn from(err: MemeForgeError) -> Self {
        let status = match &err {
            MemeForgeError::ExhaustedRetries { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("request failed: {err}");
        Self {
            status,
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

/// `POST /v1/campaigns` request body.
#[derive(Debug, Deserialize)]
pub struct CampaignRequest {
    pub url: String,
    #[serde(default = "default_num_memes")]
    pub num_memes: usize,
}

fn default_num_memes() -> usize {
    1
}

/// `POST /v1/campaigns` response body.
#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    pub business_name: String,
    pub memes: Vec<MemeConcept>,
    /// One entry per concept, concept order preserved; `null` marks a
    /// concept whose render degraded.
    pub assets: Vec<Option<String>>,
}

/// Run the full pipeline for a website URL.
pub async fn post_campaigns(
    State(state): State<GatewayState>,
    Json(request): Json<CampaignRequest>,
) -> Result<Json<CampaignResponse>, ApiError> {
    let outcome = tokio::time::timeout(
        state.request_timeout,
        state.pipeline.run(&request.url, request.num_memes),
    )
    .await
    .map_err(|_| ApiError::timeout())??;

    Ok(Json(CampaignResponse {
        business_name: outcome.profile.name.clone(),
        memes: outcome.memes,
        assets: outcome
            .assets
            .iter()
            .map(|asset| asset.as_ref().map(|a| a.url.clone()))
            .collect(),
    }))
}

/// `POST /v1/analyze` request body.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// Extract a business profile from a website.
pub async fn post_analyze(
    State(state): State<GatewayState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<BusinessProfile>, ApiError> {
    let profile = tokio::time::timeout(state.request_timeout, state.pipeline.analyze(&request.url))
        .await
        .map_err(|_| ApiError::timeout())??;
    Ok(Json(profile))
}

/// `POST /v1/memes` request body.
#[derive(Debug, Deserialize)]
pub struct MemesRequest {
    pub profile: BusinessProfile,
    #[serde(default = "default_num_memes")]
    pub num_memes: usize,
}

/// Generate meme concepts for an existing profile.
pub async fn post_memes(
    State(state): State<GatewayState>,
    Json(request): Json<MemesRequest>,
) -> Result<Json<MemeCampaign>, ApiError> {
    let memes = tokio::time::timeout(
        state.request_timeout,
        state.pipeline.generate(&request.profile, request.num_memes),
    )
    .await
    .map_err(|_| ApiError::timeout())??;
    Ok(Json(MemeCampaign { memes }))
}

/// `POST /v1/render` request body.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub business_name: String,
    pub concept: MemeConcept,
}

/// `POST /v1/render` response body.
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    /// Access URL of the stored asset; `null` when the render degraded.
    pub asset_url: Option<String>,
    pub object_key: Option<String>,
}

/// Render one meme concept.
pub async fn post_render(
    State(state): State<GatewayState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, ApiError> {
    let asset = tokio::time::timeout(
        state.request_timeout,
        state
            .pipeline
            .render_concept(&request.business_name, &request.concept),
    )
    .await
    .map_err(|_| ApiError::timeout())?;

    Ok(Json(match asset {
        Some(asset) => RenderResponse {
            asset_url: Some(asset.url),
            object_key: Some(asset.object_key),
        },
        None => RenderResponse {
            asset_url: None,
            object_key: None,
        },
    }))
}

/// `GET /health` response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
}

/// Public health endpoint.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use memeforge_config::model::{CampaignConfig, ExtractionConfig, LlmConfig};
    use memeforge_pipeline::{BusinessAnalyzer, CampaignGenerator, MemePipeline, PageFetcher};
    use memeforge_test_utils::{MockProvider, MockRenderer};
    use std::sync::Arc;
    use std::time::Duration;
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

    fn state(provider: Arc<MockProvider>, renderer: MockRenderer) -> GatewayState {
        let llm = LlmConfig::default();
        let pipeline = MemePipeline::new(
            BusinessAnalyzer::new(
                provider.clone(),
                PageFetcher::new().unwrap(),
                ExtractionConfig::default(),
                &llm,
            ),
            CampaignGenerator::new(provider, None, CampaignConfig::default(), &llm),
            Arc::new(renderer),
        );
        GatewayState::new(Arc::new(pipeline), Duration::from_secs(30))
    }

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

    #[tokio::test]
    async fn campaigns_endpoint_returns_ordered_assets() {
        let page = page_server().await;
        let provider = Arc::new(MockProvider::with_responses(vec![
            PROFILE_JSON.into(),
            CAMPAIGN_JSON.into(),
        ]));
        let state = state(provider, MockRenderer::with_outcomes(vec![true, false]));

        let response = post_campaigns(
            State(state),
            Json(CampaignRequest {
                url: page.uri(),
                num_memes: 2,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.business_name, "Acme Payroll");
        assert_eq!(response.memes.len(), 2);
        assert_eq!(response.assets.len(), 2);
        assert!(response.assets[0].is_some());
        assert!(response.assets[1].is_none());
    }

    #[tokio::test]
    async fn exhaustion_maps_to_bad_gateway() {
        let page = page_server().await;
        let provider = Arc::new(MockProvider::with_responses(vec![
            "garbage".to_string();
            3
        ]));
        let state = state(provider, MockRenderer::succeeding());

        let err = post_campaigns(
            State(state),
            Json(CampaignRequest {
                url: page.uri(),
                num_memes: 1,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn memes_endpoint_skips_extraction() {
        let provider = Arc::new(MockProvider::with_responses(vec![CAMPAIGN_JSON.into()]));
        let state = state(provider.clone(), MockRenderer::succeeding());
        let profile: BusinessProfile = serde_json::from_str(PROFILE_JSON).unwrap();

        let response = post_memes(
            State(state),
            Json(MemesRequest {
                profile,
                num_memes: 2,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.memes.len(), 2);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn render_endpoint_reports_absent_asset_as_null() {
        let provider = Arc::new(MockProvider::new());
        let state = state(provider, MockRenderer::with_outcomes(vec![false]));
        let concept: MemeConcept =
            serde_json::from_str(r#"{"template_name": "drake", "texts": [], "hashtags": [], "visual_description": "d"}"#)
                .unwrap();

        let response = post_render(
            State(state),
            Json(RenderRequest {
                business_name: "Acme Payroll".into(),
                concept,
            }),
        )
        .await
        .unwrap();
        assert!(response.asset_url.is_none());
        assert!(response.object_key.is_none());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let state = state(Arc::new(MockProvider::new()), MockRenderer::succeeding());
        let response = get_health(State(state)).await;
        assert_eq!(response.status, "ok");
    }
}

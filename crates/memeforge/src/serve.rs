// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `memeforge serve` and `memeforge analyze` command implementations.
//!
//! Wires the dependency graph once at startup: every shared client
//! (LLM, embedder, index, store) is constructed here and passed by
//! `Arc` into the components that need it. No component reaches for a
//! global; concurrent requests share only these read-only handles.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use memeforge_config::model::{MemeForgeConfig, StorageBackendKind};
use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::{CompletionProvider, EmbeddingBackend, ObjectStore, VectorIndex};
use memeforge_gateway::{GatewayState, ServerConfig};
use memeforge_openai::OpenAiClient;
use memeforge_pipeline::{BusinessAnalyzer, CampaignGenerator, MemePipeline, PageFetcher};
use memeforge_render::build_renderer;
use memeforge_retrieval::{OnnxEmbedder, TemplateRetriever, VectorIndexClient};
use memeforge_storage::{FsObjectStore, HttpObjectStore};
use tracing::info;

/// Initialize the tracing subscriber from the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    // try_init: tests may install their own subscriber first.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Construct the pipeline and the object store from configuration.
///
/// Returns the store separately so the caller can provision the bucket
/// before serving traffic.
pub fn build_pipeline(
    config: &MemeForgeConfig,
) -> Result<(Arc<MemePipeline>, Arc<dyn ObjectStore>), MemeForgeError> {
    let openai = Arc::new(OpenAiClient::new(
        config.llm.base_url.clone(),
        config.llm.api_key.as_deref(),
        config.llm.model.clone(),
    )?);
    let provider: Arc<dyn CompletionProvider> = openai.clone();

    let embedder: Arc<dyn EmbeddingBackend> =
        Arc::new(OnnxEmbedder::new(Path::new(&config.embedding.model_path))?);
    let index: Arc<dyn VectorIndex> = Arc::new(VectorIndexClient::new(
        config.index.base_url.clone(),
        config.index.api_key.as_deref(),
        config.index.collection.clone(),
    )?);
    let retriever = Arc::new(TemplateRetriever::new(
        embedder,
        index,
        config.index.top_k,
    ));

    let store: Arc<dyn ObjectStore> = match config.storage.backend {
        StorageBackendKind::Fs => Arc::new(FsObjectStore::new(
            config.storage.root_dir.clone(),
            config.storage.bucket.clone(),
            config.storage.public_base_url.clone(),
        )),
        StorageBackendKind::Http => Arc::new(HttpObjectStore::new(
            config.storage.base_url.clone(),
            config.storage.bucket.clone(),
            config.storage.access_token.as_deref(),
            config.storage.public_base_url.clone(),
        )?),
    };

    let renderer = build_renderer(&config.renderer, retriever.clone(), openai, store.clone())?;

    let analyzer = BusinessAnalyzer::new(
        provider.clone(),
        PageFetcher::new()?,
        config.extraction.clone(),
        &config.llm,
    );
    let generator_retriever = config.campaign.template_hints.then(|| retriever.clone());
    let generator = CampaignGenerator::new(
        provider,
        generator_retriever,
        config.campaign.clone(),
        &config.llm,
    );

    let pipeline = MemePipeline::new(analyzer, generator, renderer);
    Ok((Arc::new(pipeline), store))
}

/// Runs the `memeforge serve` command.
///
/// Provisions the asset bucket, then serves the gateway until the
/// process is terminated.
pub async fn run_serve(config: MemeForgeConfig) -> Result<(), MemeForgeError> {
    init_tracing(&config.service.log_level);

    let (pipeline, store) = build_pipeline(&config)?;
    store.ensure_bucket().await?;
    info!(
        service = %config.service.name,
        store = store.name(),
        "pipeline constructed"
    );

    let state = GatewayState::new(
        pipeline,
        Duration::from_secs(config.server.request_timeout_secs),
    );
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    memeforge_gateway::start_server(&server_config, state).await
}

/// Runs the `memeforge analyze <url>` command.
///
/// Builds only the extraction stage -- no embedding model or index is
/// needed -- and prints the profile as JSON.
pub async fn run_analyze(config: MemeForgeConfig, url: &str) -> Result<(), MemeForgeError> {
    init_tracing(&config.service.log_level);

    let openai = Arc::new(OpenAiClient::new(
        config.llm.base_url.clone(),
        config.llm.api_key.as_deref(),
        config.llm.model.clone(),
    )?);
    let analyzer = BusinessAnalyzer::new(
        openai,
        PageFetcher::new()?,
        config.extraction.clone(),
        &config.llm,
    );

    let profile = analyzer.analyze(url).await?;
    let json = serde_json::to_string_pretty(&profile)
        .map_err(|e| MemeForgeError::Internal(format!("failed to serialize profile: {e}")))?;
    println!("{json}");
    Ok(())
}

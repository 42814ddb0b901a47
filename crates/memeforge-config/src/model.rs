// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the MemeForge pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use memeforge_core::types::RendererKind;
use serde::{Deserialize, Serialize};

/// Top-level MemeForge configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to
/// sensible values; only credentials have no defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemeForgeConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM provider settings (OpenAI-compatible API).
    #[serde(default)]
    pub llm: LlmConfig,

    /// Local embedding model settings.
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Managed vector index settings.
    #[serde(default)]
    pub index: IndexConfig,

    /// Business profile extraction settings.
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Meme campaign generation settings.
    #[serde(default)]
    pub campaign: CampaignConfig,

    /// Image renderer settings.
    #[serde(default)]
    pub renderer: RendererConfig,

    /// Object storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "memeforge".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout applied around pipeline execution, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    300
}

/// LLM provider configuration for an OpenAI-compatible API.
///
/// Points at api.openai.com by default; an Ollama or other compatible
/// endpoint works by overriding `base_url` and `model`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// API base URL, without the trailing endpoint path.
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// API key. `None` sends no Authorization header (local endpoints).
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat model identifier.
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for factual profile extraction.
    #[serde(default = "default_extraction_temperature")]
    pub extraction_temperature: f32,

    /// Temperature for creative campaign generation.
    #[serde(default = "default_generation_temperature")]
    pub generation_temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: None,
            model: default_llm_model(),
            max_tokens: default_max_tokens(),
            extraction_temperature: default_extraction_temperature(),
            generation_temperature: default_generation_temperature(),
        }
    }
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_extraction_temperature() -> f32 {
    0.2
}

fn default_generation_temperature() -> f32 {
    1.2
}

/// Local ONNX embedding model configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingConfig {
    /// Path to the all-MiniLM-L6-v2 ONNX model file. The tokenizer is
    /// expected as `tokenizer.json` next to it.
    #[serde(default = "default_embedding_model_path")]
    pub model_path: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_path: default_embedding_model_path(),
        }
    }
}

fn default_embedding_model_path() -> String {
    "models/all-MiniLM-L6-v2/model.onnx".to_string()
}

/// Managed vector index configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Index service base URL.
    #[serde(default = "default_index_base_url")]
    pub base_url: String,

    /// API key. `None` sends no Api-Key header.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Collection holding the meme template vectors.
    #[serde(default = "default_index_collection")]
    pub collection: String,

    /// Number of neighbors requested per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base_url: default_index_base_url(),
            api_key: None,
            collection: default_index_collection(),
            top_k: default_top_k(),
        }
    }
}

fn default_index_base_url() -> String {
    "http://localhost:6333".to_string()
}

fn default_index_collection() -> String {
    "meme-templates".to_string()
}

fn default_top_k() -> usize {
    1
}

/// Business profile extraction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionConfig {
    /// Maximum characters of webpage text submitted to the LLM.
    #[serde(default = "default_character_limit")]
    pub character_limit: usize,

    /// Attempt bound for the extraction loop.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            character_limit: default_character_limit(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_character_limit() -> usize {
    6000
}

fn default_max_attempts() -> u32 {
    3
}

/// Meme campaign generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignConfig {
    /// Attempt bound for the generation loop.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Enrich the generation prompt with retrieved template candidates.
    #[serde(default)]
    pub template_hints: bool,

    /// Number of template candidates retrieved for prompt enrichment.
    #[serde(default = "default_hint_top_k")]
    pub hint_top_k: usize,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            template_hints: false,
            hint_top_k: default_hint_top_k(),
        }
    }
}

fn default_hint_top_k() -> usize {
    5
}

/// Image renderer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RendererConfig {
    /// Rendering strategy: "template" or "generative".
    #[serde(default = "default_strategy")]
    pub strategy: RendererKind,

    /// Base URL of the memegen-style templating API.
    #[serde(default = "default_memegen_base_url")]
    pub memegen_base_url: String,

    /// Text-to-image model identifier for the generative strategy.
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Requested image size (square).
    #[serde(default = "default_image_size")]
    pub image_size: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            memegen_base_url: default_memegen_base_url(),
            image_model: default_image_model(),
            image_size: default_image_size(),
        }
    }
}

fn default_strategy() -> RendererKind {
    RendererKind::Template
}

fn default_memegen_base_url() -> String {
    "https://api.memegen.link".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

/// Object storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// Local filesystem store for standalone/offline mode.
    Fs,
    /// S3-compatible HTTP object storage gateway.
    Http,
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Which backend to construct.
    #[serde(default = "default_storage_backend")]
    pub backend: StorageBackendKind,

    /// Bucket holding rendered assets; created if absent before first use.
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Root directory for the fs backend.
    #[serde(default = "default_root_dir")]
    pub root_dir: String,

    /// Endpoint for the http backend.
    #[serde(default = "default_storage_base_url")]
    pub base_url: String,

    /// Public URL prefix for returned asset URLs. Falls back to
    /// `base_url` for the http backend.
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Bearer token for the http backend. `None` sends no header.
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            bucket: default_bucket(),
            root_dir: default_root_dir(),
            base_url: default_storage_base_url(),
            public_base_url: None,
            access_token: None,
        }
    }
}

fn default_storage_backend() -> StorageBackendKind {
    StorageBackendKind::Fs
}

fn default_bucket() -> String {
    "memes".to_string()
}

fn default_root_dir() -> String {
    "data/objects".to_string()
}

fn default_storage_base_url() -> String {
    "http://localhost:9000".to_string()
}

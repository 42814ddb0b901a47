// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image rendering strategies for MemeForge.
//!
//! Two interchangeable strategies behind the [`MemeRenderer`] seam:
//! template-based rendering through a memegen-style API, and fully
//! generative rendering through a text-to-image API. Selection is a
//! static configuration choice made once at startup.

pub mod escape;
pub mod generative;
pub mod template;

pub use escape::{caption_path, escape_caption};
pub use generative::GenerativeRenderer;
pub use template::TemplateRenderer;

use std::sync::Arc;

use memeforge_config::model::RendererConfig;
use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::{MemeRenderer, ObjectStore};
use memeforge_core::types::RendererKind;
use memeforge_openai::OpenAiClient;
use memeforge_retrieval::TemplateRetriever;
use tracing::info;

/// Construct the configured rendering strategy.
///
/// Strategy selection is static: the tagged [`RendererKind`] decides
/// which implementation is built, once, at process start.
pub fn build_renderer(
    config: &RendererConfig,
    retriever: Arc<TemplateRetriever>,
    openai: Arc<OpenAiClient>,
    store: Arc<dyn ObjectStore>,
) -> Result<Arc<dyn MemeRenderer>, MemeForgeError> {
    let renderer: Arc<dyn MemeRenderer> = match config.strategy {
        RendererKind::Template => Arc::new(TemplateRenderer::new(
            retriever,
            store,
            config.memegen_base_url.clone(),
        )?),
        RendererKind::Generative => Arc::new(GenerativeRenderer::new(
            openai,
            store,
            config.image_model.clone(),
            config.image_size.clone(),
        )),
    };
    info!(strategy = renderer.name(), "renderer constructed");
    Ok(renderer)
}

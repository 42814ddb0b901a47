// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the MemeForge pipeline.

use thiserror::Error;

use crate::types::PipelineStage;

/// The primary error type used across all MemeForge components.
#[derive(Debug, Error)]
pub enum MemeForgeError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Webpage fetch errors (page unreachable, body unreadable, text extraction failure).
    #[error("fetch error for {url}: {message}")]
    Fetch {
        url: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// LLM output failed strict structured validation.
    #[error("schema parse error in {stage}: {message}")]
    SchemaParse {
        stage: PipelineStage,
        message: String,
    },

    /// LLM provider errors (API failure, auth, malformed response envelope).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Vector index query failure. Always downgraded to "no match" by the
    /// retriever; this variant never crosses the pipeline boundary.
    #[error("retrieval error: {message}")]
    Retrieval { message: String },

    /// Rendering API failure. Downgraded to an absent asset by the renderer.
    #[error("render error: {message}")]
    Render { message: String },

    /// Object storage errors (bucket provisioning, write failure).
    #[error("storage error: {message}")]
    Storage {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Terminal error after a retry bound was hit on extraction or generation.
    #[error("{stage} failed for {subject} after {attempts} attempts")]
    ExhaustedRetries {
        stage: PipelineStage,
        subject: String,
        attempts: u32,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

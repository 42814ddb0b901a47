// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the MemeForge marketing pipeline.
//!
//! Provides the foundational trait definitions, error types, and domain
//! types used throughout the MemeForge workspace. Concrete adapters
//! (LLM provider, embedder, vector index, object store, renderers) live
//! in sibling crates and implement the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MemeForgeError;
pub use types::{
    BusinessProfile, CompletionRequest, EmbeddingContent, IndexMatch, MemeCampaign,
    MemeConcept, PipelineStage, RenderedAsset, RendererKind, TemplateMatch,
};

pub use traits::{
    CompletionProvider, EmbeddingBackend, MemeRenderer, ObjectStore, VectorIndex,
};

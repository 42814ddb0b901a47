// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding service and template retrieval for MemeForge.
//!
//! The leaf dependencies of the pipeline: a local ONNX embedder turning
//! structured content into fixed-length vectors, the HTTP client for the
//! managed vector index, and the [`TemplateRetriever`] composing both
//! into "best template or none".

pub mod embedder;
pub mod index;
pub mod retriever;

pub use embedder::{OnnxEmbedder, EMBEDDING_DIM};
pub use index::VectorIndexClient;
pub use retriever::{concept_content, profile_content, TemplateRetriever};

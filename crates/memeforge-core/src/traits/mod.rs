// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits for the MemeForge pipeline.
//!
//! Each external collaborator (LLM provider, embedding model, vector
//! index, object store, renderer) sits behind one of these seams.
//! Concrete clients are constructed once at process start and passed
//! by shared handle into each component.

pub mod embedding;
pub mod index;
pub mod provider;
pub mod renderer;
pub mod store;

pub use embedding::EmbeddingBackend;
pub use index::VectorIndex;
pub use provider::CompletionProvider;
pub use renderer::MemeRenderer;
pub use store::ObjectStore;

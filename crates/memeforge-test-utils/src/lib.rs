// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock adapters for deterministic MemeForge testing.
//!
//! Provides CI-runnable stand-ins for every external collaborator:
//! LLM provider, embedding backend, vector index, and object store.

pub mod mock_embedder;
pub mod mock_index;
pub mod mock_provider;
pub mod mock_renderer;
pub mod mock_store;

pub use mock_embedder::MockEmbedder;
pub use mock_index::MockIndex;
pub use mock_provider::MockProvider;
pub use mock_renderer::MockRenderer;
pub use mock_store::MemoryObjectStore;

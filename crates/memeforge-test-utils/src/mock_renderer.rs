// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock renderer producing scripted per-concept outcomes.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use memeforge_core::traits::MemeRenderer;
use memeforge_core::types::{MemeConcept, RenderedAsset};

/// Renderer popping scripted outcomes from a FIFO queue.
///
/// `true` yields a stored asset derived from the concept, `false`
/// yields an absent asset. When the queue is empty every render
/// succeeds.
pub struct MockRenderer {
    outcomes: Arc<Mutex<VecDeque<bool>>>,
}

impl MockRenderer {
    /// A renderer where every render succeeds.
    pub fn succeeding() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// A renderer following the given success/failure script.
    pub fn with_outcomes(outcomes: Vec<bool>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
        }
    }
}

#[async_trait]
impl MemeRenderer for MockRenderer {
    fn name(&self) -> &str {
        "mock-renderer"
    }

    async fn render(
        &self,
        business_name: &str,
        concept: &MemeConcept,
    ) -> Option<RenderedAsset> {
        let ok = self.outcomes.lock().await.pop_front().unwrap_or(true);
        if !ok {
            return None;
        }
        let object_key = format!("{business_name}_{}.png", concept.template_name);
        Some(RenderedAsset {
            url: format!("memory://memes/{object_key}"),
            object_key,
        })
    }
}

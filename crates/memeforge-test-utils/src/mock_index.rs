// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock vector index with a static ranked match list.

use async_trait::async_trait;

use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::VectorIndex;
use memeforge_core::types::IndexMatch;

/// Mock index returning pre-configured matches, truncated to `top_k`.
pub struct MockIndex {
    matches: Vec<IndexMatch>,
    fail: bool,
}

impl MockIndex {
    /// An index holding the given `(id, name, score)` matches, ranked
    /// in the order provided.
    pub fn with_matches(matches: Vec<(&str, &str, f32)>) -> Self {
        let matches = matches
            .into_iter()
            .map(|(id, name, score)| {
                let mut metadata = serde_json::Map::new();
                metadata.insert("name".to_string(), serde_json::Value::String(name.into()));
                IndexMatch {
                    id: id.to_string(),
                    score,
                    metadata,
                }
            })
            .collect();
        Self {
            matches,
            fail: false,
        }
    }

    /// An index with no entries: every query returns an empty list.
    pub fn empty() -> Self {
        Self {
            matches: Vec::new(),
            fail: false,
        }
    }

    /// An index whose every query fails with a retrieval error.
    pub fn failing() -> Self {
        Self {
            matches: Vec::new(),
            fail: true,
        }
    }

    /// An index returning one match without a `name` metadata field.
    pub fn with_unnamed_match(id: &str) -> Self {
        Self {
            matches: vec![IndexMatch {
                id: id.to_string(),
                score: 0.5,
                metadata: serde_json::Map::new(),
            }],
            fail: false,
        }
    }
}

#[async_trait]
impl VectorIndex for MockIndex {
    fn name(&self) -> &str {
        "mock-index"
    }

    async fn query(
        &self,
        _vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<IndexMatch>, MemeForgeError> {
        if self.fail {
            return Err(MemeForgeError::Retrieval {
                message: "mock index failure".to_string(),
            });
        }
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }
}

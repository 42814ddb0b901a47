// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a managed nearest-neighbor vector index.
//!
//! The index is treated as a black box: one collection, one query
//! endpoint, ranked matches with metadata. Only read queries are issued.

use std::time::Duration;

use async_trait::async_trait;
use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::VectorIndex;
use memeforge_core::types::IndexMatch;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Query request body sent to the index service.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

/// Query response envelope returned by the index service.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<IndexMatch>,
}

/// HTTP client for the vector index, scoped to one collection.
#[derive(Debug, Clone)]
pub struct VectorIndexClient {
    client: reqwest::Client,
    base_url: String,
    collection: String,
}

impl VectorIndexClient {
    /// Creates a new index client.
    ///
    /// # Arguments
    /// * `base_url` - index service endpoint, without a trailing slash
    /// * `api_key` - `Api-Key` header value; `None` sends no header
    /// * `collection` - collection holding the template vectors
    pub fn new(
        base_url: String,
        api_key: Option<&str>,
        collection: String,
    ) -> Result<Self, MemeForgeError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            headers.insert(
                "api-key",
                HeaderValue::from_str(key).map_err(|e| {
                    MemeForgeError::Config(format!("invalid index API key header value: {e}"))
                })?,
            );
        }
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MemeForgeError::Retrieval {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection,
        })
    }

    /// The collection this client queries.
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl VectorIndex for VectorIndexClient {
    fn name(&self) -> &str {
        "vector-index"
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<IndexMatch>, MemeForgeError> {
        let url = format!("{}/collections/{}/query", self.base_url, self.collection);
        let body = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| MemeForgeError::Retrieval {
                message: format!("index query failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MemeForgeError::Retrieval {
                message: format!("index returned {status}: {body}"),
            });
        }

        let parsed: QueryResponse =
            response.json().await.map_err(|e| MemeForgeError::Retrieval {
                message: format!("failed to parse index response: {e}"),
            })?;

        debug!(
            collection = %self.collection,
            matches = parsed.matches.len(),
            "index query completed"
        );
        Ok(parsed.matches)
    }
}

// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! S3-compatible HTTP object storage gateway client.
//!
//! The gateway is a black-box boundary: `PUT /{bucket}` provisions the
//! bucket (409 means it already exists), `PUT /{bucket}/{object}` writes
//! an object, and assets are served from a public base URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, info};

use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::ObjectStore;

use crate::encode_object_name;

/// HTTP-backed object store.
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    public_base_url: String,
}

impl HttpObjectStore {
    /// Creates a store against the given gateway endpoint.
    ///
    /// # Arguments
    /// * `base_url` - gateway endpoint, without a trailing slash
    /// * `bucket` - bucket name, provisioned via [`ObjectStore::ensure_bucket`]
    /// * `access_token` - bearer token; `None` sends no Authorization header
    /// * `public_base_url` - URL prefix for returned asset URLs; falls
    ///   back to `base_url`
    pub fn new(
        base_url: String,
        bucket: String,
        access_token: Option<&str>,
        public_base_url: Option<String>,
    ) -> Result<Self, MemeForgeError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = access_token {
            headers.insert(
                "authorization",
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                    MemeForgeError::Config(format!("invalid storage token header value: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| MemeForgeError::Storage {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let public_base_url = public_base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| base_url.clone());

        Ok(Self {
            client,
            base_url,
            bucket,
            public_base_url,
        })
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    fn name(&self) -> &str {
        "http-store"
    }

    async fn ensure_bucket(&self) -> Result<(), MemeForgeError> {
        let url = format!("{}/{}", self.base_url, self.bucket);
        let response = self
            .client
            .put(&url)
            .send()
            .await
            .map_err(|e| MemeForgeError::Storage {
                message: format!("bucket provisioning request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        // 409: the bucket already exists, which is the steady state.
        if status.is_success() || status.as_u16() == 409 {
            info!(bucket = %self.bucket, "bucket ready");
            return Ok(());
        }

        Err(MemeForgeError::Storage {
            message: format!("bucket provisioning returned {status}"),
            source: None,
        })
    }

    async fn put(
        &self,
        bytes: Vec<u8>,
        object_name: &str,
        content_type: &str,
    ) -> Result<String, MemeForgeError> {
        let encoded = encode_object_name(object_name);
        let url = format!("{}/{}/{encoded}", self.base_url, self.bucket);

        let response = self
            .client
            .put(&url)
            .header("content-type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| MemeForgeError::Storage {
                message: format!("object write request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MemeForgeError::Storage {
                message: format!("object write returned {status}"),
                source: None,
            });
        }

        debug!(object = object_name, "object stored");
        Ok(format!("{}/{}/{encoded}", self.public_base_url, self.bucket))
    }
}

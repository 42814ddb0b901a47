// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory object store for pipeline tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::ObjectStore;

/// Object store keeping every `put` in a map, keyed by object name.
pub struct MemoryObjectStore {
    bucket: String,
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryObjectStore {
    /// Create an empty store for the given bucket name.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Names of all stored objects, in no particular order.
    pub async fn object_names(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }

    /// Bytes stored under `object_name`, if any.
    pub async fn get(&self, object_name: &str) -> Option<Vec<u8>> {
        self.objects.lock().await.get(object_name).cloned()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn name(&self) -> &str {
        "memory-store"
    }

    async fn ensure_bucket(&self) -> Result<(), MemeForgeError> {
        Ok(())
    }

    async fn put(
        &self,
        bytes: Vec<u8>,
        object_name: &str,
        _content_type: &str,
    ) -> Result<String, MemeForgeError> {
        self.objects
            .lock()
            .await
            .insert(object_name.to_string(), bytes);
        Ok(format!("memory://{}/{}", self.bucket, object_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_returns_memory_url_and_keeps_bytes() {
        let store = MemoryObjectStore::new("memes");
        let url = store
            .put(b"PNG".to_vec(), "acme_drake_1.png", "image/png")
            .await
            .unwrap();
        assert_eq!(url, "memory://memes/acme_drake_1.png");
        assert_eq!(store.get("acme_drake_1.png").await.unwrap(), b"PNG");
    }
}

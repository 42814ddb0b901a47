// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local filesystem object store for standalone/offline mode.
//!
//! Objects land under `{root}/{bucket}/{object}`. When a public base URL
//! is configured (e.g. a static file server fronting the directory) the
//! returned URLs are network-resolvable; otherwise `file://` URLs are
//! returned, which is acceptable only for a standalone deployment.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::ObjectStore;

use crate::encode_object_name;

/// Filesystem-backed object store.
pub struct FsObjectStore {
    root: PathBuf,
    bucket: String,
    public_base_url: Option<String>,
}

impl FsObjectStore {
    /// Creates a store rooted at `root` with one bucket subdirectory.
    pub fn new(
        root: impl Into<PathBuf>,
        bucket: impl Into<String>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.into(),
            public_base_url: public_base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    fn bucket_dir(&self) -> PathBuf {
        self.root.join(&self.bucket)
    }

    /// Object names are opaque keys, not paths: separators are folded
    /// so every object stays directly inside the bucket directory.
    fn sanitize(object_name: &str) -> String {
        object_name.replace(['/', '\\'], "_")
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    fn name(&self) -> &str {
        "fs-store"
    }

    async fn ensure_bucket(&self) -> Result<(), MemeForgeError> {
        tokio::fs::create_dir_all(self.bucket_dir())
            .await
            .map_err(|e| MemeForgeError::Storage {
                message: format!(
                    "failed to create bucket directory {}",
                    self.bucket_dir().display()
                ),
                source: Some(Box::new(e)),
            })
    }

    async fn put(
        &self,
        bytes: Vec<u8>,
        object_name: &str,
        _content_type: &str,
    ) -> Result<String, MemeForgeError> {
        let file_name = Self::sanitize(object_name);
        let path = self.bucket_dir().join(&file_name);

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| MemeForgeError::Storage {
                message: format!("failed to write {}", path.display()),
                source: Some(Box::new(e)),
            })?;
        debug!(path = %path.display(), size = bytes.len(), "object written");

        match &self.public_base_url {
            Some(base) => Ok(format!(
                "{base}/{}/{}",
                self.bucket,
                encode_object_name(&file_name)
            )),
            None => Ok(format!("file://{}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_writes_bytes_under_bucket_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path(), "memes", None);
        store.ensure_bucket().await.unwrap();

        let url = store
            .put(b"PNG".to_vec(), "Acme_drake_20260806_120000.png", "image/png")
            .await
            .unwrap();

        assert!(url.starts_with("file://"));
        let written = dir.path().join("memes/Acme_drake_20260806_120000.png");
        assert_eq!(std::fs::read(written).unwrap(), b"PNG");
    }

    #[tokio::test]
    async fn public_base_url_yields_http_urls() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(
            dir.path(),
            "memes",
            Some("https://assets.example.com/".to_string()),
        );
        store.ensure_bucket().await.unwrap();

        let url = store
            .put(b"PNG".to_vec(), "Acme Payroll_drake_1.png", "image/png")
            .await
            .unwrap();
        assert_eq!(
            url,
            "https://assets.example.com/memes/Acme%20Payroll_drake_1.png"
        );
    }

    #[tokio::test]
    async fn path_separators_in_object_names_are_folded() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path(), "memes", None);
        store.ensure_bucket().await.unwrap();

        store
            .put(b"X".to_vec(), "a/b_1.png", "image/png")
            .await
            .unwrap();
        assert!(dir.path().join("memes/a_b_1.png").exists());
    }

    #[tokio::test]
    async fn ensure_bucket_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path(), "memes", None);
        store.ensure_bucket().await.unwrap();
        store.ensure_bucket().await.unwrap();
        assert!(dir.path().join("memes").is_dir());
    }
}

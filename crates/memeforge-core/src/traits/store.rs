// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object storage trait for rendered asset persistence.

use async_trait::async_trait;

use crate::error::MemeForgeError;

/// Adapter for object storage backends.
///
/// Assets are written once under a derived object name and never
/// mutated. `put` returns an accessible URL, not a local path, for any
/// networked backend.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store name used in logs.
    fn name(&self) -> &str;

    /// Provision the configured bucket if it does not exist yet.
    ///
    /// Called once before first use; idempotent.
    async fn ensure_bucket(&self) -> Result<(), MemeForgeError>;

    /// Write the bytes under `object_name` and return an access URL.
    async fn put(
        &self,
        bytes: Vec<u8>,
        object_name: &str,
        content_type: &str,
    ) -> Result<String, MemeForgeError>;
}

// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./memeforge.toml` > `~/.config/memeforge/memeforge.toml`
//! > `/etc/memeforge/memeforge.toml` with environment variable overrides
//! via `MEMEFORGE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::MemeForgeConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/memeforge/memeforge.toml` (system-wide)
/// 3. `~/.config/memeforge/memeforge.toml` (user XDG config)
/// 4. `./memeforge.toml` (local directory)
/// 5. `MEMEFORGE_*` environment variables
pub fn load_config() -> Result<MemeForgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemeForgeConfig::default()))
        .merge(Toml::file("/etc/memeforge/memeforge.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("memeforge/memeforge.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("memeforge.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<MemeForgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemeForgeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MemeForgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemeForgeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `MEMEFORGE_LLM_API_KEY` must map to
/// `llm.api_key`, not `llm.api.key`.
fn env_provider() -> Env {
    Env::prefixed("MEMEFORGE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: MEMEFORGE_LLM_API_KEY -> "llm_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("server_", "server.", 1)
            .replacen("llm_", "llm.", 1)
            .replacen("embedding_", "embedding.", 1)
            .replacen("index_", "index.", 1)
            .replacen("extraction_", "extraction.", 1)
            .replacen("campaign_", "campaign.", 1)
            .replacen("renderer_", "renderer.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}

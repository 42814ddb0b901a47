// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-zero retry bounds, and
//! backend-specific required fields.

use crate::diagnostic::ConfigError;
use crate::model::{MemeForgeConfig, StorageBackendKind};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &MemeForgeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "server.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.extraction.character_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "extraction.character_limit must be at least 1".to_string(),
        });
    }

    if config.extraction.max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "extraction.max_attempts must be at least 1".to_string(),
        });
    }

    if config.campaign.max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "campaign.max_attempts must be at least 1".to_string(),
        });
    }

    if config.campaign.hint_top_k == 0 {
        errors.push(ConfigError::Validation {
            message: "campaign.hint_top_k must be at least 1".to_string(),
        });
    }

    if config.index.top_k == 0 {
        errors.push(ConfigError::Validation {
            message: "index.top_k must be at least 1".to_string(),
        });
    }

    if config.index.collection.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "index.collection must not be empty".to_string(),
        });
    }

    if config.storage.bucket.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.bucket must not be empty".to_string(),
        });
    }

    match config.storage.backend {
        StorageBackendKind::Fs => {
            if config.storage.root_dir.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: "storage.root_dir must not be empty for the fs backend"
                        .to_string(),
                });
            }
        }
        StorageBackendKind::Http => {
            if config.storage.base_url.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: "storage.base_url must not be empty for the http backend"
                        .to_string(),
                });
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

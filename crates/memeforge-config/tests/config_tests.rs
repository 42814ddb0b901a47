// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the MemeForge configuration system.

use memeforge_config::diagnostic::{suggest_key, ConfigError};
use memeforge_config::model::StorageBackendKind;
use memeforge_config::{load_and_validate_str, load_config_from_str};
use memeforge_core::types::RendererKind;

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[service]
name = "memeforge-staging"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 9090
request_timeout_secs = 60

[llm]
base_url = "http://localhost:11434/v1"
api_key = "sk-test-123"
model = "llama3.2"
extraction_temperature = 0.1
generation_temperature = 1.0

[index]
base_url = "https://index.example.com"
api_key = "idx-key"
collection = "meme-templates"
top_k = 2

[renderer]
strategy = "generative"
image_model = "dall-e-3"
image_size = "1024x1024"

[storage]
backend = "http"
bucket = "campaign-assets"
base_url = "http://minio:9000"
public_base_url = "https://assets.example.com"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.service.name, "memeforge-staging");
    assert_eq!(config.service.log_level, "debug");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.llm.base_url, "http://localhost:11434/v1");
    assert_eq!(config.llm.api_key.as_deref(), Some("sk-test-123"));
    assert_eq!(config.llm.model, "llama3.2");
    assert_eq!(config.index.top_k, 2);
    assert_eq!(config.renderer.strategy, RendererKind::Generative);
    assert_eq!(config.storage.backend, StorageBackendKind::Http);
    assert_eq!(config.storage.bucket, "campaign-assets");
    assert_eq!(
        config.storage.public_base_url.as_deref(),
        Some("https://assets.example.com")
    );
}

/// Unknown field in a section produces an error.
#[test]
fn unknown_field_in_renderer_produces_error() {
    let toml = r#"
[renderer]
stratgy = "template"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("stratgy"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.service.name, "memeforge");
    assert_eq!(config.extraction.character_limit, 6000);
    assert_eq!(config.extraction.max_attempts, 3);
    assert_eq!(config.index.collection, "meme-templates");
    assert_eq!(config.renderer.strategy, RendererKind::Template);
    assert_eq!(config.storage.backend, StorageBackendKind::Fs);
    assert!(config.llm.api_key.is_none());
}

/// An invalid renderer strategy string is rejected at deserialization.
#[test]
fn invalid_strategy_is_rejected() {
    let toml = r#"
[renderer]
strategy = "handdrawn"
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// load_and_validate_str surfaces semantic validation errors.
#[test]
fn validation_errors_surface_through_load_and_validate() {
    let toml = r#"
[extraction]
max_attempts = 0
"#;
    let errors = load_and_validate_str(toml).expect_err("zero attempts must be rejected");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { .. })));
}

/// Typo suggestions cross the whole load path.
#[test]
fn typo_in_key_gets_a_suggestion() {
    let errors = load_and_validate_str("[llm]\nmodle = \"x\"\n").expect_err("typo must fail");
    let found = errors.iter().any(|e| match e {
        ConfigError::UnknownKey { suggestion, .. } => suggestion.as_deref() == Some("model"),
        _ => false,
    });
    assert!(found, "expected a `model` suggestion, got: {errors:?}");
}

#[test]
fn suggest_key_is_reexported_and_works() {
    assert_eq!(
        suggest_key("colection", &["collection", "top_k"]),
        Some("collection".to_string())
    );
}

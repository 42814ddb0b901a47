// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ONNX embedding backend for local inference using all-MiniLM-L6-v2.
//!
//! Produces 384-dimensional embeddings on CPU with zero external API
//! calls. Content fields are joined into one text blob before encoding;
//! embedding the same blob under the same model file always yields the
//! same vector.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::TensorRef;

use memeforge_core::error::MemeForgeError;
use memeforge_core::traits::EmbeddingBackend;
use memeforge_core::types::EmbeddingContent;

/// Embedding dimensions for all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

/// ONNX-based embedding backend using all-MiniLM-L6-v2.
///
/// Loads the quantized ONNX model and tokenizer from disk. Inference
/// runs on CPU with a single thread.
pub struct OnnxEmbedder {
    /// ONNX Runtime session (not Send, wrapped in Mutex for safety).
    session: Mutex<Session>,
    /// HuggingFace tokenizer.
    tokenizer: tokenizers::Tokenizer,
}

// Safety: Session is accessed through Mutex which provides synchronization.
// The tokenizer is thread-safe for encoding operations.
unsafe impl Send for OnnxEmbedder {}
unsafe impl Sync for OnnxEmbedder {}

impl OnnxEmbedder {
    /// Creates a new ONNX embedder from model files on disk.
    ///
    /// Expects `tokenizer.json` in the same directory as the model file.
    pub fn new(model_path: &Path) -> Result<Self, MemeForgeError> {
        let model_dir = model_path
            .parent()
            .ok_or_else(|| MemeForgeError::Internal("invalid model path".to_string()))?;

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            MemeForgeError::Internal(format!(
                "failed to load tokenizer from {}: {e}",
                tokenizer_path.display()
            ))
        })?;

        let session = Session::builder()
            .map_err(|e| {
                MemeForgeError::Internal(format!("failed to create ONNX session builder: {e}"))
            })?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| {
                MemeForgeError::Internal(format!("failed to set optimization level: {e}"))
            })?
            .with_intra_threads(1)
            .map_err(|e| MemeForgeError::Internal(format!("failed to set thread count: {e}")))?
            .commit_from_file(model_path)
            .map_err(|e| {
                MemeForgeError::Internal(format!(
                    "failed to load ONNX model from {}: {e}",
                    model_path.display()
                ))
            })?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }

    /// Embed a single text string, returning a 384-dim f32 vector.
    pub fn embed_text(&self, text: &str) -> Result<Vec<f32>, MemeForgeError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| MemeForgeError::Internal(format!("tokenization failed: {e}")))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> =
            encoding.get_type_ids().iter().map(|&t| t as i64).collect();

        let seq_len = input_ids.len();

        let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
            .map_err(|e| MemeForgeError::Internal(format!("bad input_ids tensor shape: {e}")))?;
        let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask.clone())
            .map_err(|e| {
                MemeForgeError::Internal(format!("bad attention_mask tensor shape: {e}"))
            })?;
        let token_type_ids_array = Array2::from_shape_vec((1, seq_len), token_type_ids)
            .map_err(|e| {
                MemeForgeError::Internal(format!("bad token_type_ids tensor shape: {e}"))
            })?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| MemeForgeError::Internal(format!("failed to lock ONNX session: {e}")))?;

        let input_ids_tensor = TensorRef::from_array_view(&input_ids_array)
            .map_err(|e| MemeForgeError::Internal(format!("input_ids TensorRef: {e}")))?;
        let attention_mask_tensor = TensorRef::from_array_view(&attention_mask_array)
            .map_err(|e| MemeForgeError::Internal(format!("attention_mask TensorRef: {e}")))?;
        let token_type_ids_tensor = TensorRef::from_array_view(&token_type_ids_array)
            .map_err(|e| MemeForgeError::Internal(format!("token_type_ids TensorRef: {e}")))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor
            ])
            .map_err(|e| MemeForgeError::Internal(format!("ONNX inference failed: {e}")))?;

        // Output shape is [1, seq_len, 384].
        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| MemeForgeError::Internal(format!("failed to extract output: {e}")))?;

        let hidden_size = shape[shape.len() - 1] as usize;
        let pooled = masked_mean_pool(data, &attention_mask, seq_len, hidden_size);

        Ok(l2_normalize(&pooled))
    }
}

/// Apply attention-masked mean pooling over token embeddings.
fn masked_mean_pool(
    embeddings: &[f32],
    attention_mask: &[i64],
    seq_len: usize,
    hidden_size: usize,
) -> Vec<f32> {
    let mut sum = vec![0.0f32; hidden_size];
    let mut count = 0.0f32;

    for i in 0..seq_len {
        if attention_mask[i] > 0 {
            for j in 0..hidden_size {
                sum[j] += embeddings[i * hidden_size + j];
            }
            count += 1.0;
        }
    }

    if count > 0.0 {
        for val in &mut sum {
            *val /= count;
        }
    }

    sum
}

/// L2-normalize a vector.
fn l2_normalize(vec: &[f32]) -> Vec<f32> {
    let norm: f32 = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        vec.iter().map(|v| v / norm).collect()
    } else {
        vec.to_vec()
    }
}

#[async_trait]
impl EmbeddingBackend for OnnxEmbedder {
    fn name(&self) -> &str {
        "onnx-minilm"
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIM
    }

    async fn embed(
        &self,
        content: &EmbeddingContent,
    ) -> Result<Option<Vec<f32>>, MemeForgeError> {
        let Some(text) = content.joined_text() else {
            return Ok(None);
        };
        self.embed_text(&text).map(Some)
    }
}

//! Text encoders
//!
//! The engine consumes an encoder as an opaque `text -> Vec<f32>` function of
//! fixed output length. Two implementations: a local feature-hashing encoder
//! and an HTTP client for hosted embedding models.

pub mod client;
pub mod hashing;

use crate::config::{EmbeddingConfig, EmbeddingProvider};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use client::EmbeddingClient;
pub use hashing::HashingEncoder;

/// Embed errors
#[derive(Error, Debug)]
pub enum EmbedError {
    /// API error from the embedding provider
    #[error("Embedding API error: {0}")]
    ApiError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Provider returned a vector of the wrong length
    #[error("Embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type EmbedResult<T> = Result<T, EmbedError>;

/// Deterministic text -> dense vector encoder
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Encode one text. Output length is always `dimensions()`.
    async fn encode(&self, text: &str) -> EmbedResult<Vec<f32>>;

    /// Output dimension D
    fn dimensions(&self) -> usize;
}

/// Check an encoder output against the declared dimension
pub fn check_dimensions(expected: usize, embedding: &[f32]) -> EmbedResult<()> {
    if embedding.len() != expected {
        return Err(EmbedError::DimensionMismatch {
            expected,
            got: embedding.len(),
        });
    }
    Ok(())
}

/// Build the encoder selected by configuration
pub fn encoder_from_config(config: &EmbeddingConfig) -> EmbedResult<Arc<dyn Encoder>> {
    match config.provider {
        EmbeddingProvider::Hashing => Ok(Arc::new(HashingEncoder::new(config.dimensions))),
        _ => Ok(Arc::new(EmbeddingClient::new(config)?)),
    }
}

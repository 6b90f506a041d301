//! Process configuration
//!
//! Loaded once at startup from an optional YAML file; every section and field
//! falls back to its default. Values are fixed for the process lifetime.

use docgraph_algorithms::PageRankConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Upper bound on the feature dimension; the transform holds 2^N amplitudes.
pub const MAX_FEATURE_DIM: usize = 16;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Similarity engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length N of primary and secondary feature vectors
    pub feature_dim: usize,
    /// Edges are created for scores strictly above this
    pub edge_threshold: f64,
    /// Ego-network radius used by analysis
    pub ego_radius: usize,
    /// Result count when a search request omits `top_k`
    pub default_top_k: usize,
    /// PageRank parameters used by analysis
    pub pagerank: PageRankConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            feature_dim: 4,
            edge_threshold: crate::graph::store::DEFAULT_EDGE_THRESHOLD,
            ego_radius: crate::algo::analyzer::DEFAULT_EGO_RADIUS,
            default_top_k: 5,
            pagerank: PageRankConfig::default(),
        }
    }
}

/// Embedding providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Local deterministic feature hashing
    Hashing,
    Ollama,
    OpenAI,
    Gemini,
}

/// Encoder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    /// Model name for remote providers
    pub model: String,
    /// Override of the provider's default base URL
    pub api_base_url: Option<String>,
    pub api_key: Option<String>,
    /// Embedding dimension D the encoder must return
    pub dimensions: usize,
    /// Request timeout for remote providers
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::Hashing,
            model: "all-minilm".to_string(),
            api_base_url: None,
            api_key: None,
            dimensions: 384,
            timeout_secs: 30,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub engine: EngineConfig,
    pub embedding: EmbeddingConfig,
}

impl Config {
    /// Parse and validate a YAML document
    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let engine = &self.engine;
        if engine.feature_dim == 0 || engine.feature_dim > MAX_FEATURE_DIM {
            return Err(ConfigError::Invalid(format!(
                "engine.feature_dim must be in 1..={}, got {}",
                MAX_FEATURE_DIM, engine.feature_dim
            )));
        }
        if self.embedding.dimensions < engine.feature_dim {
            return Err(ConfigError::Invalid(format!(
                "embedding.dimensions ({}) must be at least engine.feature_dim ({})",
                self.embedding.dimensions, engine.feature_dim
            )));
        }
        if !engine.edge_threshold.is_finite() {
            return Err(ConfigError::Invalid("engine.edge_threshold must be finite".to_string()));
        }
        let damping = engine.pagerank.damping_factor;
        if !(0.0..=1.0).contains(&damping) {
            return Err(ConfigError::Invalid(format!(
                "engine.pagerank.damping_factor must be in [0, 1], got {}",
                damping
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.engine.feature_dim, 4);
        assert_eq!(config.engine.edge_threshold, 0.7);
        assert_eq!(config.engine.ego_radius, 2);
        assert_eq!(config.embedding.provider, EmbeddingProvider::Hashing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
server:
  port: 9100
engine:
  default_top_k: 3
  pagerank:
    iterations: 50
embedding:
  provider: ollama
  model: nomic-embed-text
  dimensions: 768
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.address, "0.0.0.0");
        assert_eq!(config.engine.default_top_k, 3);
        assert_eq!(config.engine.feature_dim, 4);
        assert_eq!(config.engine.pagerank.iterations, 50);
        assert_eq!(config.engine.pagerank.damping_factor, 0.85);
        assert_eq!(config.embedding.provider, EmbeddingProvider::Ollama);
        assert_eq!(config.embedding.dimensions, 768);
    }

    #[test]
    fn test_rejects_oversized_feature_dim() {
        let err = Config::from_yaml("engine:\n  feature_dim: 40\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_embedding_smaller_than_features() {
        let err = Config::from_yaml("embedding:\n  dimensions: 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
    }
}

//! Document feature pipeline
//!
//! An embedding is reduced to a short unit-scaled primary vector, which the
//! circuit transform maps to a secondary vector of the same length. The pair
//! is what the relationship graph scores documents on.

pub mod reducer;
pub mod similarity;
pub mod transform;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use reducer::FeatureReducer;
pub use similarity::{cosine_distance, HybridSimilarity, Similarity};
pub use transform::{Circuit, Operation, StateVector, Transform};

/// Feature pipeline errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Zero or non-finite vector; no direction to normalize or compare
    #[error("Degenerate vector: {0}")]
    DegenerateVector(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type FeatureResult<T> = Result<T, FeatureError>;

/// Primary and secondary representation of one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePair {
    /// Normalized, truncated embedding
    pub primary: Vec<f64>,
    /// Transform output of `primary`
    pub secondary: Vec<f64>,
}

impl FeaturePair {
    pub fn new(primary: Vec<f64>, secondary: Vec<f64>) -> Self {
        Self { primary, secondary }
    }

    pub fn dimensions(&self) -> usize {
        self.primary.len()
    }
}

/// Embedding -> FeaturePair, combining the reducer and the transform
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    reducer: FeatureReducer,
    transform: Transform,
}

impl FeatureExtractor {
    /// Create an extractor producing `dimensions`-long vectors
    pub fn new(dimensions: usize) -> Self {
        Self {
            reducer: FeatureReducer::new(dimensions),
            transform: Transform::new(dimensions),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.reducer.dimensions()
    }

    /// Compute both vectors for an embedding
    pub fn extract(&self, embedding: &[f32]) -> FeatureResult<FeaturePair> {
        let primary = self.reducer.reduce(embedding)?;
        let secondary = self.transform.apply(&primary)?;
        Ok(FeaturePair { primary, secondary })
    }
}

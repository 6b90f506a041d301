//! Embedding reduction
//!
//! Divides the embedding by its Euclidean norm and keeps the leading
//! components. The kept prefix is not re-normalized.

use super::{FeatureError, FeatureResult};

/// Reduces a D-dimensional embedding to an N-dimensional primary vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureReducer {
    dimensions: usize,
}

impl FeatureReducer {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Output dimension N
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Normalize `embedding` and take its first N components.
    ///
    /// Fails with `DegenerateVector` when the norm is zero or non-finite, or
    /// when every kept component is zero (cosine would be undefined later).
    pub fn reduce(&self, embedding: &[f32]) -> FeatureResult<Vec<f64>> {
        if embedding.len() < self.dimensions {
            return Err(FeatureError::DimensionMismatch {
                expected: self.dimensions,
                got: embedding.len(),
            });
        }

        let norm = embedding
            .iter()
            .map(|&x| (x as f64) * (x as f64))
            .sum::<f64>()
            .sqrt();

        if !norm.is_finite() {
            return Err(FeatureError::DegenerateVector(
                "embedding has a non-finite norm".to_string(),
            ));
        }
        if norm == 0.0 {
            return Err(FeatureError::DegenerateVector(
                "embedding is the zero vector".to_string(),
            ));
        }

        let primary: Vec<f64> = embedding[..self.dimensions]
            .iter()
            .map(|&x| x as f64 / norm)
            .collect();

        if primary.iter().all(|&x| x == 0.0) {
            return Err(FeatureError::DegenerateVector(format!(
                "first {} embedding components are all zero",
                self.dimensions
            )));
        }

        Ok(primary)
    }
}

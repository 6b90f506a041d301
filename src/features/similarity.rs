//! Document similarity scoring

use super::{FeatureError, FeatureResult, FeaturePair};

/// Cosine distance `1 - a.b / (|a| |b|)`.
///
/// Fails with `DegenerateVector` if either side is the zero vector.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> FeatureResult<f64> {
    if a.len() != b.len() {
        return Err(FeatureError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a <= 0.0 || norm_b <= 0.0 {
        return Err(FeatureError::DegenerateVector(
            "cosine distance with a zero vector".to_string(),
        ));
    }

    Ok(1.0 - dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Pairwise document score used for edge creation and search ranking
pub trait Similarity: Send + Sync {
    /// Score two documents. Must be symmetric in its arguments.
    fn score(&self, a: &FeaturePair, b: &FeaturePair) -> FeatureResult<f64>;
}

/// Equal-weight blend of primary and secondary cosine similarity
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridSimilarity;

impl Similarity for HybridSimilarity {
    fn score(&self, a: &FeaturePair, b: &FeaturePair) -> FeatureResult<f64> {
        let classical_sim = 1.0 - cosine_distance(&a.primary, &b.primary)?;
        let secondary_sim = 1.0 - cosine_distance(&a.secondary, &b.secondary)?;
        Ok(0.5 * classical_sim + 0.5 * secondary_sim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Transform;

    fn pair(primary: &[f64]) -> FeaturePair {
        let secondary = Transform::new(primary.len()).apply(primary).unwrap();
        FeaturePair::new(primary.to_vec(), secondary)
    }

    #[test]
    fn test_cosine_distance() {
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!(cosine_distance(&[1.0, 1.0], &[2.0, 2.0]).unwrap().abs() < 1e-12);
        assert!((cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_distance_zero_vector() {
        let err = cosine_distance(&[0.0, 0.0], &[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, FeatureError::DegenerateVector(_)));
    }

    #[test]
    fn test_cosine_distance_length_mismatch() {
        assert!(matches!(
            cosine_distance(&[1.0], &[1.0, 0.0]),
            Err(FeatureError::DimensionMismatch { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn test_self_score_is_one() {
        let a = pair(&[0.2, -0.4, 0.6, 0.1]);
        let score = HybridSimilarity.score(&a, &a).unwrap();
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_symmetric() {
        let a = pair(&[0.2, -0.4, 0.6, 0.1]);
        let b = pair(&[-0.3, 0.5, 0.1, 0.7]);
        let ab = HybridSimilarity.score(&a, &b).unwrap();
        let ba = HybridSimilarity.score(&b, &a).unwrap();
        assert_eq!(ab.to_bits(), ba.to_bits());
    }

    #[test]
    fn test_score_blends_equally() {
        let a = FeaturePair::new(vec![1.0, 0.0], vec![1.0, 0.0]);
        let b = FeaturePair::new(vec![0.0, 1.0], vec![1.0, 0.0]);
        // classical 0, secondary 1
        let score = HybridSimilarity.score(&a, &b).unwrap();
        assert!((score - 0.5).abs() < 1e-12);
    }
}

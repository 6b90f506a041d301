//! Local feature-hashing encoder
//!
//! Each lower-cased alphanumeric token (and each adjacent token pair, at half
//! weight) is expanded into a dense pseudo-random direction seeded by its
//! FxHash; the embedding is the sum of those directions. Texts sharing words
//! point in similar directions. Empty or token-free text encodes to the zero
//! vector.

use super::{EmbedResult, Encoder};
use async_trait::async_trait;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const BIGRAM_WEIGHT: f32 = 0.5;

/// Deterministic offline encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingEncoder {
    dimensions: usize,
}

fn seed_of(token: &str) -> u64 {
    let mut hasher = FxHasher::default();
    token.hash(&mut hasher);
    hasher.finish()
}

/// splitmix64 output function
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Split into lower-cased alphanumeric tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl HashingEncoder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn accumulate(&self, out: &mut [f32], feature: &str, weight: f32) {
        let seed = seed_of(feature);
        for (k, slot) in out.iter_mut().enumerate() {
            let bits = mix(seed.wrapping_add((k as u64 + 1).wrapping_mul(GOLDEN_GAMMA)));
            // Top 24 bits -> [-1, 1)
            let unit = (bits >> 40) as f32 / (1u64 << 24) as f32;
            *slot += weight * (2.0 * unit - 1.0);
        }
    }

    /// Synchronous encoding used by the `Encoder` impl
    pub fn encode_text(&self, text: &str) -> Vec<f32> {
        let mut out = vec![0.0f32; self.dimensions];
        let tokens = tokenize(text);

        for token in &tokens {
            self.accumulate(&mut out, token, 1.0);
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            self.accumulate(&mut out, &bigram, BIGRAM_WEIGHT);
        }

        out
    }
}

#[async_trait]
impl Encoder for HashingEncoder {
    async fn encode(&self, text: &str) -> EmbedResult<Vec<f32>> {
        Ok(self.encode_text(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

//! PageRank algorithm implementation
//!
//! Weighted power iteration over the directed view. Out-edge weights are
//! normalized per source; nodes without outgoing weight redistribute their
//! score uniformly so that scores always sum to 1.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;
use tracing::warn;

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Maximum number of iterations
    pub iterations: usize,
    /// Per-node tolerance; iteration stops once the L1 change drops below `n * tolerance`
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// Calculate PageRank for the graph view
///
/// Uses edge weights when the view carries them, uniform weights otherwise.
pub fn page_rank(view: &GraphView, config: PageRankConfig) -> HashMap<NodeId, f64> {
    let n = view.node_count;

    if n == 0 {
        return HashMap::new();
    }

    // Outgoing weight totals; zero marks a dangling node.
    let out_weight: Vec<f64> = (0..n)
        .map(|idx| match view.weights(idx) {
            Some(w) => w.iter().sum(),
            None => view.out_degree(idx) as f64,
        })
        .collect();

    let uniform = 1.0 / n as f64;
    let mut scores = vec![uniform; n];
    let mut next_scores = vec![0.0; n];

    let d = config.damping_factor;
    let base_score = (1.0 - d) * uniform;
    let mut converged = false;

    for _ in 0..config.iterations {
        let dangling_sum: f64 = (0..n)
            .filter(|&idx| out_weight[idx] <= 0.0)
            .map(|idx| scores[idx])
            .sum();
        let teleport = base_score + d * dangling_sum * uniform;
        next_scores.iter_mut().for_each(|s| *s = teleport);

        // Push each node's score along its normalized out-edges
        for src in 0..n {
            if out_weight[src] <= 0.0 {
                continue;
            }
            let share = d * scores[src] / out_weight[src];
            let weights = view.weights(src);
            for (pos, &dst) in view.successors(src).iter().enumerate() {
                let w = weights.map_or(1.0, |w| w[pos]);
                next_scores[dst] += share * w;
            }
        }

        let total_diff: f64 = next_scores
            .iter()
            .zip(scores.iter())
            .map(|(next, prev)| (next - prev).abs())
            .sum();

        // Swap buffers
        scores.copy_from_slice(&next_scores);

        if total_diff < n as f64 * config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            iterations = config.iterations,
            nodes = n,
            "PageRank did not converge, returning last iterate"
        );
    }

    let mut result = HashMap::with_capacity(n);
    for (idx, score) in scores.into_iter().enumerate() {
        result.insert(view.index_to_node[idx], score);
    }

    result
}

//! Degree centrality
//!
//! Fraction of the other nodes a node is connected to, counting both
//! incoming and outgoing edges of the directed view.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// Degree centrality for every node in the view.
///
/// `(in_degree + out_degree) / (n - 1)`. A single-node view has no possible
/// connections, so its node scores 0.
pub fn degree_centrality(view: &GraphView) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    let mut result = HashMap::with_capacity(n);

    if n <= 1 {
        for &node in &view.index_to_node {
            result.insert(node, 0.0);
        }
        return result;
    }

    let scale = 1.0 / (n - 1) as f64;
    for idx in 0..n {
        let degree = view.in_degree(idx) + view.out_degree(idx);
        result.insert(view.index_to_node[idx], degree as f64 * scale);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_centrality() {
        // 1 -> 0, 2 -> 0, 3 -> 0
        let view = GraphView::from_edges(&[0, 1, 2, 3], &[(1, 0, 1.0), (2, 0, 1.0), (3, 0, 1.0)]);
        let scores = degree_centrality(&view);

        assert!((scores[&0] - 1.0).abs() < 1e-12);
        for leaf in 1..4 {
            assert!((scores[&leaf] - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_node_is_zero() {
        let view = GraphView::from_edges(&[7], &[]);
        let scores = degree_centrality(&view);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[&7], 0.0);
    }

    #[test]
    fn test_empty_view() {
        let view = GraphView::from_edges(&[], &[]);
        assert!(degree_centrality(&view).is_empty());
    }
}

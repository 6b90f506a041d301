//! Local clustering coefficient
//!
//! Works on the undirected projection of the view: an edge in either
//! direction counts as one undirected edge.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// Local clustering coefficient per node.
///
/// `2 * T(u) / (k(u) * (k(u) - 1))` where `T(u)` is the number of triangles
/// through `u` and `k(u)` its undirected degree. Nodes with fewer than two
/// neighbors score 0.
pub fn clustering_coefficients(view: &GraphView) -> HashMap<NodeId, f64> {
    let adjacency = view.undirected_adjacency();
    let mut result = HashMap::with_capacity(view.node_count);

    for (u, neighbors) in adjacency.iter().enumerate() {
        let k = neighbors.len();
        if k < 2 {
            result.insert(view.index_to_node[u], 0.0);
            continue;
        }

        // Each linked neighbor pair is seen twice (v->w and w->v).
        let mut links = 0usize;
        for &v in neighbors {
            links += adjacency[v].iter().filter(|&&w| neighbors.contains(&w)).count();
        }
        let triangles = links / 2;

        let coefficient = (2 * triangles) as f64 / (k * (k - 1)) as f64;
        result.insert(view.index_to_node[u], coefficient);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_graph_is_fully_clustered() {
        // Complete graph K4: 4 nodes, all connected.
        let mut edges = Vec::new();
        for i in 0..4u64 {
            for j in (i + 1)..4 {
                edges.push((j, i, 1.0));
            }
        }
        let view = GraphView::from_edges(&[0, 1, 2, 3], &edges);

        let coefficients = clustering_coefficients(&view);
        for node in 0..4 {
            assert!((coefficients[&node] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_open_triad_and_triangle() {
        // Triangle 0-1-2 with a pendant 3 attached to 2.
        let view = GraphView::from_edges(
            &[0, 1, 2, 3],
            &[(1, 0, 1.0), (2, 0, 1.0), (2, 1, 1.0), (3, 2, 1.0)],
        );
        let coefficients = clustering_coefficients(&view);

        assert!((coefficients[&0] - 1.0).abs() < 1e-12);
        assert!((coefficients[&1] - 1.0).abs() < 1e-12);
        // Node 2 has neighbors {0, 1, 3}; only (0, 1) is linked.
        assert!((coefficients[&2] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(coefficients[&3], 0.0);
    }

    #[test]
    fn test_reciprocal_edges_count_once() {
        // 0 <-> 1, 1 -> 2, 2 -> 0: a single undirected triangle.
        let view = GraphView::from_edges(
            &[0, 1, 2],
            &[(0, 1, 1.0), (1, 0, 1.0), (1, 2, 1.0), (2, 0, 1.0)],
        );
        let coefficients = clustering_coefficients(&view);
        for node in 0..3 {
            assert!((coefficients[&node] - 1.0).abs() < 1e-12);
        }
    }
}

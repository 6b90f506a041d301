//! Neighborhood analytics
//!
//! Algorithms are implemented in the `docgraph-algorithms` crate.
//! This module provides the integration/adapter layer: it projects a
//! document's ego network into a `GraphView` and runs the statistics.

pub mod analyzer;

use crate::graph::EgoNetwork;
use docgraph_algorithms::GraphView;

pub use analyzer::{NeighborhoodAnalysis, NeighborhoodAnalyzer};

// Re-export algorithms
pub use docgraph_algorithms::{
    clustering_coefficients, degree_centrality, greedy_modularity_communities,
    modularity, page_rank, CommunityResult, PageRankConfig,
};

/// Build a weighted GraphView over an ego network for algorithm execution
pub fn build_view(ego: &EgoNetwork) -> GraphView {
    let nodes: Vec<u64> = ego.nodes.iter().map(|id| id.as_u64()).collect();
    let edges: Vec<(u64, u64, f64)> = ego
        .edges
        .iter()
        .map(|&(source, target, weight)| (source.as_u64(), target.as_u64(), weight))
        .collect();

    GraphView::from_edges(&nodes, &edges)
}

//! Per-document neighborhood statistics
//!
//! The neighborhood of a document is its ego network: everything reachable
//! over outgoing edges within `radius` hops, plus the edges among those
//! documents. Centrality and PageRank read the directed edges; clustering
//! and communities read the undirected projection.

use super::build_view;
use crate::features::Similarity;
use crate::graph::{DocId, EgoNetwork, GraphResult, RelationshipGraph};
use docgraph_algorithms::{
    clustering_coefficients, degree_centrality, greedy_modularity_communities, page_rank,
    PageRankConfig,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Default ego-network radius in outgoing hops
pub const DEFAULT_EGO_RADIUS: usize = 2;

/// Structural statistics of one document's ego network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodAnalysis {
    /// Degree centrality per node
    pub centrality: BTreeMap<DocId, f64>,
    /// Local clustering coefficient per node
    pub clustering: BTreeMap<DocId, f64>,
    /// Weighted PageRank per node
    pub importance: BTreeMap<DocId, f64>,
    /// Greedy modularity partition, largest group first
    pub communities: Vec<Vec<DocId>>,
}

/// Computes `NeighborhoodAnalysis` for documents of a graph
#[derive(Debug, Clone, Copy)]
pub struct NeighborhoodAnalyzer {
    radius: usize,
    pagerank: PageRankConfig,
}

impl Default for NeighborhoodAnalyzer {
    fn default() -> Self {
        Self {
            radius: DEFAULT_EGO_RADIUS,
            pagerank: PageRankConfig::default(),
        }
    }
}

fn to_doc_map(scores: HashMap<u64, f64>) -> BTreeMap<DocId, f64> {
    scores.into_iter().map(|(id, s)| (DocId::new(id), s)).collect()
}

impl NeighborhoodAnalyzer {
    pub fn new(radius: usize, pagerank: PageRankConfig) -> Self {
        Self { radius, pagerank }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Analyze the ego network of `id`; `NotFound` if the graph lacks it.
    pub fn analyze<S: Similarity>(
        &self,
        graph: &RelationshipGraph<S>,
        id: DocId,
    ) -> GraphResult<NeighborhoodAnalysis> {
        let ego = graph.ego_network(id, self.radius)?;
        debug!(
            "Analyzing neighborhood of {}: {} nodes, {} edges",
            id,
            ego.nodes.len(),
            ego.edges.len()
        );
        Ok(self.analyze_ego(&ego))
    }

    /// Run all four statistics over an already extracted ego network
    pub fn analyze_ego(&self, ego: &EgoNetwork) -> NeighborhoodAnalysis {
        let view = build_view(ego);

        let communities = greedy_modularity_communities(&view)
            .communities
            .into_iter()
            .map(|group| group.into_iter().map(DocId::new).collect())
            .collect();

        NeighborhoodAnalysis {
            centrality: to_doc_map(degree_centrality(&view)),
            clustering: to_doc_map(clustering_coefficients(&view)),
            importance: to_doc_map(page_rank(&view, self.pagerank)),
            communities,
        }
    }
}

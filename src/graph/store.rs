//! In-memory relationship graph storage
//!
//! Append-only arena store. Inserting a document scores it against every
//! existing document and links `new -> existing` for each score above the
//! edge threshold; this is O(n) per insert and O(n^2) for a full corpus
//! build. Nothing is ever updated or removed, so a `DocId` is also the
//! document's index in the arena.

use super::edge::Edge;
use super::node::Document;
use super::property::Metadata;
use super::types::{DocId, DocType, EdgeId};
use crate::features::{FeatureError, FeaturePair, HybridSimilarity, Similarity};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use thiserror::Error;
use tracing::{debug, info};

/// Score a new document must exceed to be linked to an existing one
pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.7;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Document {0} not found")]
    NotFound(DocId),

    #[error("Feature dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Feature(#[from] FeatureError),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// One ranked search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: DocId,
    pub score: f64,
    /// Outgoing-edge targets of `id`
    pub neighbors: Vec<DocId>,
}

/// Nodes within a bounded number of outgoing hops of a center, plus every
/// stored edge among them
#[derive(Debug, Clone, PartialEq)]
pub struct EgoNetwork {
    pub center: DocId,
    /// Ascending by id
    pub nodes: Vec<DocId>,
    /// `(source, target, weight)`
    pub edges: Vec<(DocId, DocId, f64)>,
}

/// Graph-wide counts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub document_count: usize,
    pub edge_count: usize,
    pub type_counts: BTreeMap<String, usize>,
}

/// Append-only document relationship graph
///
/// - nodes: DocId -> Document (arena, index = id)
/// - edges: EdgeId -> Edge (arena, index = id)
/// - outgoing / incoming: DocId -> Vec<EdgeId> adjacency lists
/// - type_index: DocType -> Vec<DocId> for filtered search
#[derive(Debug)]
pub struct RelationshipGraph<S = HybridSimilarity> {
    /// Document storage
    nodes: Vec<Document>,

    /// Edge storage
    edges: Vec<Edge>,

    /// Outgoing edges for each document (new -> older)
    outgoing: Vec<Vec<EdgeId>>,

    /// Incoming edges for each document (later -> this)
    incoming: Vec<Vec<EdgeId>>,

    /// Type index for filtered scans, ids ascending
    type_index: HashMap<DocType, Vec<DocId>>,

    /// Pairwise scorer
    scorer: S,

    /// Required length of both feature vectors
    dimensions: usize,

    /// Edge creation cutoff (strictly greater)
    edge_threshold: f64,
}

impl RelationshipGraph<HybridSimilarity> {
    /// Create an empty graph with the hybrid scorer and default threshold
    pub fn new(dimensions: usize) -> Self {
        Self::with_scorer(dimensions, DEFAULT_EDGE_THRESHOLD, HybridSimilarity)
    }
}

impl<S: Similarity> RelationshipGraph<S> {
    /// Create an empty graph with a custom scorer and threshold
    pub fn with_scorer(dimensions: usize, edge_threshold: f64, scorer: S) -> Self {
        RelationshipGraph {
            nodes: Vec::with_capacity(1024),
            edges: Vec::with_capacity(4096),
            outgoing: Vec::with_capacity(1024),
            incoming: Vec::with_capacity(1024),
            type_index: HashMap::new(),
            scorer,
            dimensions,
            edge_threshold,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn edge_threshold(&self) -> f64 {
        self.edge_threshold
    }

    fn check_dimensions(&self, features: &FeaturePair) -> GraphResult<()> {
        for len in [features.primary.len(), features.secondary.len()] {
            if len != self.dimensions {
                return Err(GraphError::DimensionMismatch {
                    expected: self.dimensions,
                    got: len,
                });
            }
        }
        Ok(())
    }

    /// Insert a document and create its threshold edges.
    ///
    /// Every score is computed before the graph is touched, so a failure
    /// leaves the graph unchanged and consumes no id.
    pub fn insert(
        &mut self,
        doc_type: impl Into<DocType>,
        content: impl Into<String>,
        metadata: Metadata,
        features: FeaturePair,
    ) -> GraphResult<DocId> {
        self.check_dimensions(&features)?;

        let scores: Vec<(DocId, f64)> = self
            .nodes
            .par_iter()
            .map(|existing| {
                self.scorer
                    .score(&features, &existing.features)
                    .map(|score| (existing.id, score))
            })
            .collect::<Result<_, _>>()?;

        let id = DocId::new(self.nodes.len() as u64);
        let document = Document::new(id, doc_type, content, metadata, features);

        self.type_index
            .entry(document.doc_type.clone())
            .or_default()
            .push(id);
        self.nodes.push(document);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());

        let mut created = 0usize;
        for (target, score) in scores {
            if score > self.edge_threshold {
                self.add_edge(id, target, score);
                created += 1;
            }
        }

        info!("Inserted document {} with {} edges", id, created);
        Ok(id)
    }

    fn add_edge(&mut self, source: DocId, target: DocId, weight: f64) {
        let edge_id = EdgeId::new(self.edges.len() as u64);
        self.edges.push(Edge::new(edge_id, source, target, weight));
        self.outgoing[source.index()].push(edge_id);
        self.incoming[target.index()].push(edge_id);
        debug!("Created edge {} -> {} (weight {:.4})", source, target, weight);
    }

    /// Get a document by id
    pub fn get_document(&self, id: DocId) -> Option<&Document> {
        self.nodes.get(id.index())
    }

    pub fn has_document(&self, id: DocId) -> bool {
        id.index() < self.nodes.len()
    }

    /// All edges in creation order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing edges of a document; empty for unknown ids
    pub fn outgoing_edges(&self, id: DocId) -> Vec<&Edge> {
        self.outgoing
            .get(id.index())
            .map(|ids| ids.iter().map(|e| &self.edges[e.as_u64() as usize]).collect())
            .unwrap_or_default()
    }

    /// Incoming edges of a document; empty for unknown ids
    pub fn incoming_edges(&self, id: DocId) -> Vec<&Edge> {
        self.incoming
            .get(id.index())
            .map(|ids| ids.iter().map(|e| &self.edges[e.as_u64() as usize]).collect())
            .unwrap_or_default()
    }

    /// Outgoing-edge targets of `id`, in edge creation order
    pub fn neighbors(&self, id: DocId) -> GraphResult<Vec<DocId>> {
        if !self.has_document(id) {
            return Err(GraphError::NotFound(id));
        }
        Ok(self.outgoing_edges(id).iter().map(|e| e.target).collect())
    }

    /// Documents of the given type, ascending by id
    pub fn documents_by_type(&self, doc_type: &DocType) -> Vec<&Document> {
        self.type_index
            .get(doc_type)
            .map(|ids| ids.iter().map(|id| &self.nodes[id.index()]).collect())
            .unwrap_or_default()
    }

    /// Score `query` against every document (optionally of one type) and
    /// return the best `top_k`, descending by score, ties by ascending id.
    pub fn search(
        &self,
        query: &FeaturePair,
        type_filter: Option<&DocType>,
        top_k: usize,
    ) -> GraphResult<Vec<SearchHit>> {
        self.check_dimensions(query)?;

        let candidates: Vec<&Document> = match type_filter {
            Some(doc_type) => self.documents_by_type(doc_type),
            None => self.nodes.iter().collect(),
        };

        let mut scored: Vec<(DocId, f64)> = candidates
            .par_iter()
            .map(|doc| self.scorer.score(query, &doc.features).map(|s| (doc.id, s)))
            .collect::<Result<_, _>>()?;

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(top_k);

        debug!(
            "Search scored {} candidates, returning {}",
            candidates.len(),
            scored.len()
        );

        scored
            .into_iter()
            .map(|(id, score)| {
                Ok(SearchHit {
                    id,
                    score,
                    neighbors: self.neighbors(id)?,
                })
            })
            .collect()
    }

    /// Nodes reachable from `center` within `radius` outgoing hops, with
    /// every stored edge among them.
    pub fn ego_network(&self, center: DocId, radius: usize) -> GraphResult<EgoNetwork> {
        if !self.has_document(center) {
            return Err(GraphError::NotFound(center));
        }

        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(center);
        queue.push_back((center, 0usize));

        while let Some((id, depth)) = queue.pop_front() {
            if depth == radius {
                continue;
            }
            for edge in self.outgoing_edges(id) {
                if visited.insert(edge.target) {
                    queue.push_back((edge.target, depth + 1));
                }
            }
        }

        let mut edges = Vec::new();
        for &id in &visited {
            for edge in self.outgoing_edges(id) {
                if visited.contains(&edge.target) {
                    edges.push((edge.source, edge.target, edge.weight));
                }
            }
        }

        Ok(EgoNetwork {
            center,
            nodes: visited.into_iter().collect(),
            edges,
        })
    }

    /// Get total number of documents
    pub fn document_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            document_count: self.nodes.len(),
            edge_count: self.edges.len(),
            type_counts: self
                .type_index
                .iter()
                .map(|(t, ids)| (t.as_str().to_string(), ids.len()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureExtractor;

    fn features(embedding: &[f32]) -> FeaturePair {
        FeatureExtractor::new(4).extract(embedding).unwrap()
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut graph = RelationshipGraph::new(4);
        for i in 0..5 {
            let id = graph
                .insert("law", format!("doc {i}"), Metadata::new(), features(&[1.0, i as f32, 0.5, 0.2]))
                .unwrap();
            assert_eq!(id, DocId::new(i));
        }
        assert_eq!(graph.document_count(), 5);
    }

    #[test]
    fn test_identical_documents_link_backward_only() {
        let mut graph = RelationshipGraph::new(4);
        let v = [0.4, 0.3, 0.2, 0.1];
        let a = graph.insert("law", "a", Metadata::new(), features(&v)).unwrap();
        let b = graph.insert("law", "b", Metadata::new(), features(&v)).unwrap();

        assert_eq!(graph.neighbors(b).unwrap(), vec![a]);
        assert!(graph.neighbors(a).unwrap().is_empty());
        assert_eq!(graph.incoming_edges(a).len(), 1);
        assert!(graph.edges()[0].weight > DEFAULT_EDGE_THRESHOLD);
    }

    #[test]
    fn test_neighbors_unknown_id() {
        let graph = RelationshipGraph::new(4);
        assert_eq!(graph.neighbors(DocId::new(0)), Err(GraphError::NotFound(DocId::new(0))));
    }

    #[test]
    fn test_dimension_mismatch_leaves_graph_untouched() {
        let mut graph = RelationshipGraph::new(4);
        let bad = FeaturePair::new(vec![1.0, 0.0], vec![1.0, 1.0]);
        let err = graph.insert("law", "x", Metadata::new(), bad).unwrap_err();

        assert_eq!(err, GraphError::DimensionMismatch { expected: 4, got: 2 });
        assert!(graph.is_empty());

        let id = graph.insert("law", "y", Metadata::new(), features(&[1.0, 0.0, 0.0, 0.0])).unwrap();
        assert_eq!(id, DocId::new(0));
    }

    #[test]
    fn test_degenerate_features_leave_graph_untouched() {
        let mut graph = RelationshipGraph::new(2);
        graph
            .insert("law", "ok", Metadata::new(), FeaturePair::new(vec![1.0, 0.0], vec![1.0, 0.5]))
            .unwrap();

        let zero = FeaturePair::new(vec![0.0, 0.0], vec![1.0, 0.5]);
        let err = graph.insert("law", "zero", Metadata::new(), zero).unwrap_err();
        assert!(matches!(err, GraphError::Feature(FeatureError::DegenerateVector(_))));
        assert_eq!(graph.document_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_search_filters_by_type() {
        let mut graph = RelationshipGraph::new(4);
        graph.insert("law", "a", Metadata::new(), features(&[1.0, 0.0, 0.0, 0.0])).unwrap();
        graph.insert("business", "b", Metadata::new(), features(&[1.0, 0.1, 0.0, 0.0])).unwrap();
        graph.insert("law", "c", Metadata::new(), features(&[0.0, 1.0, 0.0, 0.0])).unwrap();

        let query = features(&[1.0, 0.0, 0.0, 0.0]);
        let hits = graph.search(&query, Some(&DocType::new("law")), 10).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, DocId::new(0));
        assert_eq!(hits[1].id, DocId::new(2));

        let none = graph.search(&query, Some(&DocType::new("scholarship")), 10).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_search_top_k_and_ties() {
        let mut graph = RelationshipGraph::new(4);
        let v = [0.5, 0.5, 0.5, 0.5];
        for _ in 0..4 {
            graph.insert("law", "same", Metadata::new(), features(&v)).unwrap();
        }

        let hits = graph.search(&features(&v), None, 3).unwrap();
        let ids: Vec<u64> = hits.iter().map(|h| h.id.as_u64()).collect();
        assert_eq!(ids, vec![0, 1, 2]);

        assert!(graph.search(&features(&v), None, 0).unwrap().is_empty());
    }

    #[test]
    fn test_ego_network_radius() {
        let mut graph = RelationshipGraph::new(4);
        let v = [0.4, 0.3, 0.2, 0.1];
        // Identical documents: every later one links to every earlier one.
        for _ in 0..4 {
            graph.insert("law", "same", Metadata::new(), features(&v)).unwrap();
        }

        let ego = graph.ego_network(DocId::new(3), 2).unwrap();
        assert_eq!(ego.nodes.len(), 4);
        assert_eq!(ego.edges.len(), 6);

        // The oldest document has no outgoing edges.
        let lonely = graph.ego_network(DocId::new(0), 2).unwrap();
        assert_eq!(lonely.nodes, vec![DocId::new(0)]);
        assert!(lonely.edges.is_empty());

        assert!(matches!(graph.ego_network(DocId::new(9), 2), Err(GraphError::NotFound(_))));
    }

    #[test]
    fn test_statistics() {
        let mut graph = RelationshipGraph::new(4);
        graph.insert("law", "a", Metadata::new(), features(&[1.0, 0.0, 0.0, 0.0])).unwrap();
        graph.insert("business", "b", Metadata::new(), features(&[1.0, 0.0, 0.0, 0.0])).unwrap();

        let stats = graph.statistics();
        assert_eq!(stats.document_count, 2);
        assert_eq!(stats.edge_count, 1);
        assert_eq!(stats.type_counts["law"], 1);
        assert_eq!(stats.type_counts["business"], 1);
    }
}

//! Threshold edge
//!
//! Edges always point from the document being inserted to a document that
//! already existed at that moment, so `source > target` holds for every edge.

use super::types::{DocId, EdgeId};
use serde::{Deserialize, Serialize};

/// A directed, weighted edge in the relationship graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Newly inserted document (edge goes FROM this node)
    pub source: DocId,

    /// Previously existing document (edge goes TO this node)
    pub target: DocId,

    /// Similarity score at creation time
    pub weight: f64,
}

impl Edge {
    pub fn new(id: EdgeId, source: DocId, target: DocId, weight: f64) -> Self {
        Edge { id, source, target, weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_direction() {
        let edge = Edge::new(EdgeId::new(0), DocId::new(2), DocId::new(0), 0.81);

        assert_eq!(edge.source, DocId::new(2));
        assert_eq!(edge.target, DocId::new(0));
        assert!(edge.source > edge.target);
        assert_eq!(edge.weight, 0.81);
    }
}

//! Document relationship graph
//!
//! This module implements the append-only document graph:
//! - Document nodes with type, content, metadata and feature vectors
//! - Directed, weighted threshold edges from each new document to earlier ones
//! - Global scan-and-rank search and ego-network extraction

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Document;
pub use property::{Metadata, PropertyValue};
pub use store::{EgoNetwork, GraphError, GraphResult, GraphStatistics, RelationshipGraph, SearchHit};
pub use types::{DocId, DocType, EdgeId};

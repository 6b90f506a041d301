//! Docgraph
//!
//! An in-memory document relationship graph with hybrid similarity search
//! and per-document neighborhood analytics.
//!
//! # Architecture
//!
//! - `embed`: text -> dense embedding (`Encoder` trait; local hashing or HTTP providers)
//! - `features`: embedding -> primary vector (reducer) -> secondary vector (circuit transform)
//! - `graph`: append-only store; each insert links `new -> existing` above the edge threshold
//! - `algo`: ego-network statistics (degree centrality, clustering, PageRank, communities)
//! - `engine`: the shared handle implementing create / search / analyze
//! - `http`: axum routes over the engine
//!
//! ## Example Usage
//!
//! ```rust
//! use docgraph::features::FeatureExtractor;
//! use docgraph::graph::{Metadata, RelationshipGraph};
//!
//! let extractor = FeatureExtractor::new(4);
//! let mut graph = RelationshipGraph::new(4);
//!
//! let a = extractor.extract(&[0.9, 0.1, 0.3, 0.2, 0.5]).unwrap();
//! let b = extractor.extract(&[0.8, 0.2, 0.3, 0.1, 0.4]).unwrap();
//!
//! let first = graph.insert("news", "Quantum leap", Metadata::new(), a.clone()).unwrap();
//! let second = graph.insert("news", "Quantum step", Metadata::new(), b).unwrap();
//!
//! assert_eq!(graph.neighbors(second).unwrap(), vec![first]);
//! let hits = graph.search(&a, None, 1).unwrap();
//! assert_eq!(hits[0].id, first);
//! ```

pub mod algo;
pub mod config;
pub mod embed;
pub mod engine;
pub mod features;
pub mod graph;
pub mod http;

// Re-export main types for convenience
pub use graph::{
    DocId, DocType, Document, Edge, EdgeId, GraphError, GraphResult, Metadata, PropertyValue,
    RelationshipGraph, SearchHit,
};

pub use features::{FeatureError, FeatureExtractor, FeaturePair, HybridSimilarity, Similarity};

pub use algo::analyzer::{NeighborhoodAnalysis, NeighborhoodAnalyzer};

pub use embed::{EmbedError, EmbeddingClient, Encoder, HashingEncoder};

pub use engine::{EngineError, EngineResult, SearchEngine, SearchResult};

pub use config::{Config, ConfigError};

pub use http::HttpServer;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

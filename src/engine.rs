//! Document engine
//!
//! `SearchEngine` owns the encoder and the shared relationship graph and
//! implements the three request types: create, search and analyze. Encoding
//! and feature extraction happen before any lock is taken; the graph itself
//! sits behind a single writer / many readers lock so a search observes
//! either the pre- or post-insert state of a concurrent insert.

use crate::algo::analyzer::{NeighborhoodAnalysis, NeighborhoodAnalyzer};
use crate::config::{Config, EngineConfig};
use crate::embed::{encoder_from_config, EmbedError, Encoder};
use crate::features::{FeatureError, FeatureExtractor, FeaturePair, HybridSimilarity};
use crate::graph::{
    DocId, DocType, Document, GraphError, GraphStatistics, Metadata, RelationshipGraph,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Errors surfaced to callers of the engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Zero or non-finite embedding; the document has no direction
    #[error("Degenerate vector: {0}")]
    DegenerateVector(String),

    #[error("Document {0} not found")]
    NotFound(DocId),

    /// Encoder failed or returned the wrong dimensionality
    #[error("Encoding error: {0}")]
    Encoding(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<FeatureError> for EngineError {
    fn from(err: FeatureError) -> Self {
        match err {
            FeatureError::DegenerateVector(msg) => EngineError::DegenerateVector(msg),
            FeatureError::DimensionMismatch { .. } => EngineError::Encoding(err.to_string()),
        }
    }
}

impl From<GraphError> for EngineError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::NotFound(id) => EngineError::NotFound(id),
            GraphError::Feature(inner) => inner.into(),
            GraphError::DimensionMismatch { .. } => EngineError::Encoding(err.to_string()),
        }
    }
}

impl From<EmbedError> for EngineError {
    fn from(err: EmbedError) -> Self {
        EngineError::Encoding(err.to_string())
    }
}

/// One hydrated search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub id: DocId,
    pub content: String,
    #[serde(rename = "type")]
    pub doc_type: DocType,
    pub metadata: Metadata,
    pub similarity: f64,
    /// Outgoing-edge targets of this document
    pub related_docs: Vec<DocId>,
}

/// Shared handle over encoder + graph
#[derive(Clone)]
pub struct SearchEngine {
    encoder: Arc<dyn Encoder>,
    graph: Arc<RwLock<RelationshipGraph>>,
    extractor: FeatureExtractor,
    analyzer: NeighborhoodAnalyzer,
    default_top_k: usize,
}

impl SearchEngine {
    /// Create an engine around an encoder
    pub fn new(encoder: Arc<dyn Encoder>, config: &EngineConfig) -> Self {
        let graph = RelationshipGraph::with_scorer(
            config.feature_dim,
            config.edge_threshold,
            HybridSimilarity,
        );
        Self {
            encoder,
            graph: Arc::new(RwLock::new(graph)),
            extractor: FeatureExtractor::new(config.feature_dim),
            analyzer: NeighborhoodAnalyzer::new(config.ego_radius, config.pagerank),
            default_top_k: config.default_top_k,
        }
    }

    /// Build the encoder named by `config.embedding` and wrap it
    pub fn from_config(config: &Config) -> EngineResult<Self> {
        let encoder = encoder_from_config(&config.embedding)?;
        info!(
            "Engine ready: {:?} encoder (D={}), N={}, threshold={}",
            config.embedding.provider,
            encoder.dimensions(),
            config.engine.feature_dim,
            config.engine.edge_threshold
        );
        Ok(Self::new(encoder, &config.engine))
    }

    /// Shared graph handle
    pub fn graph(&self) -> Arc<RwLock<RelationshipGraph>> {
        Arc::clone(&self.graph)
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    async fn features(&self, text: &str) -> EngineResult<FeaturePair> {
        let embedding = self.encoder.encode(text).await.map_err(|e| {
            warn!("Encoder failed: {}", e);
            EngineError::from(e)
        })?;
        if embedding.len() != self.encoder.dimensions() {
            return Err(EmbedError::DimensionMismatch {
                expected: self.encoder.dimensions(),
                got: embedding.len(),
            }
            .into());
        }
        Ok(self.extractor.extract(&embedding)?)
    }

    /// Create a document; returns its id
    ///
    /// The insert scores the new document against every stored one while
    /// holding the write lock, so it runs on the blocking pool rather than an
    /// async worker.
    pub async fn add_document(
        &self,
        doc_type: impl Into<DocType>,
        content: impl Into<String>,
        metadata: Metadata,
    ) -> EngineResult<DocId> {
        let doc_type = doc_type.into();
        let content = content.into();
        let features = self.features(&content).await?;

        let mut graph = Arc::clone(&self.graph).write_owned().await;
        let inserted = tokio::task::spawn_blocking(move || {
            graph.insert(doc_type, content, metadata, features)
        })
        .await;

        match inserted {
            Ok(result) => Ok(result?),
            Err(join_error) => std::panic::resume_unwind(join_error.into_panic()),
        }
    }

    /// Rank stored documents against `query`
    pub async fn search(
        &self,
        query: &str,
        doc_type: Option<&DocType>,
        top_k: Option<usize>,
    ) -> EngineResult<Vec<SearchResult>> {
        let top_k = top_k.unwrap_or(self.default_top_k);
        if top_k == 0 {
            return Ok(Vec::new());
        }
        let features = self.features(query).await?;

        let graph = self.graph.read().await;
        let hits = graph.search(&features, doc_type, top_k)?;
        debug!("Search returned {} hits", hits.len());

        hits.into_iter()
            .map(|hit| {
                let doc = graph
                    .get_document(hit.id)
                    .ok_or(EngineError::NotFound(hit.id))?;
                Ok(SearchResult {
                    id: hit.id,
                    content: doc.content.clone(),
                    doc_type: doc.doc_type.clone(),
                    metadata: doc.metadata.clone(),
                    similarity: hit.score,
                    related_docs: hit.neighbors,
                })
            })
            .collect()
    }

    /// Neighborhood statistics of a stored document
    pub async fn analyze(&self, id: DocId) -> EngineResult<NeighborhoodAnalysis> {
        let graph = self.graph.read().await;
        Ok(self.analyzer.analyze(&*graph, id)?)
    }

    /// Snapshot of one stored document
    pub async fn document(&self, id: DocId) -> EngineResult<Document> {
        let graph = self.graph.read().await;
        graph
            .get_document(id)
            .cloned()
            .ok_or(EngineError::NotFound(id))
    }

    pub async fn stats(&self) -> GraphStatistics {
        self.graph.read().await.statistics()
    }
}

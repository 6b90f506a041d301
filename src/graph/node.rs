//! Document node
//!
//! Every field is fixed at insertion; the graph never mutates a stored node.

use super::property::Metadata;
use super::types::{DocId, DocType};
use crate::features::FeaturePair;
use serde::{Deserialize, Serialize};

/// A document in the relationship graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Dense, insertion-ordered identifier
    pub id: DocId,

    /// Category tag
    pub doc_type: DocType,

    /// Raw text
    pub content: String,

    /// Opaque key-value metadata
    pub metadata: Metadata,

    /// Primary and secondary feature vectors
    pub features: FeaturePair,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl Document {
    pub fn new(
        id: DocId,
        doc_type: impl Into<DocType>,
        content: impl Into<String>,
        metadata: Metadata,
        features: FeaturePair,
    ) -> Self {
        Document {
            id,
            doc_type: doc_type.into(),
            content: content.into(),
            metadata,
            features,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Document {}

impl std::hash::Hash for Document {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

//! HTTP handlers for the document API

use crate::engine::{EngineError, SearchEngine};
use crate::graph::{DocId, DocType, Metadata};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable code
    pub error: String,
    pub message: String,
}

/// Handler error; `NotFound` maps to 404, everything else to 500
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Internal { code: &'static str, message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Internal { code, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, code, message)
            }
        };

        let body = ErrorBody {
            error: error.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err {
            EngineError::NotFound(_) => ApiError::NotFound(message),
            EngineError::DegenerateVector(_) => {
                warn!("Request failed: {}", message);
                ApiError::Internal { code: "degenerate_vector", message }
            }
            EngineError::Encoding(_) => {
                warn!("Request failed: {}", message);
                ApiError::Internal { code: "encoding_error", message }
            }
        }
    }
}

/// Body of `POST /documents`
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub doc_type: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Body of `POST /search`
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub top_k: Option<usize>,
}

pub async fn create_document_handler(
    State(engine): State<SearchEngine>,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = engine
        .add_document(payload.doc_type, payload.content, payload.metadata)
        .await?;
    Ok(Json(json!({ "status": "success", "id": id })))
}

pub async fn search_handler(
    State(engine): State<SearchEngine>,
    Json(payload): Json<SearchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let doc_type = payload.doc_type.map(DocType::from);
    let results = engine
        .search(&payload.query, doc_type.as_ref(), payload.top_k)
        .await?;
    Ok(Json(json!({ "results": results })))
}

pub async fn analyze_handler(
    State(engine): State<SearchEngine>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let analysis = engine.analyze(DocId::new(id)).await?;
    Ok(Json(json!({ "analysis": analysis })))
}

pub async fn get_document_handler(
    State(engine): State<SearchEngine>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let doc = engine.document(DocId::new(id)).await?;
    Ok(Json(json!({
        "id": doc.id,
        "type": doc.doc_type,
        "content": doc.content,
        "metadata": doc.metadata,
        "created_at": doc.created_at,
    })))
}

/// Handler for system status
pub async fn status_handler(State(engine): State<SearchEngine>) -> impl IntoResponse {
    let stats = engine.stats().await;
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "storage": {
            "documents": stats.document_count,
            "edges": stats.edge_count,
            "types": stats.type_counts,
        }
    }))
}

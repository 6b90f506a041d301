//! HTTP server for the document API

use super::handler::{
    analyze_handler, create_document_handler, get_document_handler, search_handler,
    status_handler,
};
use crate::engine::SearchEngine;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Routes of the document API
pub fn router(engine: SearchEngine) -> Router {
    Router::new()
        .route("/documents", post(create_document_handler))
        .route("/documents/", post(create_document_handler))
        .route("/documents/:id", get(get_document_handler))
        .route("/search", post(search_handler))
        .route("/search/", post(search_handler))
        .route("/analyze/:id", get(analyze_handler))
        .route("/status", get(status_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

/// HTTP server bound to one address
pub struct HttpServer {
    engine: SearchEngine,
    address: String,
    port: u16,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(engine: SearchEngine, address: impl Into<String>, port: u16) -> Self {
        Self {
            engine,
            address: address.into(),
            port,
        }
    }

    /// Bind and serve until the process exits
    pub async fn start(&self) -> std::io::Result<()> {
        let app = router(self.engine.clone());

        let addr = format!("{}:{}", self.address, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Document API listening on http://{}", addr);

        axum::serve(listener, app).await
    }
}

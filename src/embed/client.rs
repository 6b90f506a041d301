//! HTTP encoder for hosted embedding models

use super::{check_dimensions, EmbedError, EmbedResult, Encoder};
use crate::config::{EmbeddingConfig, EmbeddingProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Encoder backed by a remote embedding API
pub struct EmbeddingClient {
    client: Client,
    provider: EmbeddingProvider,
    model: String,
    api_key: Option<String>,
    api_base_url: String,
    dimensions: usize,
}

fn default_base_url(provider: EmbeddingProvider) -> &'static str {
    match provider {
        EmbeddingProvider::OpenAI => "https://api.openai.com/v1",
        EmbeddingProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        EmbeddingProvider::Ollama | EmbeddingProvider::Hashing => "http://localhost:11434",
    }
}

impl EmbeddingClient {
    /// Create a client for a remote provider
    pub fn new(config: &EmbeddingConfig) -> EmbedResult<Self> {
        if config.provider == EmbeddingProvider::Hashing {
            return Err(EmbedError::ConfigError(
                "hashing provider is local and has no HTTP client".to_string(),
            ));
        }
        if matches!(config.provider, EmbeddingProvider::OpenAI | EmbeddingProvider::Gemini)
            && config.api_key.is_none()
        {
            return Err(EmbedError::ConfigError(format!(
                "{:?} requires an api_key",
                config.provider
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbedError::ConfigError(e.to_string()))?;

        let api_base_url = config
            .api_base_url
            .clone()
            .unwrap_or_else(|| default_base_url(config.provider).to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            provider: config.provider,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            api_base_url,
            dimensions: config.dimensions,
        })
    }

    pub fn provider(&self) -> EmbeddingProvider {
        self.provider
    }

    fn api_key(&self) -> EmbedResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| EmbedError::ConfigError("missing api_key".to_string()))
    }

    async fn post_json<Req: Serialize, Resp: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: &Req,
        bearer: Option<&str>,
    ) -> EmbedResult<Resp> {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| EmbedError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(EmbedError::ApiError(format!(
                "{:?} returned {}: {}",
                self.provider, status, error_text
            )));
        }

        resp.json()
            .await
            .map_err(|e| EmbedError::SerializationError(e.to_string()))
    }

    async fn openai_embedding(&self, text: &str) -> EmbedResult<Vec<f32>> {
        #[derive(Serialize)]
        struct OpenAIRequest<'a> {
            input: &'a str,
            model: &'a str,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            data: Vec<OpenAIData>,
        }

        #[derive(Deserialize)]
        struct OpenAIData {
            embedding: Vec<f32>,
        }

        let url = format!("{}/embeddings", self.api_base_url);
        let body = OpenAIRequest { input: text, model: &self.model };
        let result: OpenAIResponse = self.post_json(&url, &body, Some(self.api_key()?)).await?;

        result
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbedError::SerializationError("empty data array".to_string()))
    }

    async fn ollama_embedding(&self, text: &str) -> EmbedResult<Vec<f32>> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            embedding: Vec<f32>,
        }

        let url = format!("{}/api/embeddings", self.api_base_url);
        let body = OllamaRequest { model: &self.model, prompt: text };
        let result: OllamaResponse = self.post_json(&url, &body, None).await?;
        Ok(result.embedding)
    }

    async fn gemini_embedding(&self, text: &str) -> EmbedResult<Vec<f32>> {
        #[derive(Serialize)]
        struct GeminiRequest<'a> {
            model: String,
            content: GeminiContent<'a>,
        }

        #[derive(Serialize)]
        struct GeminiContent<'a> {
            parts: [GeminiPart<'a>; 1],
        }

        #[derive(Serialize)]
        struct GeminiPart<'a> {
            text: &'a str,
        }

        #[derive(Deserialize)]
        struct GeminiResponse {
            embedding: GeminiEmbedding,
        }

        #[derive(Deserialize)]
        struct GeminiEmbedding {
            values: Vec<f32>,
        }

        let url = format!(
            "{}/models/{}:embedContent?key={}",
            self.api_base_url,
            self.model,
            self.api_key()?
        );
        let body = GeminiRequest {
            model: format!("models/{}", self.model),
            content: GeminiContent { parts: [GeminiPart { text }] },
        };
        let result: GeminiResponse = self.post_json(&url, &body, None).await?;
        Ok(result.embedding.values)
    }
}

#[async_trait]
impl Encoder for EmbeddingClient {
    async fn encode(&self, text: &str) -> EmbedResult<Vec<f32>> {
        debug!("Requesting {:?} embedding ({} chars)", self.provider, text.len());
        let embedding = match self.provider {
            EmbeddingProvider::OpenAI => self.openai_embedding(text).await?,
            EmbeddingProvider::Ollama => self.ollama_embedding(text).await?,
            EmbeddingProvider::Gemini => self.gemini_embedding(text).await?,
            EmbeddingProvider::Hashing => {
                return Err(EmbedError::ConfigError("hashing provider has no endpoint".to_string()))
            }
        };
        check_dimensions(self.dimensions, &embedding)?;
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

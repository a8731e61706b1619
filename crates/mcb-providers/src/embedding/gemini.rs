//! Google Gemini embedding provider (§4.2): `batchEmbedContents`, keyed by
//! an API key query parameter rather than a bearer header.

use async_trait::async_trait;
use linkme::distributed_slice;
use mcb_domain::error::{Error, Result};
use mcb_domain::ports::EmbeddingProvider;
use mcb_domain::registry::{EmbeddingProviderEntry, EMBEDDING_PROVIDERS};
use mcb_domain::value_objects::EmbeddingProviderConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::constants::{GEMINI_API_BASE_URL, GEMINI_DEFAULT_MODEL, GEMINI_DIMENSION_DEFAULT};
use super::dimension_cache;

#[derive(Serialize)]
struct BatchEmbedRequest {
    requests: Vec<EmbedContentRequest>,
}

#[derive(Serialize)]
struct EmbedContentRequest {
    model: String,
    content: Content,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

/// Gemini's `batchEmbedContents` REST endpoint as an [`EmbeddingProvider`].
pub(crate) struct GeminiEmbeddingProvider {
    client: reqwest::Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl GeminiEmbeddingProvider {
    fn new(config: &EmbeddingProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::config("gemini provider requires api_key"))?;
        Ok(Self {
            client: reqwest::Client::new(),
            model: config.model.clone().unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_owned()),
            base_url: config.base_url.clone().unwrap_or_else(|| GEMINI_API_BASE_URL.to_owned()),
            api_key,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/v1beta/models/{}:batchEmbedContents?key={}", self.base_url, self.model, self.api_key);
        let model_ref = format!("models/{}", self.model);
        let body = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedContentRequest {
                    model: model_ref.clone(),
                    content: Content {
                        parts: vec![Part { text: text.clone() }],
                    },
                })
                .collect(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| Error::provider_with_source("gemini", "embeddings request failed", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::provider("gemini", format!("embeddings request returned {status}: {text}")));
        }

        let parsed: BatchEmbedResponse = response
            .json()
            .await
            .map_err(|err| Error::provider_with_source("gemini", "failed to parse embeddings response", err))?;

        if let Some(first) = parsed.embeddings.first() {
            dimension_cache::remember(&self.model, first.values.len());
        }

        Ok(parsed.embeddings.into_iter().map(|embedding| embedding.values).collect())
    }

    fn dimensions(&self) -> usize {
        dimension_cache::recall(&self.model).unwrap_or(GEMINI_DIMENSION_DEFAULT)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

#[distributed_slice(EMBEDDING_PROVIDERS)]
static GEMINI_ENTRY: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "gemini",
    description: "Google Gemini text embeddings via batchEmbedContents",
    build: |config| GeminiEmbeddingProvider::new(config).map(|provider| Arc::new(provider) as Arc<dyn EmbeddingProvider>).map_err(|err| err.to_string()),
};

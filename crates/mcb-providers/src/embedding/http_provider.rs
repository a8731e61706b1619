//! Shared HTTP transport for the recognized embedding providers (§4.2).
//!
//! `vertex`, `aws`, `microsoft` and `sagemaker` model their request/response
//! shape as OpenAI-compatible (`{"model", "input"} -> {"data": [{"embedding"}]}`)
//! behind a configurable `base_url` with bearer-token auth; resolving each
//! provider's actual SDK-specific signing (AWS SigV4, Azure AD tokens) is
//! out of scope (§1 non-goals: "embedding SDK specifics beyond the modeled
//! interface"). `openai` uses the same shape natively; `gemini` has its own
//! request/response shape and is implemented separately.

use async_trait::async_trait;
use mcb_domain::error::{Error, Result};
use mcb_domain::ports::EmbeddingProvider;
use serde::{Deserialize, Serialize};

use super::dimension_cache;

/// How a provider authenticates its HTTP calls.
#[derive(Debug, Clone, Copy)]
pub(crate) enum AuthStyle {
    /// `Authorization: Bearer <api_key>`.
    Bearer,
    /// `api-key: <api_key>` (Azure OpenAI's convention).
    ApiKeyHeader,
}

/// Static shape describing one OpenAI-compatible provider variant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenAiCompatibleProfile {
    pub name: &'static str,
    pub default_base_url: &'static str,
    pub default_model: &'static str,
    pub fallback_dimension: usize,
    pub auth: AuthStyle,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

/// An [`EmbeddingProvider`] speaking the OpenAI-compatible embeddings
/// request/response shape against a configurable endpoint.
pub(crate) struct HttpEmbeddingProvider {
    client: reqwest::Client,
    profile: OpenAiCompatibleProfile,
    model: String,
    api_key: String,
    base_url: String,
}

impl HttpEmbeddingProvider {
    pub(crate) fn new(profile: OpenAiCompatibleProfile, config: &mcb_domain::value_objects::EmbeddingProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::config(format!("{} provider requires api_key", profile.name)))?;
        Ok(Self {
            client: reqwest::Client::new(),
            model: config.model.clone().unwrap_or_else(|| profile.default_model.to_owned()),
            base_url: config.base_url.clone().unwrap_or_else(|| profile.default_base_url.to_owned()),
            api_key,
            profile,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}{}", self.base_url, super::constants::OPENAI_COMPATIBLE_EMBEDDINGS_PATH);
        let mut request = self.client.post(&url).json(&EmbeddingsRequest {
            model: &self.model,
            input: texts,
        });
        request = match self.profile.auth {
            AuthStyle::Bearer => request.bearer_auth(&self.api_key),
            AuthStyle::ApiKeyHeader => request.header("api-key", &self.api_key),
        };

        let response = request
            .send()
            .await
            .map_err(|err| Error::provider_with_source(self.profile.name, "embeddings request failed", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::provider(self.profile.name, format!("embeddings request returned {status}: {body}")));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|err| Error::provider_with_source(self.profile.name, "failed to parse embeddings response", err))?;

        if let Some(first) = parsed.data.first() {
            dimension_cache::remember(&self.model, first.embedding.len());
        }

        Ok(parsed.data.into_iter().map(|datum| datum.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        dimension_cache::recall(&self.model).unwrap_or(self.profile.fallback_dimension)
    }

    fn provider_name(&self) -> &str {
        self.profile.name
    }
}

//! Azure OpenAI embedding provider (§4.2), modeled as an OpenAI-compatible
//! endpoint with Azure's `api-key` header convention in place of a bearer
//! token.

use std::sync::Arc;

use linkme::distributed_slice;
use mcb_domain::ports::EmbeddingProvider;
use mcb_domain::registry::{EmbeddingProviderEntry, EMBEDDING_PROVIDERS};

use super::constants::{MICROSOFT_API_BASE_URL, MICROSOFT_DEFAULT_MODEL, MICROSOFT_DIMENSION_DEFAULT};
use super::http_provider::{AuthStyle, HttpEmbeddingProvider, OpenAiCompatibleProfile};

const PROFILE: OpenAiCompatibleProfile = OpenAiCompatibleProfile {
    name: "microsoft",
    default_base_url: MICROSOFT_API_BASE_URL,
    default_model: MICROSOFT_DEFAULT_MODEL,
    fallback_dimension: MICROSOFT_DIMENSION_DEFAULT,
    auth: AuthStyle::ApiKeyHeader,
};

#[distributed_slice(EMBEDDING_PROVIDERS)]
static MICROSOFT_ENTRY: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "microsoft",
    description: "Azure OpenAI text embeddings",
    build: |config| HttpEmbeddingProvider::new(PROFILE, config).map(|provider| Arc::new(provider) as Arc<dyn EmbeddingProvider>).map_err(|err| err.to_string()),
};

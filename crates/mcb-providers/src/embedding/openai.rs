//! OpenAI embedding provider (§4.2): native OpenAI-compatible shape.

use std::sync::Arc;

use linkme::distributed_slice;
use mcb_domain::ports::EmbeddingProvider;
use mcb_domain::registry::{EmbeddingProviderEntry, EMBEDDING_PROVIDERS};

use super::constants::{OPENAI_API_BASE_URL, OPENAI_DEFAULT_MODEL, OPENAI_DIMENSION_SMALL};
use super::http_provider::{AuthStyle, HttpEmbeddingProvider, OpenAiCompatibleProfile};

const PROFILE: OpenAiCompatibleProfile = OpenAiCompatibleProfile {
    name: "openai",
    default_base_url: OPENAI_API_BASE_URL,
    default_model: OPENAI_DEFAULT_MODEL,
    fallback_dimension: OPENAI_DIMENSION_SMALL,
    auth: AuthStyle::Bearer,
};

#[distributed_slice(EMBEDDING_PROVIDERS)]
static OPENAI_ENTRY: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "openai",
    description: "OpenAI embeddings API (text-embedding-3-small/large)",
    build: |config| HttpEmbeddingProvider::new(PROFILE, config).map(|provider| Arc::new(provider) as Arc<dyn EmbeddingProvider>).map_err(|err| err.to_string()),
};

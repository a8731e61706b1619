//! Google Vertex AI embedding provider (§4.2), modeled as an
//! OpenAI-compatible endpoint behind a configurable `base_url` (see
//! [`super::http_provider`] module docs for the simplification rationale).

use std::sync::Arc;

use linkme::distributed_slice;
use mcb_domain::ports::EmbeddingProvider;
use mcb_domain::registry::{EmbeddingProviderEntry, EMBEDDING_PROVIDERS};

use super::constants::{VERTEX_API_BASE_URL, VERTEX_DEFAULT_MODEL, VERTEX_DIMENSION_DEFAULT};
use super::http_provider::{AuthStyle, HttpEmbeddingProvider, OpenAiCompatibleProfile};

const PROFILE: OpenAiCompatibleProfile = OpenAiCompatibleProfile {
    name: "vertex",
    default_base_url: VERTEX_API_BASE_URL,
    default_model: VERTEX_DEFAULT_MODEL,
    fallback_dimension: VERTEX_DIMENSION_DEFAULT,
    auth: AuthStyle::Bearer,
};

#[distributed_slice(EMBEDDING_PROVIDERS)]
static VERTEX_ENTRY: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "vertex",
    description: "Google Vertex AI text embeddings",
    build: |config| HttpEmbeddingProvider::new(PROFILE, config).map(|provider| Arc::new(provider) as Arc<dyn EmbeddingProvider>).map_err(|err| err.to_string()),
};

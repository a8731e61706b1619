//! AWS Bedrock embedding provider (§4.2), modeled as an OpenAI-compatible
//! endpoint behind a configurable `base_url` (see [`super::http_provider`]
//! module docs for the simplification rationale — SigV4 request signing is
//! out of scope).

use std::sync::Arc;

use linkme::distributed_slice;
use mcb_domain::ports::EmbeddingProvider;
use mcb_domain::registry::{EmbeddingProviderEntry, EMBEDDING_PROVIDERS};

use super::constants::{AWS_API_BASE_URL, AWS_DEFAULT_MODEL, AWS_DIMENSION_DEFAULT};
use super::http_provider::{AuthStyle, HttpEmbeddingProvider, OpenAiCompatibleProfile};

const PROFILE: OpenAiCompatibleProfile = OpenAiCompatibleProfile {
    name: "aws",
    default_base_url: AWS_API_BASE_URL,
    default_model: AWS_DEFAULT_MODEL,
    fallback_dimension: AWS_DIMENSION_DEFAULT,
    auth: AuthStyle::Bearer,
};

#[distributed_slice(EMBEDDING_PROVIDERS)]
static AWS_ENTRY: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "aws",
    description: "AWS Bedrock Titan text embeddings",
    build: |config| HttpEmbeddingProvider::new(PROFILE, config).map(|provider| Arc::new(provider) as Arc<dyn EmbeddingProvider>).map_err(|err| err.to_string()),
};

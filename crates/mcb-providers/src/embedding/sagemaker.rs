//! AWS SageMaker embedding provider (§4.2), modeled as an OpenAI-compatible
//! endpoint behind a configurable `base_url` (see [`super::http_provider`]
//! module docs for the simplification rationale).

use std::sync::Arc;

use linkme::distributed_slice;
use mcb_domain::ports::EmbeddingProvider;
use mcb_domain::registry::{EmbeddingProviderEntry, EMBEDDING_PROVIDERS};

use super::constants::{SAGEMAKER_API_BASE_URL, SAGEMAKER_DEFAULT_MODEL, SAGEMAKER_DIMENSION_DEFAULT};
use super::http_provider::{AuthStyle, HttpEmbeddingProvider, OpenAiCompatibleProfile};

const PROFILE: OpenAiCompatibleProfile = OpenAiCompatibleProfile {
    name: "sagemaker",
    default_base_url: SAGEMAKER_API_BASE_URL,
    default_model: SAGEMAKER_DEFAULT_MODEL,
    fallback_dimension: SAGEMAKER_DIMENSION_DEFAULT,
    auth: AuthStyle::Bearer,
};

#[distributed_slice(EMBEDDING_PROVIDERS)]
static SAGEMAKER_ENTRY: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "sagemaker",
    description: "AWS SageMaker-hosted text embedding endpoints",
    build: |config| HttpEmbeddingProvider::new(PROFILE, config).map(|provider| Arc::new(provider) as Arc<dyn EmbeddingProvider>).map_err(|err| err.to_string()),
};

//! Embedding provider configuration (§4.2): the enumerated shape every
//! recognized provider accepts, resolved to a concrete
//! [`crate::ports::EmbeddingProvider`] by the registry in
//! [`crate::registry`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration for constructing an [`crate::ports::EmbeddingProvider`].
///
/// `provider` must match one of [`crate::constants::embedding::RECOGNIZED_PROVIDERS`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingProviderConfig {
    /// Provider identifier, e.g. `"openai"`.
    pub provider: String,
    /// Model name to use for embedding calls.
    pub model: Option<String>,
    /// API key or credential string, if the provider requires one.
    pub api_key: Option<String>,
    /// Override base URL (self-hosted/compatible endpoints).
    pub base_url: Option<String>,
    /// Provider-specific extra key/value configuration.
    pub extra: HashMap<String, String>,
}

crate::impl_config_builder!(EmbeddingProviderConfig {
    /// Set the model name.
    model: with_model(into String),
    /// Set the API key.
    api_key: with_api_key(into String),
    /// Set the base URL override.
    base_url: with_base_url(into String),
});

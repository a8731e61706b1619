//! Deserializable configuration shape loaded by [`super::loader`].

use mcb_domain::value_objects::EmbeddingProviderConfig;
use serde::{Deserialize, Serialize};

/// Top-level application configuration (§10.3): store location override,
/// pipeline scheduling, and embedding provider selection. Every field has
/// a default so an empty/absent config file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the data directory otherwise resolved by
    /// [`super::paths::data_dir`]. Equivalent to setting
    /// `DOCS_MCP_STORE_PATH`, but settable from a config file; the
    /// environment variable still wins if both are present; see
    /// [`super::loader::ConfigLoader::load`].
    pub data_dir: Option<String>,
    /// Fixed pipeline worker concurrency (§4.6.4).
    pub concurrency: usize,
    /// Whether `PipelineManager::start` performs crash recovery
    /// (§4.6.3).
    pub recover_on_start: bool,
    /// Embedding provider selection and credentials (§4.2).
    pub embedding: EmbeddingProviderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            concurrency: mcb_domain::constants::CONCURRENCY_DEFAULT,
            recover_on_start: true,
            embedding: EmbeddingProviderConfig::default(),
        }
    }
}

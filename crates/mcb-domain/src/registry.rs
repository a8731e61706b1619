//! Compile-time embedding-provider registry (§4.2, §9 design note).
//!
//! Concrete providers (in `mcb-providers`) register themselves into
//! [`EMBEDDING_PROVIDERS`] via `#[linkme::distributed_slice]`; callers
//! resolve a provider by name through [`resolve_embedding_provider`]
//! without the domain crate knowing about any concrete implementation.

use crate::ports::EmbeddingProvider;
use crate::value_objects::EmbeddingProviderConfig;

crate::impl_registry!(
    provider_trait: EmbeddingProvider,
    config_type: EmbeddingProviderConfig,
    entry_type: EmbeddingProviderEntry,
    slice_name: EMBEDDING_PROVIDERS,
    resolve_fn: resolve_embedding_provider,
    list_fn: list_embedding_providers
);

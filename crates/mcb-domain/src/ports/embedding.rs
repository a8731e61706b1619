//! Embedding Provider port (C2).
//!
//! Providers enumerate their configuration as `{provider, model,
//! credentials, baseURL?}`; the Store — not the provider — owns batching
//! policy (§4.3).

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::value_objects::Embedding;

/// Maps text to a fixed-width dense vector, batched.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single query string.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let vectors = self.embed_documents(std::slice::from_ref(&text.to_owned())).await?;
        vectors
            .into_iter()
            .next()
            .ok_or_else(|| Error::provider(self.provider_name(), "no embedding returned"))
    }

    /// Embed a batch of texts, preserving order. Callers (the Document
    /// Store) may split large batches into sub-batches; this method does
    /// not itself enforce `BATCH_COUNT`/`BATCH_CHARS`.
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// The model's native output dimension (`D_model`).
    fn dimensions(&self) -> usize;

    /// Identifier of the underlying provider (e.g. `"openai"`).
    fn provider_name(&self) -> &str;

    /// Cheap liveness probe; default implementation embeds a short probe
    /// string.
    async fn health_check(&self) -> Result<()> {
        self.embed_query("health check").await?;
        Ok(())
    }

    /// Pad a raw embedding to the store's fixed vector width.
    fn to_store_embedding(&self, vector: Vec<f32>, store_dimensions: usize) -> Result<Embedding> {
        Embedding::padded(vector, self.provider_name(), store_dimensions)
    }
}

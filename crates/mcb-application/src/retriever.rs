//! Document Retriever (§4.7): a thin wrapper over the Store's hybrid
//! search that rehydrates a coherent excerpt per hit from its hierarchy
//! neighbors, then deduplicates and re-ranks by URL.

use std::collections::HashMap;
use std::sync::Arc;

use mcb_domain::entities::Document;
use mcb_domain::error::Result;
use mcb_domain::ports::DocumentStore;
use mcb_domain::value_objects::{DocumentId, RetrievedResult};

/// Number of preceding/subsequent sibling chunks pulled in on each side
/// of a hit to rehydrate surrounding context.
const SIBLING_CONTEXT: usize = 2;
/// Number of child chunks pulled in to include nested content under a
/// hit's heading.
const CHILD_CONTEXT: usize = 5;

/// Per-URL accumulator: every chunk contributing to this URL's excerpt,
/// deduplicated by id, plus the best (highest) score among the hits that
/// touched it.
struct UrlAggregate {
    chunks: HashMap<DocumentId, Document>,
    best_score: f32,
}

/// Context-expanded hybrid search, built on [`DocumentStore::find_by_content`]
/// and the hierarchy navigation operations (§4.3 op 10).
pub struct DocumentRetriever {
    store: Arc<dyn DocumentStore>,
}

impl DocumentRetriever {
    /// Wrap `store` for context-expanded search.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Hybrid search scoped to `(library, version)`, expanded to coherent
    /// per-URL excerpts (§4.7).
    ///
    /// 1. `find_by_content` produces up to `limit` fused hits.
    /// 2. Each hit is expanded with its preceding/subsequent siblings and
    ///    child chunks (same URL, same or nested section).
    /// 3. Expanded chunks are grouped and deduplicated by URL; each URL's
    ///    final content is its unique chunks joined in `sort_order`.
    /// 4. Results are ordered by the best RRF score contributing to their
    ///    URL, truncated to `limit`.
    pub async fn search(
        &self,
        library: &str,
        version: Option<&str>,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedResult>> {
        let hits = self.store.find_by_content(library, version, query, limit).await?;

        let mut by_url: HashMap<String, UrlAggregate> = HashMap::new();

        for hit in &hits {
            let expanded = self.expand(library, version, &hit.document).await?;
            let aggregate = by_url
                .entry(hit.document.url.clone())
                .or_insert_with(|| UrlAggregate {
                    chunks: HashMap::new(),
                    best_score: hit.score,
                });
            aggregate.best_score = aggregate.best_score.max(hit.score);
            for chunk in expanded {
                aggregate.chunks.entry(chunk.id).or_insert(chunk);
            }
        }

        let mut results: Vec<RetrievedResult> = by_url
            .into_values()
            .map(|aggregate| {
                let mut chunks: Vec<Document> = aggregate.chunks.into_values().collect();
                chunks.sort_by_key(|d| d.sort_order);
                let url = chunks
                    .first()
                    .map(|d| d.url.clone())
                    .unwrap_or_default();
                let content = chunks
                    .into_iter()
                    .map(|d| d.content)
                    .collect::<Vec<_>>()
                    .join("\n\n");
                RetrievedResult {
                    url,
                    content,
                    score: aggregate.best_score,
                }
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);
        Ok(results)
    }

    /// Rehydrate `reference`'s excerpt: itself, its preceding/subsequent
    /// siblings, and its direct children.
    async fn expand(
        &self,
        library: &str,
        version: Option<&str>,
        reference: &Document,
    ) -> Result<Vec<Document>> {
        let mut chunks = Vec::with_capacity(1 + 2 * SIBLING_CONTEXT + CHILD_CONTEXT);
        chunks.push(reference.clone());

        chunks.extend(
            self.store
                .find_preceding_siblings(library, version, reference.id, SIBLING_CONTEXT)
                .await?,
        );
        chunks.extend(
            self.store
                .find_subsequent_siblings(library, version, reference.id, SIBLING_CONTEXT)
                .await?,
        );
        chunks.extend(
            self.store
                .find_child_chunks(library, version, reference.id, CHILD_CONTEXT)
                .await?,
        );

        Ok(chunks)
    }
}

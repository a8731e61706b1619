//! Process-wide embedding-dimension memoization (§9 design note): an
//! append-only cache keyed by model name, populated the first time a
//! provider observes a real response width, consulted by
//! [`super::HttpEmbeddingProvider::dimensions`] before falling back to a
//! well-known or hardcoded default.

use std::sync::OnceLock;

use moka::sync::Cache;

fn cache() -> &'static Cache<String, usize> {
    static CACHE: OnceLock<Cache<String, usize>> = OnceLock::new();
    CACHE.get_or_init(|| Cache::builder().max_capacity(256).build())
}

/// Record the native dimension observed for `model`, if not already known.
pub fn remember(model: &str, dimension: usize) {
    cache().insert(model.to_owned(), dimension);
}

/// Look up a previously observed dimension for `model`.
pub fn recall(model: &str) -> Option<usize> {
    cache().get(model)
}

/// Clear the cache. Test-only: production callers never need to forget an
/// observed dimension, since a model's output width does not change.
#[cfg(test)]
pub fn reset() {
    cache().invalidate_all();
}

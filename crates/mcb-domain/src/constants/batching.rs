//! Batching policy owned by the Document Store (§4.3 op 2), not the
//! embedding provider.

/// Default maximum number of texts per `embedDocuments` call.
pub const BATCH_COUNT_DEFAULT: usize = 100;
/// Environment variable overriding [`BATCH_COUNT_DEFAULT`].
pub const BATCH_COUNT_ENV: &str = "DOCS_STORE_BATCH_COUNT";

/// Default maximum total input characters per `embedDocuments` call.
pub const BATCH_CHARS_DEFAULT: usize = 50_000;
/// Environment variable overriding [`BATCH_CHARS_DEFAULT`].
pub const BATCH_CHARS_ENV: &str = "DOCS_STORE_BATCH_CHARS";

/// Resolve the effective batch-count limit, honoring the environment
/// override if set and parseable.
pub fn batch_count_limit() -> usize {
    std::env::var(BATCH_COUNT_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(BATCH_COUNT_DEFAULT)
}

/// Resolve the effective batch-chars limit, honoring the environment
/// override if set and parseable.
pub fn batch_chars_limit() -> usize {
    std::env::var(BATCH_CHARS_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(BATCH_CHARS_DEFAULT)
}

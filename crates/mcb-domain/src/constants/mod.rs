//! Domain-level constants.
//!
//! These are algorithmic invariants and documented defaults, not
//! operational config — operational overrides belong to the
//! infrastructure layer's config loader.

/// Embedding batching policy (`BATCH_COUNT`, `BATCH_CHARS`).
pub mod batching;
/// Recognized embedding provider identifiers.
pub mod embedding;
/// Scheduling, fuzzy-suggestion and splitter-size constants.
pub mod pipeline;
/// Store vector width and data-path layout constants.
pub mod store;

pub use batching::{
    batch_chars_limit, batch_count_limit, BATCH_CHARS_DEFAULT, BATCH_CHARS_ENV,
    BATCH_COUNT_DEFAULT, BATCH_COUNT_ENV,
};
pub use pipeline::{
    CONCURRENCY_DEFAULT, LIBRARY_SUGGESTION_COUNT, LIBRARY_SUGGESTION_THRESHOLD,
    SPLITTER_MAX_CHARS, SPLITTER_MIN_CHARS, SPLITTER_PREFERRED_CHARS,
};
pub use store::{D_STORE_DEFAULT, INSTALLATION_ID_FILE, STORE_DB_FILE, STORE_PATH_ENV};

//! Pipeline Manager scheduling constants (§4.6.4).

/// Default fixed worker concurrency.
pub const CONCURRENCY_DEFAULT: usize = 3;

/// Number of fuzzy library-name suggestions surfaced by
/// `validateLibraryExists`.
pub const LIBRARY_SUGGESTION_COUNT: usize = 3;

/// Minimum Jaro-Winkler similarity for a library name to be suggested.
pub const LIBRARY_SUGGESTION_THRESHOLD: f64 = 0.4;

/// Splitter defaults (§4.1), characters.
pub const SPLITTER_PREFERRED_CHARS: usize = 1500;
/// Hard cap on chunk size, characters.
pub const SPLITTER_MAX_CHARS: usize = 3000;
/// Minimum chunk size below which adjacent chunks coalesce, characters.
pub const SPLITTER_MIN_CHARS: usize = 500;

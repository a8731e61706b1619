//! Error handling types.
//!
//! The taxonomy follows the error-kind grouping in the design: validation,
//! not-found, illegal state transitions, cooperative cancellation, storage
//! I/O, embedding-dimension overflow, and provider/config failures.

use thiserror::Error;

/// Result type alias for operations that can fail.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the indexing pipeline and document store.
#[derive(Error, Debug)]
pub enum Error {
    /// A document or request failed basic validation (e.g. missing URL).
    #[error("validation error: {message}")]
    Validation {
        /// Description of what failed validation.
        message: String,
    },

    /// The named library is not known to the store.
    #[error("library not found: {name}")]
    LibraryNotFound {
        /// The library name that was not found.
        name: String,
        /// Up to 3 fuzzy-matched suggestions drawn from known library names.
        suggestions: Vec<String>,
    },

    /// No version satisfies the requested selector and no unversioned
    /// fallback exists.
    #[error("version not found for library '{library}': {detail}")]
    VersionNotFound {
        /// The library the version lookup was scoped to.
        library: String,
        /// Human-readable detail, normally a rendering of available versions.
        detail: String,
    },

    /// A job id does not correspond to any tracked job.
    #[error("job not found: {id}")]
    JobNotFound {
        /// The job id that was not found.
        id: String,
    },

    /// An illegal job state transition was attempted.
    #[error("illegal job transition: {from} -> {to}")]
    IllegalTransition {
        /// The state the job was in.
        from: String,
        /// The state the transition attempted to reach.
        to: String,
    },

    /// A second concurrent wait was attempted on the same remote job id.
    #[error("already waiting for completion of job {id}")]
    DuplicateWait {
        /// The job id already being awaited.
        id: String,
    },

    /// Cooperative cancellation was observed. Not an error from the
    /// perspective of `waitForJobCompletion` consumers; callers that need
    /// that behavior should match on this variant explicitly.
    #[error("job cancelled: {message}")]
    Cancelled {
        /// Context describing when cancellation was observed.
        message: String,
    },

    /// Storage I/O failure (filesystem, connection, driver-level).
    #[error("storage connection error: {message}")]
    Connection {
        /// Description of the connection/I/O failure.
        message: String,
        /// Optional source error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A store invariant was violated (missing URL, failed id resolution).
    #[error("store error: {message}")]
    Store {
        /// Description of the invariant violation.
        message: String,
    },

    /// An embedding vector's native dimension exceeds the store's fixed
    /// vector width.
    #[error("embedding dimension {model} exceeds store width {store}")]
    Dimension {
        /// The model's native dimension.
        model: usize,
        /// The store's fixed vector width.
        store: usize,
    },

    /// Provider configuration is missing required fields (credentials,
    /// unknown provider name).
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },

    /// An upstream embedding/scraper provider call failed.
    #[error("provider error ({provider}): {message}")]
    Provider {
        /// Name of the provider that failed.
        provider: String,
        /// Description of the failure.
        message: String,
        /// Optional source error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Internal invariant violation that should not be reachable.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl Error {
    /// Create a validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a library-not-found error with fuzzy suggestions.
    pub fn library_not_found<S: Into<String>>(name: S, suggestions: Vec<String>) -> Self {
        Self::LibraryNotFound {
            name: name.into(),
            suggestions,
        }
    }

    /// Create a version-not-found error.
    pub fn version_not_found<S: Into<String>, D: Into<String>>(library: S, detail: D) -> Self {
        Self::VersionNotFound {
            library: library.into(),
            detail: detail.into(),
        }
    }

    /// Create a job-not-found error.
    pub fn job_not_found<S: Into<String>>(id: S) -> Self {
        Self::JobNotFound { id: id.into() }
    }

    /// Create an illegal-transition error.
    pub fn illegal_transition<S: Into<String>>(from: S, to: S) -> Self {
        Self::IllegalTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a cancellation outcome.
    pub fn cancelled<S: Into<String>>(message: S) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    /// Create a connection/storage I/O error.
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection/storage I/O error with a source.
    pub fn connection_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a store invariant error.
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a dimension-overflow error.
    pub fn dimension(model: usize, store: usize) -> Self {
        Self::Dimension { model, store }
    }

    /// Create a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a provider error.
    pub fn provider<P: Into<String>, S: Into<String>>(provider: P, message: S) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a provider error with a source.
    pub fn provider_with_source<P, S, E>(provider: P, message: S, source: E) -> Self
    where
        P: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error.
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error represents cooperative cancellation rather than
    /// a genuine failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

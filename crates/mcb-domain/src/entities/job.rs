//! Job entity: in-memory pipeline job state, mirrored to a Version row
//! via write-through (§4.6).
//!
//! The cancellation token and completion signal are runtime control
//! structures owned by the Pipeline Manager implementation, not by this
//! entity — the domain models only the data that is serializable and
//! mirrored to durable storage.

use serde::{Deserialize, Serialize};

use crate::value_objects::{JobId, PersistedScraperOptions, ScraperProgress};

/// Lifecycle status of a Job. See §4.6 for the full transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Waiting to be picked up by the scheduler.
    Queued,
    /// Currently executing.
    Running,
    /// Running, but a cancellation has been requested; the Worker will
    /// observe it at the next checkpoint.
    Cancelling,
    /// Completed successfully.
    Completed,
    /// Terminated with an error.
    Failed,
    /// Cancelled before or during execution.
    Cancelled,
}

impl JobStatus {
    /// Returns `true` if this status is terminal (no further transitions
    /// except DB-mirror retry transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Returns `true` if a job in this status counts toward the
    /// at-most-one-active-job-per-key invariant (P1).
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Queued | Self::Running | Self::Cancelling)
    }

    /// Whether `self -> next` is an allowed transition per the state
    /// machine in §4.6 (ignoring the DB-mirror-only `Updating` state,
    /// which never appears on the in-memory Job).
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        use JobStatus::{Cancelled, Cancelling, Completed, Failed, Queued, Running};
        matches!(
            (self, next),
            (Queued, Running)
                | (Queued, Cancelled)
                | (Running, Completed)
                | (Running, Failed)
                | (Running, Cancelled)
                | (Running, Cancelling)
                | (Cancelling, Cancelled)
                | (Failed, Queued)
                | (Cancelled, Queued)
        )
    }
}

/// A background job driving one `(library, version)` indexing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Durable identifier.
    pub id: JobId,
    /// Library name (lowercased).
    pub library: String,
    /// Version name, normalized ("" for unversioned).
    pub version: String,
    /// Current lifecycle status.
    pub status: JobStatus,
    /// Most recent scraper progress event, if any.
    pub progress: Option<ScraperProgress>,
    /// Terminal error message, if the job failed.
    pub error: Option<String>,
    /// Creation timestamp (Unix epoch seconds).
    pub created_at: i64,
    /// Start timestamp, once running (Unix epoch seconds).
    pub started_at: Option<i64>,
    /// Terminal timestamp, once in a terminal state (Unix epoch seconds).
    pub finished_at: Option<i64>,
    /// Seed URL for this run.
    pub source_url: String,
    /// Scraper options used for this run.
    pub scraper_options: Option<PersistedScraperOptions>,
}

impl Job {
    /// Create a new job in `Queued` status.
    pub fn new(
        id: JobId,
        library: impl Into<String>,
        version: impl Into<String>,
        source_url: impl Into<String>,
        scraper_options: Option<PersistedScraperOptions>,
        now: i64,
    ) -> Self {
        Self {
            id,
            library: library.into(),
            version: version.into(),
            status: JobStatus::Queued,
            progress: None,
            error: None,
            created_at: now,
            started_at: None,
            finished_at: None,
            source_url: source_url.into(),
            scraper_options,
        }
    }

    /// The `(library, version)` key this job is scoped to.
    pub fn key(&self) -> (&str, &str) {
        (&self.library, &self.version)
    }
}

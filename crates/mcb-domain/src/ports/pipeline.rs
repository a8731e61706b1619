//! Pipeline capability set (§9 design note): both a local scheduler
//! (Pipeline Manager, C6) and a remote RPC proxy implement `IPipeline`,
//! letting callers stay agnostic of deployment topology.

use async_trait::async_trait;

use crate::entities::{Job, JobStatus};
use crate::error::Result;
use crate::value_objects::{JobId, PersistedScraperOptions, ScraperProgress};

/// Progress/status/error hooks a caller can register on a pipeline.
/// Registering callbacks never disables the write-through mirror to
/// durable Version state — that chain runs unconditionally before these
/// are invoked (§4.6).
pub trait PipelineCallbacks: Send + Sync {
    /// Called once per scraper progress event for a running job.
    fn on_job_progress(&self, _job: &Job, _progress: &ScraperProgress) {}

    /// Called whenever a job's status changes.
    fn on_job_status_change(&self, _job: &Job, _previous: JobStatus) {}

    /// Called when storing an individual document fails; the job
    /// continues (per-document errors never fail the job).
    fn on_job_error(&self, _job: &Job, _error: &crate::error::Error, _document_url: Option<&str>) {
    }
}

/// Capability set shared by the local Pipeline Manager and a Remote
/// Pipeline Client proxy (§6).
#[async_trait]
pub trait IPipeline: Send + Sync {
    /// Idempotent start: performs crash recovery if enabled, then begins
    /// consuming the queue.
    async fn start(&self) -> Result<()>;

    /// Stop pulling new jobs. Does not cancel jobs already running.
    async fn stop(&self) -> Result<()>;

    /// Enqueue a job for `(library, version)`, cancelling and awaiting
    /// any existing active job for the same key first.
    async fn enqueue_job(
        &self,
        library: &str,
        version: Option<&str>,
        options: Option<PersistedScraperOptions>,
        source_url: &str,
    ) -> Result<JobId>;

    /// Reconstruct scraper options from durable storage and enqueue.
    /// Fails with [`crate::error::Error::NotFound`]-style errors if no
    /// source URL was ever stored for this version.
    async fn enqueue_job_with_stored_options(
        &self,
        library: &str,
        version: Option<&str>,
    ) -> Result<JobId>;

    /// Fetch a job by id.
    async fn get_job(&self, id: JobId) -> Option<Job>;

    /// List tracked jobs, optionally filtered by status.
    async fn get_jobs(&self, status: Option<JobStatus>) -> Vec<Job>;

    /// Cancel a queued or running job. Terminal jobs are a no-op.
    async fn cancel_job(&self, id: JobId) -> Result<()>;

    /// Purge terminal jobs from the in-memory map; returns the count
    /// purged.
    async fn clear_completed_jobs(&self) -> usize;

    /// Await a job's terminal outcome. Returns normally if the job ended
    /// `Cancelled`; returns the original error if it ended `Failed`.
    async fn wait_for_job_completion(&self, id: JobId) -> Result<()>;

    /// Register progress/status/error callbacks.
    fn set_callbacks(&self, callbacks: std::sync::Arc<dyn PipelineCallbacks>);
}

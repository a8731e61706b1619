//! Pipeline Manager (C6): job scheduling, crash recovery, cancellation,
//! and the write-through mirror from in-memory [`Job`] state to durable
//! [`VersionStatus`] rows (§4.6).
//!
//! Owns no network/storage code itself — it drives a [`DocumentStore`]
//! and [`Scraper`] through the Worker (`super::worker::execute_job`) and
//! tracks jobs in an in-memory map. At most one active job per
//! `(library, version)` key is enforced by cancelling and awaiting any
//! existing active job before enqueuing a new one (P1).
//!
//! All shared state lives behind `Arc<Inner>` so that scheduling tasks
//! spawned via `tokio::spawn` can hold a cheap clone instead of a
//! `'static` borrow of the manager itself.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use futures::future::BoxFuture;
use mcb_domain::entities::{Job, JobStatus, Library, Version};
use mcb_domain::error::{Error, Result};
use mcb_domain::ports::{DocumentStore, IPipeline, PipelineCallbacks, Scraper};
use mcb_domain::value_objects::{
    CancellationToken, JobId, PersistedScraperOptions, ScraperOptions, ScraperProgress,
    VersionStatus,
};
use tracing::{error, info, warn};

use super::signal::{CompletionSignal, JobOutcome};
use super::worker::{execute_job, DocumentErrorHook, ProgressHook};

/// Configuration for a [`PipelineManager`].
#[derive(Debug, Clone)]
pub struct PipelineManagerConfig {
    /// Maximum number of jobs running concurrently.
    pub concurrency: usize,
    /// Whether `start()` resets `running`/`queued` versions and
    /// re-enqueues them (§4.6.3, crash recovery).
    pub recover_on_start: bool,
}

impl Default for PipelineManagerConfig {
    fn default() -> Self {
        Self {
            concurrency: mcb_domain::constants::pipeline::CONCURRENCY_DEFAULT,
            recover_on_start: true,
        }
    }
}

/// Everything tracked in memory for one job.
struct JobEntry {
    job: Job,
    cancellation: CancellationToken,
    signal: CompletionSignal,
}

struct Inner {
    store: Arc<dyn DocumentStore>,
    scraper: Arc<dyn Scraper>,
    config: PipelineManagerConfig,
    jobs: RwLock<HashMap<JobId, JobEntry>>,
    active_count: AtomicUsize,
    running: AtomicBool,
    callbacks: RwLock<Option<Arc<dyn PipelineCallbacks>>>,
}

impl Inner {
    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn callbacks_snapshot(&self) -> Option<Arc<dyn PipelineCallbacks>> {
        self.callbacks.read().expect("callbacks lock poisoned").clone()
    }

    fn scraper_options_for(job: &Job) -> ScraperOptions {
        let mut options = ScraperOptions::new(&job.source_url, &job.library, &job.version);
        if let Some(ref p) = job.scraper_options {
            options.max_pages = p.max_pages;
            options.max_depth = p.max_depth;
            options.max_concurrency = p.max_concurrency;
            options.scope = p.scope;
            options.follow_redirects = p.follow_redirects;
            options.ignore_errors = p.ignore_errors;
            options.include_patterns = p.include_patterns.clone();
            options.exclude_patterns = p.exclude_patterns.clone();
            options.exclude_selectors = p.exclude_selectors.clone();
            options.headers = p.headers.clone();
            options.scrape_mode = p.scrape_mode;
        }
        options
    }

    /// Validated status transition + write-through + status-change
    /// callback. Returns the updated job snapshot.
    async fn transition(
        self: &Arc<Self>,
        job_id: JobId,
        next: JobStatus,
        error_message: Option<String>,
    ) -> Result<Job> {
        let (previous, library, version, updated) = {
            let mut jobs = self.jobs.write().expect("jobs lock poisoned");
            let entry = jobs
                .get_mut(&job_id)
                .ok_or_else(|| Error::job_not_found(job_id.as_str()))?;
            let previous = entry.job.status;
            if !previous.can_transition_to(next) {
                return Err(Error::illegal_transition(
                    format!("{previous:?}"),
                    format!("{next:?}"),
                ));
            }
            entry.job.status = next;
            if next == JobStatus::Running && entry.job.started_at.is_none() {
                entry.job.started_at = Some(Self::now());
            }
            if next.is_terminal() {
                entry.job.finished_at = Some(Self::now());
            }
            if let Some(ref msg) = error_message {
                entry.job.error = Some(msg.clone());
            }
            let (library, version) = entry.job.key();
            (previous, library.to_owned(), version.to_owned(), entry.job.clone())
        };

        self.write_through(&library, &version, next, error_message.as_deref())
            .await;

        if let Some(callbacks) = self.callbacks_snapshot() {
            callbacks.on_job_status_change(&updated, previous);
        }

        Ok(updated)
    }

    /// Mirror `status` onto the durable Version row. Failures are logged
    /// and swallowed — the in-memory Job state is authoritative for a
    /// running manager; the durable row only matters for crash recovery
    /// and the `listLibraries`/`queryLibraryVersions` surface.
    async fn write_through(
        &self,
        library: &str,
        version: &str,
        status: JobStatus,
        error_message: Option<&str>,
    ) {
        let durable = match status {
            JobStatus::Queued => VersionStatus::Queued,
            JobStatus::Running | JobStatus::Cancelling => VersionStatus::Running,
            JobStatus::Completed => VersionStatus::Completed,
            JobStatus::Failed => VersionStatus::Failed,
            JobStatus::Cancelled => VersionStatus::Cancelled,
        };
        let version_id = match self.store.resolve_ids(library, Some(version)).await {
            Ok((_, version_id)) => version_id,
            Err(err) => {
                warn!(%library, %version, error = %err, "write-through: failed to resolve version id");
                return;
            }
        };
        if let Err(err) = self
            .store
            .update_version_status(version_id, durable, error_message)
            .await
        {
            warn!(%library, %version, error = %err, "write-through: failed to mirror version status");
        }
    }

    /// Pull as many `Queued` jobs as there is spare concurrency for and
    /// spawn a worker task per job (`_processQueue`, §4.6.4).
    async fn process_queue(self: &Arc<Self>) {
        if !self.running.load(Ordering::SeqCst) {
            return;
        }
        loop {
            let next = {
                let jobs = self.jobs.read().expect("jobs lock poisoned");
                if self.active_count.load(Ordering::SeqCst) >= self.config.concurrency {
                    None
                } else {
                    jobs.values()
                        .filter(|e| e.job.status == JobStatus::Queued)
                        .min_by_key(|e| e.job.created_at)
                        .map(|e| e.job.id)
                }
            };
            let Some(id) = next else { break };
            self.active_count.fetch_add(1, Ordering::SeqCst);
            let inner = Arc::clone(self);
            tokio::spawn(async move {
                inner.run_job(id).await;
                inner.active_count.fetch_sub(1, Ordering::SeqCst);
                inner.process_queue().await;
            });
        }
    }

    /// Drive one job from `Running` through to a terminal state,
    /// resolving its completion signal and notifying callbacks.
    async fn run_job(self: &Arc<Self>, id: JobId) {
        let (library, version, options, cancellation) = {
            let jobs = self.jobs.read().expect("jobs lock poisoned");
            let Some(entry) = jobs.get(&id) else { return };
            let options = Self::scraper_options_for(&entry.job);
            (
                entry.job.library.clone(),
                entry.job.version.clone(),
                options,
                entry.cancellation.clone(),
            )
        };

        if self.transition(id, JobStatus::Running, None).await.is_err() {
            return;
        }

        let progress_hook = self.progress_hook(id);
        let document_error_hook = self.document_error_hook(id);

        let result = execute_job(
            &self.store,
            &self.scraper,
            &library,
            &version,
            &options,
            &cancellation,
            progress_hook,
            document_error_hook,
        )
        .await;

        let (mut outcome, mut next_status, mut error_message) = match result {
            Ok(()) => (JobOutcome::Completed, JobStatus::Completed, None),
            Err(err) if err.is_cancellation() => {
                (JobOutcome::Cancelled, JobStatus::Cancelled, None)
            }
            Err(err) => (JobOutcome::Failed, JobStatus::Failed, Some(err.to_string())),
        };

        // `Cancelling -> Completed/Failed` is not a legal transition
        // (§4.6); a job cancelled mid-scrape must land on `Cancelled`
        // regardless of how the Worker returned.
        let was_cancelling = self
            .jobs
            .read()
            .expect("jobs lock poisoned")
            .get(&id)
            .map(|e| e.job.status == JobStatus::Cancelling)
            .unwrap_or(false);
        if was_cancelling {
            outcome = JobOutcome::Cancelled;
            next_status = JobStatus::Cancelled;
            error_message = None;
        }

        match self.transition(id, next_status, error_message.clone()).await {
            Ok(updated) => {
                if next_status == JobStatus::Failed {
                    let err = error_message
                        .clone()
                        .map(Error::internal)
                        .unwrap_or_else(|| Error::internal("unknown failure"));
                    if let Some(callbacks) = self.callbacks_snapshot() {
                        callbacks.on_job_error(&updated, &err, None);
                    }
                    error!(%library, %version, job_id = %id, error = ?error_message, "job failed");
                } else {
                    info!(%library, %version, job_id = %id, status = ?next_status, "job finished");
                }
            }
            Err(err) => {
                warn!(%library, %version, job_id = %id, error = %err, "failed to record terminal job status");
            }
        }

        if let Some(entry) = self.jobs.read().expect("jobs lock poisoned").get(&id) {
            entry.signal.resolve(outcome);
        }
    }

    fn progress_hook(self: &Arc<Self>, id: JobId) -> ProgressHook {
        let inner = Arc::clone(self);
        Arc::new(move |progress: ScraperProgress| -> BoxFuture<'static, ()> {
            let inner = Arc::clone(&inner);
            Box::pin(async move {
                let updated = {
                    let mut jobs = inner.jobs.write().expect("jobs lock poisoned");
                    let Some(entry) = jobs.get_mut(&id) else {
                        return;
                    };
                    entry.job.progress = Some(progress.clone());
                    entry.job.clone()
                };

                if let Ok((_, version_id)) = inner
                    .store
                    .resolve_ids(&updated.library, Some(&updated.version))
                    .await
                {
                    if let Err(err) = inner
                        .store
                        .update_version_progress(
                            version_id,
                            progress.pages_scraped,
                            progress.total_pages,
                        )
                        .await
                    {
                        warn!(
                            library = %updated.library,
                            version = %updated.version,
                            error = %err,
                            "write-through: failed to mirror progress"
                        );
                    }
                }

                if let Some(cb) = inner.callbacks_snapshot() {
                    cb.on_job_progress(&updated, &progress);
                }
            })
        })
    }

    fn document_error_hook(self: &Arc<Self>, id: JobId) -> DocumentErrorHook {
        let inner = Arc::clone(self);
        Arc::new(move |err: Error, url: String| {
            let job = inner
                .jobs
                .read()
                .expect("jobs lock poisoned")
                .get(&id)
                .map(|e| e.job.clone());
            if let Some(job) = job {
                warn!(job_id = %id, url, error = %err, "failed to store scraped document");
                if let Some(cb) = inner.callbacks_snapshot() {
                    cb.on_job_error(&job, &err, Some(url.as_str()));
                }
            }
        })
    }

    /// Cancel and await completion of any existing active job for `key`,
    /// enforcing the at-most-one-active-job-per-key invariant (P1).
    async fn cancel_active_job_for_key(self: &Arc<Self>, library: &str, version: &str) {
        let existing = {
            let jobs = self.jobs.read().expect("jobs lock poisoned");
            jobs.values()
                .find(|e| e.job.key() == (library, version) && e.job.status.is_active())
                .map(|e| (e.job.id, e.signal.waiter()))
        };
        if let Some((id, waiter)) = existing {
            info!(%library, %version, job_id = %id, "cancelling existing active job before re-enqueue");
            let _ = self.cancel_job_inner(id).await;
            self.process_queue().await;
            let _ = waiter.wait().await;
        }
    }

    async fn cancel_job_inner(self: &Arc<Self>, id: JobId) -> Result<()> {
        let status = {
            let jobs = self.jobs.read().expect("jobs lock poisoned");
            jobs.get(&id).map(|e| e.job.status)
        };
        let Some(status) = status else {
            return Err(Error::job_not_found(id.as_str()));
        };
        if status.is_terminal() {
            return Ok(());
        }
        {
            let jobs = self.jobs.read().expect("jobs lock poisoned");
            if let Some(entry) = jobs.get(&id) {
                entry.cancellation.cancel();
            }
        }
        match status {
            JobStatus::Queued => {
                self.transition(id, JobStatus::Cancelled, None).await?;
                if let Some(entry) = self.jobs.read().expect("jobs lock poisoned").get(&id) {
                    entry.signal.resolve(JobOutcome::Cancelled);
                }
            }
            JobStatus::Running => {
                self.transition(id, JobStatus::Cancelling, None).await?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Insert a freshly-created `Queued` job, persist its scraper options
    /// and source URL, write through the durable status, then trigger
    /// scheduling.
    async fn enqueue(
        self: &Arc<Self>,
        library: &str,
        version: &str,
        source_url: &str,
        persisted: Option<PersistedScraperOptions>,
    ) -> Result<JobId> {
        self.cancel_active_job_for_key(library, version).await;

        let id = JobId::new();
        let job = Job::new(
            id,
            library,
            version,
            source_url,
            persisted.clone(),
            Self::now(),
        );
        let cancellation = CancellationToken::new();
        let (signal, _waiter) = CompletionSignal::new();

        self.jobs.write().expect("jobs lock poisoned").insert(
            id,
            JobEntry {
                job,
                cancellation,
                signal,
            },
        );

        if let Ok((_, version_id)) = self.store.resolve_ids(library, Some(version)).await {
            let payload = persisted.unwrap_or_default();
            if let Err(err) = self
                .store
                .store_scraper_options(version_id, source_url, &payload)
                .await
            {
                warn!(%library, %version, error = %err, "failed to persist scraper options");
            }
        }
        self.write_through(library, version, JobStatus::Queued, None)
            .await;

        self.process_queue().await;
        Ok(id)
    }

    /// Crash recovery (§4.6.3): reset `running`/`queued` Version rows to
    /// `queued` and materialize+enqueue a [`Job`] for each, using its
    /// last-stored scraper options.
    async fn recover_pending_jobs(self: &Arc<Self>) {
        let pending = match self
            .store
            .get_versions_by_status(&[VersionStatus::Running, VersionStatus::Queued])
            .await
        {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, "crash recovery: failed to list pending versions");
                return;
            }
        };

        for row in pending {
            let stored = match self.store.get_scraper_options(row.version_id).await {
                Ok(Some(stored)) => stored,
                Ok(None) => {
                    warn!(
                        library = %row.library, version = %row.version,
                        "crash recovery: no stored source url, skipping"
                    );
                    continue;
                }
                Err(err) => {
                    warn!(
                        library = %row.library, version = %row.version, error = %err,
                        "crash recovery: failed to load scraper options"
                    );
                    continue;
                }
            };

            if let Err(err) = self
                .store
                .update_version_status(row.version_id, VersionStatus::Queued, None)
                .await
            {
                warn!(
                    library = %row.library, version = %row.version, error = %err,
                    "crash recovery: failed to reset version status"
                );
            }

            let id = JobId::new();
            let job = Job::new(
                id,
                row.library.clone(),
                row.version.clone(),
                stored.source_url.clone(),
                Some(stored.options),
                Self::now(),
            );
            self.jobs.write().expect("jobs lock poisoned").insert(
                id,
                JobEntry {
                    job,
                    cancellation: CancellationToken::new(),
                    signal: CompletionSignal::new().0,
                },
            );
            info!(
                library = %row.library, version = %row.version, job_id = %id,
                "crash recovery: re-enqueued job"
            );
        }

        self.process_queue().await;
    }
}

/// Local, in-process scheduler implementing [`IPipeline`].
///
/// Jobs are tracked in an `RwLock<HashMap<JobId, JobEntry>>`; scheduling
/// is a fire-and-forget `tokio::spawn` triggered after every enqueue,
/// completion, and cancellation (`_processQueue` in the source design),
/// bounded by `config.concurrency` via an `AtomicUsize` active-worker
/// counter.
#[derive(Clone)]
pub struct PipelineManager {
    inner: Arc<Inner>,
}

impl PipelineManager {
    /// Construct a manager over `store`/`scraper` with `config`. Does not
    /// start consuming the queue — call [`IPipeline::start`] for that.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        scraper: Arc<dyn Scraper>,
        config: PipelineManagerConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                scraper,
                config,
                jobs: RwLock::new(HashMap::new()),
                active_count: AtomicUsize::new(0),
                running: AtomicBool::new(false),
                callbacks: RwLock::new(None),
            }),
        }
    }
}

#[async_trait]
impl IPipeline for PipelineManager {
    async fn start(&self) -> Result<()> {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if self.inner.config.recover_on_start {
            self.inner.recover_pending_jobs().await;
        } else {
            self.inner.process_queue().await;
        }
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.inner.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn enqueue_job(
        &self,
        library: &str,
        version: Option<&str>,
        options: Option<PersistedScraperOptions>,
        source_url: &str,
    ) -> Result<JobId> {
        let library = Library::normalize_name(library);
        let version = Version::normalize_name(version);
        self.inner
            .enqueue(&library, &version, source_url, options)
            .await
    }

    async fn enqueue_job_with_stored_options(
        &self,
        library: &str,
        version: Option<&str>,
    ) -> Result<JobId> {
        let library = Library::normalize_name(library);
        let version = Version::normalize_name(version);
        let (_, version_id) = self.inner.store.resolve_ids(&library, Some(&version)).await?;
        let stored = self
            .inner
            .store
            .get_scraper_options(version_id)
            .await?
            .ok_or_else(|| {
                Error::store(format!(
                    "no stored source url for {library}@{version}; cannot re-index without an explicit url"
                ))
            })?;
        self.inner
            .enqueue(&library, &version, &stored.source_url, Some(stored.options))
            .await
    }

    async fn get_job(&self, id: JobId) -> Option<Job> {
        self.inner
            .jobs
            .read()
            .expect("jobs lock poisoned")
            .get(&id)
            .map(|e| e.job.clone())
    }

    async fn get_jobs(&self, status: Option<JobStatus>) -> Vec<Job> {
        self.inner
            .jobs
            .read()
            .expect("jobs lock poisoned")
            .values()
            .map(|e| &e.job)
            .filter(|j| status.is_none_or(|s| j.status == s))
            .cloned()
            .collect()
    }

    async fn cancel_job(&self, id: JobId) -> Result<()> {
        let outcome = self.inner.cancel_job_inner(id).await;
        self.inner.process_queue().await;
        outcome
    }

    async fn clear_completed_jobs(&self) -> usize {
        let mut jobs = self.inner.jobs.write().expect("jobs lock poisoned");
        let before = jobs.len();
        jobs.retain(|_, e| !e.job.status.is_terminal());
        before - jobs.len()
    }

    async fn wait_for_job_completion(&self, id: JobId) -> Result<()> {
        let waiter = {
            let jobs = self.inner.jobs.read().expect("jobs lock poisoned");
            let entry = jobs
                .get(&id)
                .ok_or_else(|| Error::job_not_found(id.as_str()))?;
            entry.signal.waiter()
        };
        match waiter.wait().await {
            JobOutcome::Completed | JobOutcome::Cancelled => Ok(()),
            JobOutcome::Failed => {
                let message = self
                    .inner
                    .jobs
                    .read()
                    .expect("jobs lock poisoned")
                    .get(&id)
                    .and_then(|e| e.job.error.clone())
                    .unwrap_or_else(|| "job failed".to_owned());
                Err(Error::internal(message))
            }
        }
    }

    fn set_callbacks(&self, callbacks: Arc<dyn PipelineCallbacks>) {
        *self.inner.callbacks.write().expect("callbacks lock poisoned") = Some(callbacks);
    }
}

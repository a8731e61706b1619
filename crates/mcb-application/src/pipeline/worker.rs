//! Pipeline Worker (C5): executes one job to completion, failure, or
//! cancellation.
//!
//! Stateless over `(library, version, dependencies)` — no back-pointer to
//! the Pipeline Manager (§9 design note: "Cyclic ownership risk between
//! Manager and Worker"). The Manager composes the progress/error hooks
//! that close over whatever write-through and user-callback behavior it
//! needs; the Worker only knows how to drive one scrape.

use std::sync::Arc;

use futures::future::BoxFuture;
use mcb_domain::error::{Error, Result};
use mcb_domain::ports::{DocumentStore, ProgressCallback, Scraper};
use mcb_domain::value_objects::{CancellationToken, ScraperOptions, ScraperProgress};

/// Hook invoked for every scraper progress event, composed by the caller
/// (typically: update the in-memory Job's `progress` field, write through
/// to `update_version_progress`, then invoke the user's
/// `PipelineCallbacks::on_job_progress`). Returns a future because the
/// write-through step is itself async.
pub type ProgressHook = Arc<dyn Fn(ScraperProgress) -> BoxFuture<'static, ()> + Send + Sync>;

/// Hook invoked when storing an individual scraped document fails. Does
/// not affect job outcome — per-document errors are ignore-and-continue.
pub type DocumentErrorHook = Arc<dyn Fn(Error, String) + Send + Sync>;

/// Run one job to completion.
///
/// 1. Clears prior chunks for `(library, version)`.
/// 2. Drives `scraper.scrape` with a composed progress callback that:
///    - raises [`Error::Cancelled`] if `cancellation` has been requested
///      (unwinding the scrape),
///    - invokes `on_progress`,
///    - attempts to store any carried document, routing failures to
///      `on_document_error` without failing the job.
/// 3. After the scrape returns, raises [`Error::Cancelled`] if
///    cancellation was requested during the final page.
///
/// Never mutates terminal job status — that is the Manager's
/// responsibility.
pub async fn execute_job(
    store: &Arc<dyn DocumentStore>,
    scraper: &Arc<dyn Scraper>,
    library: &str,
    version: &str,
    options: &ScraperOptions,
    cancellation: &CancellationToken,
    on_progress: ProgressHook,
    on_document_error: DocumentErrorHook,
) -> Result<()> {
    store.delete_documents(library, Some(version)).await?;

    let store_for_cb = Arc::clone(store);
    let library_owned = library.to_owned();
    let version_owned = version.to_owned();
    let cancellation_for_cb = cancellation.clone();

    let progress_cb: ProgressCallback<'_> = Box::new(move |progress: ScraperProgress| {
        let store = Arc::clone(&store_for_cb);
        let library = library_owned.clone();
        let version = version_owned.clone();
        let cancellation = cancellation_for_cb.clone();
        let on_progress = Arc::clone(&on_progress);
        let on_document_error = Arc::clone(&on_document_error);

        Box::pin(async move {
            if cancellation.is_cancelled() {
                return Err(Error::cancelled(
                    "Job cancelled during scraping progress",
                ));
            }

            let document = progress.document.clone();
            on_progress(progress).await;

            if let Some(doc) = document {
                let url = doc.metadata.url.clone();
                if let Err(err) = store.add_document(&library, Some(&version), &doc).await {
                    on_document_error(err, url);
                }
            }

            Ok(())
        })
    });

    scraper.scrape(options, progress_cb, cancellation).await?;

    if cancellation.is_cancelled() {
        return Err(Error::cancelled("Job cancelled"));
    }

    Ok(())
}

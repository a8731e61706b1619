//! Scraper port (C4, consumed interface).
//!
//! Strategy selection (web vs. GitHub vs. npm vs. local file), HTML→Markdown
//! middleware, and headless-browser management are external collaborators;
//! only this contract is fixed.

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::Result;
use crate::value_objects::{CancellationToken, ScraperOptions, ScraperProgress};

/// Callback invoked once per scraper progress event. Returns a boxed
/// future rather than a plain `Result` because the Worker's reaction to a
/// progress event (storing the carried document, checking cancellation)
/// is itself async.
pub type ProgressCallback<'a> = Box<dyn FnMut(ScraperProgress) -> BoxFuture<'static, Result<()>> + Send + 'a>;

/// Streams [`ScraperProgress`] events (each optionally carrying a scraped
/// document) to a callback until the crawl completes or is cancelled.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Run a crawl per `options`, invoking `on_progress` for every page
    /// processed. Returns once the crawl finishes, fails, or the
    /// cancellation token is observed as cancelled.
    async fn scrape(
        &self,
        options: &ScraperOptions,
        on_progress: ProgressCallback<'_>,
        cancellation: &CancellationToken,
    ) -> Result<()>;
}

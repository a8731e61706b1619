//! Types exchanged across the Scraper boundary (C4, consumed interface).
//!
//! The scraper itself — crawl strategy selection, HTML→Markdown
//! middleware, Playwright browser management — is an external
//! collaborator; only the contract the pipeline consumes is modeled here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Crawl scope restriction relative to the seed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlScope {
    /// Restrict to URLs under the seed path.
    Subpages,
    /// Restrict to the seed's hostname.
    Hostname,
    /// Restrict to the seed's registrable domain.
    Domain,
}

impl Default for CrawlScope {
    fn default() -> Self {
        Self::Subpages
    }
}

/// Fetch strategy the scraper should use for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeMode {
    /// Plain HTTP fetch, no JS execution.
    Fetch,
    /// Headless-browser rendering.
    Playwright,
    /// Scraper chooses based on page characteristics.
    Auto,
}

impl Default for ScrapeMode {
    fn default() -> Self {
        Self::Auto
    }
}

/// Options controlling a single scrape run, reconstructible from durably
/// stored JSON for reproducible re-indexing (see
/// [`crate::ports::DocumentStore::store_scraper_options`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperOptions {
    /// Seed URL to crawl from.
    pub url: String,
    /// Library name this scrape is indexing for.
    pub library: String,
    /// Version name ("" for unversioned).
    pub version: String,
    /// Maximum number of pages to crawl.
    pub max_pages: Option<u32>,
    /// Maximum crawl depth from the seed.
    pub max_depth: Option<u32>,
    /// Maximum concurrent in-flight page fetches.
    pub max_concurrency: Option<u32>,
    /// Crawl scope restriction.
    pub scope: Option<CrawlScope>,
    /// Whether to follow HTTP redirects.
    pub follow_redirects: Option<bool>,
    /// Whether to continue past per-page errors.
    pub ignore_errors: Option<bool>,
    /// Glob or `/regex/` include patterns.
    pub include_patterns: Option<Vec<String>>,
    /// Glob or `/regex/` exclude patterns; take precedence over include.
    pub exclude_patterns: Option<Vec<String>>,
    /// CSS selectors to strip before content extraction.
    pub exclude_selectors: Option<Vec<String>>,
    /// Extra HTTP headers to send with each request.
    pub headers: Option<HashMap<String, String>>,
    /// Fetch strategy.
    pub scrape_mode: Option<ScrapeMode>,
}

impl ScraperOptions {
    /// Default max pages when unspecified.
    pub const DEFAULT_MAX_PAGES: u32 = 1000;
    /// Default max depth when unspecified.
    pub const DEFAULT_MAX_DEPTH: u32 = 3;
    /// Default max concurrency when unspecified.
    pub const DEFAULT_MAX_CONCURRENCY: u32 = 3;

    /// Construct options for a bare seed URL/library/version, all other
    /// fields defaulted.
    pub fn new(url: impl Into<String>, library: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            library: library.into(),
            version: version.into(),
            max_pages: None,
            max_depth: None,
            max_concurrency: None,
            scope: None,
            follow_redirects: None,
            ignore_errors: None,
            include_patterns: None,
            exclude_patterns: None,
            exclude_selectors: None,
            headers: None,
            scrape_mode: None,
        }
    }

    /// Effective max pages, applying the documented default.
    pub fn effective_max_pages(&self) -> u32 {
        self.max_pages.unwrap_or(Self::DEFAULT_MAX_PAGES)
    }

    /// Effective max depth, applying the documented default.
    pub fn effective_max_depth(&self) -> u32 {
        self.max_depth.unwrap_or(Self::DEFAULT_MAX_DEPTH)
    }

    /// Effective max concurrency, applying the documented default.
    pub fn effective_max_concurrency(&self) -> u32 {
        self.max_concurrency.unwrap_or(Self::DEFAULT_MAX_CONCURRENCY)
    }

    /// Runtime-only fields that must be stripped before persisting options
    /// (`signal`, `library`, `version`, `url` — the caller supplies these
    /// fresh on every re-index).
    pub fn persistable(&self) -> PersistedScraperOptions {
        PersistedScraperOptions {
            max_pages: self.max_pages,
            max_depth: self.max_depth,
            max_concurrency: self.max_concurrency,
            scope: self.scope,
            follow_redirects: self.follow_redirects,
            ignore_errors: self.ignore_errors,
            include_patterns: self.include_patterns.clone(),
            exclude_patterns: self.exclude_patterns.clone(),
            exclude_selectors: self.exclude_selectors.clone(),
            headers: self.headers.clone(),
            scrape_mode: self.scrape_mode,
        }
    }
}

/// The subset of [`ScraperOptions`] that is durably persisted: everything
/// minus the runtime-only `url`/`library`/`version`/cancellation-signal
/// fields, which are supplied fresh on every re-index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersistedScraperOptions {
    /// Maximum number of pages to crawl.
    pub max_pages: Option<u32>,
    /// Maximum crawl depth from the seed.
    pub max_depth: Option<u32>,
    /// Maximum concurrent in-flight page fetches.
    pub max_concurrency: Option<u32>,
    /// Crawl scope restriction.
    pub scope: Option<CrawlScope>,
    /// Whether to follow HTTP redirects.
    pub follow_redirects: Option<bool>,
    /// Whether to continue past per-page errors.
    pub ignore_errors: Option<bool>,
    /// Glob or `/regex/` include patterns.
    pub include_patterns: Option<Vec<String>>,
    /// Glob or `/regex/` exclude patterns; take precedence over include.
    pub exclude_patterns: Option<Vec<String>>,
    /// CSS selectors to strip before content extraction.
    pub exclude_selectors: Option<Vec<String>>,
    /// Extra HTTP headers to send with each request.
    pub headers: Option<HashMap<String, String>>,
    /// Fetch strategy.
    pub scrape_mode: Option<ScrapeMode>,
}

/// Metadata attached to a scraped page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedMetadata {
    /// The page's canonical URL.
    pub url: String,
    /// Page title, if extracted.
    pub title: Option<String>,
    /// Any additional extractor-supplied metadata.
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single scraped page payload, carried inside a [`ScraperProgress`]
/// event. Content has already passed through the scraper's HTML→Markdown
/// middleware by the time it reaches the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedDocument {
    /// Markdown (or source) content of the page.
    pub content: String,
    /// MIME type hint for the splitter, if known.
    pub content_type: Option<String>,
    /// Page metadata.
    pub metadata: ScrapedMetadata,
}

/// A progress event streamed by the scraper during a crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperProgress {
    /// Number of pages successfully scraped so far.
    pub pages_scraped: u32,
    /// Total pages expected (may be an estimate).
    pub total_pages: u32,
    /// Total URLs discovered so far.
    pub total_discovered: u32,
    /// URL currently being processed.
    pub current_url: String,
    /// Depth of the current URL from the seed.
    pub depth: u32,
    /// Configured max depth.
    pub max_depth: u32,
    /// The scraped page, if this event carries one.
    pub document: Option<ScrapedDocument>,
}

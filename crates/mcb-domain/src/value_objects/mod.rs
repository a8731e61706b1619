//! Immutable value objects: compared and copied by value, no identity of
//! their own.

mod cancellation;
mod chunk;
mod embedding;
mod ids;
mod provider_config;
mod scraper_types;
mod search;
mod version_row;

pub use cancellation::CancellationToken;
pub use chunk::{ContentChunk, ContentKind, Section, SplitterSizes};
pub use embedding::Embedding;
pub use ids::{DocumentId, JobId, LibraryId, VersionId};
pub use provider_config::EmbeddingProviderConfig;
pub use scraper_types::{
    CrawlScope, PersistedScraperOptions, ScrapeMode, ScrapedDocument, ScrapedMetadata,
    ScraperOptions, ScraperProgress,
};
pub use search::{rrf_score, EngineRank, RetrievedResult, SearchHit, RRF_K};
pub use version_row::{LibrarySummary, VersionRow, VersionStatus};

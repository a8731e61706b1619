//! Document Store port (C3): persists libraries, versions, chunks and
//! embeddings; executes hybrid search; navigates the chunk hierarchy.
//!
//! Normalization rule applied everywhere: library and version names are
//! lowercased; unversioned is the empty string; version equality is
//! `COALESCE(name,'') == COALESCE(arg,'')`.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::entities::Document;
use crate::error::Result;
use crate::ports::splitter::ChunkSplitter;
use crate::value_objects::{
    DocumentId, LibraryId, LibrarySummary, PersistedScraperOptions, ScrapedDocument, Section,
    SearchHit, VersionId, VersionRow, VersionStatus,
};

/// A single chunk to be embedded and inserted, already split and
/// positioned in its source page's hierarchy. Produced either directly by
/// a caller that already has chunks, or by [`DocumentStore::add_document`]
/// via the store's configured splitter.
#[derive(Debug, Clone)]
pub struct NewChunk {
    /// Source URL this chunk was extracted from.
    pub url: String,
    /// Page title, if known.
    pub title: Option<String>,
    /// Chunk content.
    pub content: String,
    /// Hierarchical section this chunk belongs to.
    pub section: Section,
    /// MIME type of the source content, if known.
    pub mime_type: Option<String>,
}

/// Outcome of [`DocumentStore::remove_version`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveVersionOutcome {
    /// Number of document chunks deleted.
    pub documents_deleted: u64,
    /// Whether the version row itself was deleted.
    pub version_deleted: bool,
    /// Whether the owning library row was also deleted (last version).
    pub library_deleted: bool,
}

/// Stored scraper options for a version, as returned by
/// [`DocumentStore::get_scraper_options`].
#[derive(Debug, Clone)]
pub struct StoredScraperOptions {
    /// The seed URL the version was last indexed from.
    pub source_url: String,
    /// The persisted option payload (runtime-only fields stripped).
    pub options: PersistedScraperOptions,
}

/// Persists libraries, versions, chunks and embeddings; executes hybrid
/// search; navigates the chunk hierarchy (§4.3).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The splitter used by [`DocumentStore::add_document`] to turn a raw
    /// scraped document into chunks.
    fn splitter(&self) -> &dyn ChunkSplitter;

    /// Resolve `(library, version)` to their durable ids, upserting both.
    /// Names are normalized to lowercase; `version` empty/absent means
    /// unversioned.
    async fn resolve_ids(
        &self,
        library: &str,
        version: Option<&str>,
    ) -> Result<(LibraryId, VersionId)>;

    /// Insert `chunks` for `(library, version)`, atomically per URL group:
    /// existing chunks for each URL in the batch are deleted first, so the
    /// call is idempotent at URL granularity. Embeddings are computed in
    /// sub-batches honoring `BATCH_COUNT`/`BATCH_CHARS`.
    async fn add_documents(
        &self,
        library: &str,
        version: Option<&str>,
        chunks: &[NewChunk],
    ) -> Result<()>;

    /// Split `doc` via [`DocumentStore::splitter`] and delegate to
    /// [`DocumentStore::add_documents`].
    async fn add_document(
        &self,
        library: &str,
        version: Option<&str>,
        doc: &ScrapedDocument,
    ) -> Result<()> {
        let chunks = self
            .splitter()
            .split(&doc.content, doc.content_type.as_deref())?
            .into_iter()
            .map(|chunk| NewChunk {
                url: doc.metadata.url.clone(),
                title: doc.metadata.title.clone(),
                content: chunk.content,
                section: chunk.section,
                mime_type: doc.content_type.clone(),
            })
            .collect::<Vec<_>>();
        self.add_documents(library, version, &chunks).await
    }

    /// Delete all chunks for `(library, version)`. Returns the number
    /// deleted.
    async fn delete_documents(&self, library: &str, version: Option<&str>) -> Result<u64>;

    /// Delete all chunks for `(library, version, url)`. Returns the number
    /// deleted. Used internally by [`DocumentStore::add_documents`].
    async fn delete_documents_by_url(
        &self,
        library: &str,
        version: Option<&str>,
        url: &str,
    ) -> Result<u64>;

    /// Delete a version's chunks, then the version row, then (if
    /// `remove_library_if_empty` and no versions remain) the library row.
    async fn remove_version(
        &self,
        library: &str,
        version: Option<&str>,
        remove_library_if_empty: bool,
    ) -> Result<RemoveVersionOutcome>;

    /// Whether any chunk exists for `(library, version)`.
    async fn check_document_exists(&self, library: &str, version: Option<&str>) -> Result<bool>;

    /// Raw version names (as stored) known for `library`.
    async fn query_unique_versions(&self, library: &str) -> Result<Vec<String>>;

    /// All libraries and their versions, sorted unversioned-first then
    /// ascending semver (lexicographic fallback on parse failure).
    async fn query_library_versions(&self) -> Result<HashMap<String, Vec<VersionRow>>>;

    /// Summaries for every known library (`listLibraries`).
    async fn list_libraries(&self) -> Result<Vec<LibrarySummary>> {
        Ok(self
            .query_library_versions()
            .await?
            .into_iter()
            .map(|(name, versions)| LibrarySummary { name, versions })
            .collect())
    }

    /// Hybrid search: fuse ANN (dense) and BM25 (sparse, title-weighted)
    /// candidates via Reciprocal Rank Fusion, scoped to `(library,
    /// version)`.
    async fn find_by_content(
        &self,
        library: &str,
        version: Option<&str>,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>>;

    /// Fetch a single chunk by id.
    async fn get_by_id(&self, id: DocumentId) -> Result<Option<Document>>;

    /// Chunks on the same URL whose path is a direct child of `parent`'s,
    /// ordered by `sort_order`.
    async fn find_child_chunks(
        &self,
        library: &str,
        version: Option<&str>,
        parent: DocumentId,
        limit: usize,
    ) -> Result<Vec<Document>>;

    /// Chunks on the same URL and section as `reference`, preceding it in
    /// `sort_order`, returned in document order.
    async fn find_preceding_siblings(
        &self,
        library: &str,
        version: Option<&str>,
        reference: DocumentId,
        limit: usize,
    ) -> Result<Vec<Document>>;

    /// Chunks on the same URL and section as `reference`, following it in
    /// `sort_order`.
    async fn find_subsequent_siblings(
        &self,
        library: &str,
        version: Option<&str>,
        reference: DocumentId,
        limit: usize,
    ) -> Result<Vec<Document>>;

    /// The chunk on the same URL whose path is `reference`'s path minus
    /// its last segment, with the largest `sort_order` less than
    /// `reference`'s.
    async fn find_parent_chunk(
        &self,
        library: &str,
        version: Option<&str>,
        reference: DocumentId,
    ) -> Result<Option<Document>>;

    /// Fetch multiple chunks by id, ordered by `sort_order`.
    async fn find_chunks_by_ids(
        &self,
        library: &str,
        version: Option<&str>,
        ids: &[DocumentId],
    ) -> Result<Vec<Document>>;

    /// Update a version's durable status, recording `error_message` when
    /// transitioning to `Failed`.
    async fn update_version_status(
        &self,
        version_id: VersionId,
        status: VersionStatus,
        error_message: Option<&str>,
    ) -> Result<()>;

    /// Update a version's scrape progress counters.
    async fn update_version_progress(
        &self,
        version_id: VersionId,
        pages: u32,
        max_pages: u32,
    ) -> Result<()>;

    /// Versions currently in any of `statuses`, including their library
    /// name (used by crash recovery).
    async fn get_versions_by_status(&self, statuses: &[VersionStatus])
        -> Result<Vec<VersionRow>>;

    /// Persist `source_url` and the option payload (minus runtime-only
    /// fields) for reproducible re-index.
    async fn store_scraper_options(
        &self,
        version_id: VersionId,
        source_url: &str,
        options: &PersistedScraperOptions,
    ) -> Result<()>;

    /// Fetch the stored scraper options for a version, or `None` if no
    /// `source_url` has ever been recorded. Invalid stored JSON is
    /// treated as empty options rather than failing the call.
    async fn get_scraper_options(
        &self,
        version_id: VersionId,
    ) -> Result<Option<StoredScraperOptions>>;

    /// Versions previously indexed from `url`.
    async fn find_versions_by_source_url(&self, url: &str) -> Result<Vec<VersionRow>>;
}

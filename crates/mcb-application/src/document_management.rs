//! Document Management (§6 external interface): library/version listing,
//! version selection, library-existence validation, and the
//! search/removal surface built on top of the Store and Retriever.

use std::sync::Arc;

use mcb_domain::entities::{Library, Version};
use mcb_domain::error::{Error, Result};
use mcb_domain::ports::{DocumentStore, RemoveVersionOutcome, StoredScraperOptions};
use mcb_domain::services::{find_best_version, suggest_libraries, BestVersionMatch};
use mcb_domain::value_objects::{
    LibrarySummary, PersistedScraperOptions, RetrievedResult, VersionId, VersionRow, VersionStatus,
};
use tracing::info;

use crate::retriever::DocumentRetriever;

/// Document Management use cases (§6): the surface an MCP tool or HTTP
/// handler sits directly on top of, layered over [`DocumentStore`] and
/// [`DocumentRetriever`].
pub struct DocumentManagementService {
    store: Arc<dyn DocumentStore>,
    retriever: DocumentRetriever,
}

impl DocumentManagementService {
    /// Build the service over `store`, constructing its own
    /// [`DocumentRetriever`].
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let retriever = DocumentRetriever::new(Arc::clone(&store));
        Self { store, retriever }
    }

    /// Summaries for every known library (`listLibraries`).
    pub async fn list_libraries(&self) -> Result<Vec<LibrarySummary>> {
        self.store.list_libraries().await
    }

    /// Select the best-matching version for `library` given an optional
    /// `target_version` selector (§6 version selection algorithm).
    pub async fn find_best_version(
        &self,
        library: &str,
        target_version: Option<&str>,
    ) -> Result<BestVersionMatch> {
        let library = Library::normalize_name(library);
        let versions = self.store.query_unique_versions(&library).await?;
        let rows = self.version_rows_for(&library, &versions).await?;
        find_best_version(&library, target_version, &rows)
    }

    /// Validate that `library` is known, returning up to 3 fuzzy
    /// suggestions (Jaro-Winkler, threshold ≈ 0.4) when it is not.
    pub async fn validate_library_exists(&self, library: &str) -> Result<()> {
        let normalized = Library::normalize_name(library);
        let known: Vec<String> = self
            .store
            .list_libraries()
            .await?
            .into_iter()
            .map(|l| l.name)
            .collect();
        if known.iter().any(|name| name == &normalized) {
            return Ok(());
        }
        let suggestions = suggest_libraries(&normalized, &known);
        Err(Error::library_not_found(normalized, suggestions))
    }

    /// Context-expanded hybrid search (`searchStore`), delegating to the
    /// [`DocumentRetriever`].
    pub async fn search_store(
        &self,
        library: &str,
        version: Option<&str>,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedResult>> {
        let library = Library::normalize_name(library);
        let version = Version::normalize_name(version);
        self.retriever
            .search(&library, Some(&version), query, limit)
            .await
    }

    /// Remove a single `(library, version)`'s indexed documents, and the
    /// version/library rows per the usual cascade rules (§4.3 op 5).
    pub async fn remove_version(
        &self,
        library: &str,
        version: Option<&str>,
    ) -> Result<RemoveVersionOutcome> {
        let library = Library::normalize_name(library);
        let version = Version::normalize_name(version);
        let outcome = self.store.remove_version(&library, Some(&version), true).await?;
        info!(
            %library, %version,
            documents_deleted = outcome.documents_deleted,
            version_deleted = outcome.version_deleted,
            library_deleted = outcome.library_deleted,
            "removed version"
        );
        Ok(outcome)
    }

    /// Remove every version of `library`, deleting its library row once
    /// the last version is gone.
    pub async fn remove_all_documents(&self, library: &str) -> Result<RemoveVersionOutcome> {
        let library = Library::normalize_name(library);
        let versions = self.store.query_unique_versions(&library).await?;
        let mut total = RemoveVersionOutcome::default();
        for (i, version) in versions.iter().enumerate() {
            let remove_library_if_empty = i + 1 == versions.len();
            let outcome = self
                .store
                .remove_version(&library, Some(version), remove_library_if_empty)
                .await?;
            total.documents_deleted += outcome.documents_deleted;
            total.version_deleted |= outcome.version_deleted;
            total.library_deleted |= outcome.library_deleted;
        }
        info!(%library, documents_deleted = total.documents_deleted, "removed all documents");
        Ok(total)
    }

    /// Versions currently in any of `statuses`, including their owning
    /// library name.
    pub async fn get_versions_by_status(&self, statuses: &[VersionStatus]) -> Result<Vec<VersionRow>> {
        self.store.get_versions_by_status(statuses).await
    }

    /// Update a version's durable status.
    pub async fn update_version_status(
        &self,
        version_id: VersionId,
        status: VersionStatus,
        error_message: Option<&str>,
    ) -> Result<()> {
        self.store.update_version_status(version_id, status, error_message).await
    }

    /// Update a version's scrape progress counters.
    pub async fn update_version_progress(
        &self,
        version_id: VersionId,
        pages: u32,
        max_pages: u32,
    ) -> Result<()> {
        self.store.update_version_progress(version_id, pages, max_pages).await
    }

    /// Persist scraper options for reproducible re-index.
    pub async fn store_scraper_options(
        &self,
        version_id: VersionId,
        source_url: &str,
        options: &PersistedScraperOptions,
    ) -> Result<()> {
        self.store.store_scraper_options(version_id, source_url, options).await
    }

    /// Fetch the stored scraper options for a version.
    pub async fn get_scraper_options(&self, version_id: VersionId) -> Result<Option<StoredScraperOptions>> {
        self.store.get_scraper_options(version_id).await
    }

    /// Versions previously indexed from `url`.
    pub async fn find_versions_by_source_url(&self, url: &str) -> Result<Vec<VersionRow>> {
        self.store.find_versions_by_source_url(url).await
    }

    /// Look up the `VersionRow`s for `library`'s known version names, as
    /// stored by `query_library_versions` (used so `find_best_version` can
    /// see document/URL counts for its `VersionNotFound` detail listing).
    async fn version_rows_for(&self, library: &str, versions: &[String]) -> Result<Vec<VersionRow>> {
        let by_library = self.store.query_library_versions().await?;
        let rows = by_library.get(library).cloned().unwrap_or_default();
        if rows.len() >= versions.len() {
            return Ok(rows);
        }
        // Fall back to bare rows (no document/URL counts) for any version
        // name present in `query_unique_versions` but missing from the
        // richer `query_library_versions` projection.
        Ok(versions
            .iter()
            .map(|v| {
                rows.iter().find(|r| &r.version == v).cloned().unwrap_or(VersionRow {
                    library: library.to_owned(),
                    version: v.clone(),
                    version_id: VersionId::from_name(&format!("{library}@{v}")),
                    status: VersionStatus::NotIndexed,
                    progress_pages: 0,
                    progress_max_pages: 0,
                    error_message: None,
                    source_url: None,
                    document_count: 0,
                    unique_url_count: 0,
                    indexed_at: None,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use mcb_domain::entities::Document;
    use mcb_domain::value_objects::{DocumentId, LibraryId, SearchHit};

    use super::*;

    struct FakeStore {
        libraries: Vec<LibrarySummary>,
        removed: Mutex<Vec<(String, Option<String>)>>,
    }

    #[async_trait]
    impl DocumentStore for FakeStore {
        fn splitter(&self) -> &dyn mcb_domain::ports::ChunkSplitter {
            unimplemented!()
        }

        async fn resolve_ids(&self, _library: &str, _version: Option<&str>) -> Result<(LibraryId, VersionId)> {
            unimplemented!()
        }

        async fn add_documents(
            &self,
            _library: &str,
            _version: Option<&str>,
            _chunks: &[mcb_domain::ports::NewChunk],
        ) -> Result<()> {
            unimplemented!()
        }

        async fn delete_documents(&self, _library: &str, _version: Option<&str>) -> Result<u64> {
            unimplemented!()
        }

        async fn delete_documents_by_url(
            &self,
            _library: &str,
            _version: Option<&str>,
            _url: &str,
        ) -> Result<u64> {
            unimplemented!()
        }

        async fn remove_version(
            &self,
            library: &str,
            version: Option<&str>,
            remove_library_if_empty: bool,
        ) -> Result<RemoveVersionOutcome> {
            self.removed
                .lock()
                .unwrap()
                .push((library.to_owned(), version.map(str::to_owned)));
            Ok(RemoveVersionOutcome {
                documents_deleted: 2,
                version_deleted: true,
                library_deleted: remove_library_if_empty,
            })
        }

        async fn check_document_exists(&self, _library: &str, _version: Option<&str>) -> Result<bool> {
            unimplemented!()
        }

        async fn query_unique_versions(&self, library: &str) -> Result<Vec<String>> {
            Ok(self
                .libraries
                .iter()
                .find(|l| l.name == library)
                .map(|l| l.versions.iter().map(|v| v.version.clone()).collect())
                .unwrap_or_default())
        }

        async fn query_library_versions(&self) -> Result<HashMap<String, Vec<VersionRow>>> {
            Ok(self
                .libraries
                .iter()
                .map(|l| (l.name.clone(), l.versions.clone()))
                .collect())
        }

        async fn find_by_content(
            &self,
            _library: &str,
            _version: Option<&str>,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<SearchHit>> {
            Ok(Vec::new())
        }

        async fn get_by_id(&self, _id: DocumentId) -> Result<Option<Document>> {
            unimplemented!()
        }

        async fn find_child_chunks(
            &self,
            _library: &str,
            _version: Option<&str>,
            _parent: DocumentId,
            _limit: usize,
        ) -> Result<Vec<Document>> {
            Ok(Vec::new())
        }

        async fn find_preceding_siblings(
            &self,
            _library: &str,
            _version: Option<&str>,
            _reference: DocumentId,
            _limit: usize,
        ) -> Result<Vec<Document>> {
            Ok(Vec::new())
        }

        async fn find_subsequent_siblings(
            &self,
            _library: &str,
            _version: Option<&str>,
            _reference: DocumentId,
            _limit: usize,
        ) -> Result<Vec<Document>> {
            Ok(Vec::new())
        }

        async fn find_parent_chunk(
            &self,
            _library: &str,
            _version: Option<&str>,
            _reference: DocumentId,
        ) -> Result<Option<Document>> {
            Ok(None)
        }

        async fn find_chunks_by_ids(
            &self,
            _library: &str,
            _version: Option<&str>,
            _ids: &[DocumentId],
        ) -> Result<Vec<Document>> {
            unimplemented!()
        }

        async fn update_version_status(
            &self,
            _version_id: VersionId,
            _status: VersionStatus,
            _error_message: Option<&str>,
        ) -> Result<()> {
            Ok(())
        }

        async fn update_version_progress(&self, _version_id: VersionId, _pages: u32, _max_pages: u32) -> Result<()> {
            Ok(())
        }

        async fn get_versions_by_status(&self, _statuses: &[VersionStatus]) -> Result<Vec<VersionRow>> {
            Ok(Vec::new())
        }

        async fn store_scraper_options(
            &self,
            _version_id: VersionId,
            _source_url: &str,
            _options: &PersistedScraperOptions,
        ) -> Result<()> {
            Ok(())
        }

        async fn get_scraper_options(&self, _version_id: VersionId) -> Result<Option<StoredScraperOptions>> {
            Ok(None)
        }

        async fn find_versions_by_source_url(&self, _url: &str) -> Result<Vec<VersionRow>> {
            Ok(Vec::new())
        }
    }

    fn row(version: &str, docs: u64, urls: u64) -> VersionRow {
        VersionRow {
            library: "react".to_owned(),
            version: version.to_owned(),
            version_id: VersionId::from_name(&format!("react@{version}")),
            status: VersionStatus::Completed,
            progress_pages: 0,
            progress_max_pages: 0,
            error_message: None,
            source_url: None,
            document_count: docs,
            unique_url_count: urls,
            indexed_at: None,
        }
    }

    fn store_with(libraries: Vec<LibrarySummary>) -> Arc<dyn DocumentStore> {
        Arc::new(FakeStore {
            libraries,
            removed: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn validate_library_exists_ok_for_known_library() {
        let store = store_with(vec![LibrarySummary {
            name: "react".to_owned(),
            versions: vec![row("", 0, 0)],
        }]);
        let service = DocumentManagementService::new(store);
        assert!(service.validate_library_exists("react").await.is_ok());
    }

    #[tokio::test]
    async fn validate_library_exists_suggests_close_names() {
        let store = store_with(vec![LibrarySummary {
            name: "react".to_owned(),
            versions: vec![row("", 0, 0)],
        }]);
        let service = DocumentManagementService::new(store);
        let err = service.validate_library_exists("reactt").await.unwrap_err();
        match err {
            Error::LibraryNotFound { suggestions, .. } => {
                assert_eq!(suggestions, vec!["react".to_owned()]);
            }
            other => panic!("expected LibraryNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn find_best_version_picks_exact_match() {
        let store = store_with(vec![LibrarySummary {
            name: "react".to_owned(),
            versions: vec![row("1.0.0", 3, 2), row("2.0.0", 5, 4), row("", 1, 1)],
        }]);
        let service = DocumentManagementService::new(store);
        let result = service.find_best_version("react", Some("1.0.0")).await.unwrap();
        assert_eq!(result.best_match, Some("1.0.0".to_owned()));
        assert!(result.has_unversioned);
    }

    #[tokio::test]
    async fn remove_all_documents_only_frees_library_on_last_version() {
        let store = store_with(vec![LibrarySummary {
            name: "react".to_owned(),
            versions: vec![row("1.0.0", 1, 1), row("2.0.0", 1, 1)],
        }]);
        let service = DocumentManagementService::new(store);
        let outcome = service.remove_all_documents("react").await.unwrap();
        assert_eq!(outcome.documents_deleted, 4);
        assert!(outcome.library_deleted);
    }
}

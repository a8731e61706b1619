//! Unit test suite for mcb-application
//!
//! Run with: `cargo test -p mcb-application --test unit`
//!
//! End-to-end coverage of the Pipeline Manager driving a full job through
//! a fake `Scraper`/`DocumentStore` pair, exercised from outside the crate
//! (the finer-grained unit tests live inline in each module's `#[cfg(test)]`
//! block).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mcb_application::{PipelineManager, PipelineManagerConfig};
use mcb_domain::entities::{Document, JobStatus};
use mcb_domain::error::Result;
use mcb_domain::ports::{
    DocumentStore, IPipeline, NewChunk, ProgressCallback, RemoveVersionOutcome, Scraper,
    StoredScraperOptions,
};
use mcb_domain::value_objects::{
    CancellationToken, DocumentId, LibraryId, PersistedScraperOptions, ScrapedDocument, ScrapedMetadata,
    ScraperOptions, ScraperProgress, SearchHit, VersionId, VersionRow, VersionStatus,
};

/// An in-memory `DocumentStore` that records every document it's handed
/// and every status transition written through to it.
#[derive(Default)]
struct RecordingStore {
    statuses: Mutex<Vec<VersionStatus>>,
    stored_urls: Mutex<Vec<String>>,
}

#[async_trait]
impl DocumentStore for RecordingStore {
    fn splitter(&self) -> &dyn mcb_domain::ports::ChunkSplitter {
        unimplemented!("add_document is overridden below, bypassing the splitter")
    }

    async fn resolve_ids(&self, _library: &str, _version: Option<&str>) -> Result<(LibraryId, VersionId)> {
        Ok((LibraryId::from_name("vue"), VersionId::from_name("vue@3")))
    }

    async fn add_documents(&self, _library: &str, _version: Option<&str>, _chunks: &[NewChunk]) -> Result<()> {
        unimplemented!()
    }

    async fn add_document(&self, _library: &str, _version: Option<&str>, doc: &ScrapedDocument) -> Result<()> {
        self.stored_urls.lock().unwrap().push(doc.metadata.url.clone());
        Ok(())
    }

    async fn delete_documents(&self, _library: &str, _version: Option<&str>) -> Result<u64> {
        Ok(0)
    }

    async fn delete_documents_by_url(&self, _library: &str, _version: Option<&str>, _url: &str) -> Result<u64> {
        Ok(0)
    }

    async fn remove_version(
        &self,
        _library: &str,
        _version: Option<&str>,
        _remove_library_if_empty: bool,
    ) -> Result<RemoveVersionOutcome> {
        unimplemented!()
    }

    async fn check_document_exists(&self, _library: &str, _version: Option<&str>) -> Result<bool> {
        Ok(false)
    }

    async fn query_unique_versions(&self, _library: &str) -> Result<Vec<String>> {
        Ok(vec!["3".to_owned()])
    }

    async fn query_library_versions(&self) -> Result<HashMap<String, Vec<VersionRow>>> {
        Ok(HashMap::new())
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
        Ok(None)
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
        Ok(Vec::new())
    }

    async fn update_version_status(
        &self,
        _version_id: VersionId,
        status: VersionStatus,
        _error_message: Option<&str>,
    ) -> Result<()> {
        self.statuses.lock().unwrap().push(status);
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

/// A scraper that yields a single document then stops.
struct SinglePageScraper;

#[async_trait]
impl Scraper for SinglePageScraper {
    async fn scrape(
        &self,
        options: &ScraperOptions,
        mut on_progress: ProgressCallback<'_>,
        _cancellation: &CancellationToken,
    ) -> Result<()> {
        let document = ScrapedDocument {
            content: "# Guide\n\nGetting started with composables.".to_owned(),
            content_type: Some("text/markdown".to_owned()),
            metadata: ScrapedMetadata {
                url: options.url.clone(),
                title: Some("Guide".to_owned()),
                extra: serde_json::Map::new(),
            },
        };
        on_progress(ScraperProgress {
            pages_scraped: 1,
            total_pages: 1,
            total_discovered: 1,
            current_url: options.url.clone(),
            depth: 0,
            max_depth: options.effective_max_depth(),
            document: Some(document),
        })
        .await
    }
}

#[tokio::test]
async fn pipeline_manager_runs_a_job_to_completion() {
    let store: Arc<dyn DocumentStore> = Arc::new(RecordingStore::default());
    let scraper: Arc<dyn Scraper> = Arc::new(SinglePageScraper);
    let manager = PipelineManager::new(
        Arc::clone(&store),
        scraper,
        PipelineManagerConfig {
            concurrency: 1,
            recover_on_start: false,
        },
    );
    manager.start().await.unwrap();

    let job_id = manager
        .enqueue_job("vue", Some("3"), None, "https://vuejs.org/guide")
        .await
        .unwrap();

    manager.wait_for_job_completion(job_id).await.unwrap();

    let job = manager.get_job(job_id).await.unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    manager.stop().await.unwrap();
}

#[tokio::test]
async fn pipeline_manager_replaces_active_job_for_same_key() {
    let store: Arc<dyn DocumentStore> = Arc::new(RecordingStore::default());
    let scraper: Arc<dyn Scraper> = Arc::new(SinglePageScraper);
    let manager = PipelineManager::new(store, scraper, PipelineManagerConfig::default());
    manager.start().await.unwrap();

    let first = manager
        .enqueue_job("vue", Some("3"), None, "https://vuejs.org/guide")
        .await
        .unwrap();
    let second = manager
        .enqueue_job("vue", Some("3"), None, "https://vuejs.org/guide")
        .await
        .unwrap();

    manager.wait_for_job_completion(second).await.unwrap();
    assert_ne!(first, second);

    let jobs = manager.get_jobs(None).await;
    assert!(jobs.iter().any(|j| j.id == second && j.status == JobStatus::Completed));
}

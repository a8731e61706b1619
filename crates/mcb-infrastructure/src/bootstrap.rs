//! Composition root (§9 design note: runtime polymorphism across
//! Pipeline variants; §6 persisted state layout).
//!
//! Wires a concrete [`mcb_providers::SqliteDocumentStore`] and embedding
//! provider (resolved from [`mcb_domain::registry::resolve_embedding_provider`])
//! into the application layer's [`mcb_application::DocumentManagementService`]
//! and [`mcb_application::PipelineManager`]. A CLI or MCP transport (out
//! of scope, §1) constructs one [`AppContext`] at process start and holds
//! it for the process lifetime.
//!
//! The `Scraper` implementation is the one port this crate does not wire
//! concretely — scraping strategy selection is an external collaborator
//! (§1) — so [`AppContext::build`] takes an already-constructed
//! `Arc<dyn Scraper>` from its caller.

use std::sync::Arc;

use mcb_application::{DocumentManagementService, PipelineManager, PipelineManagerConfig};
use mcb_domain::error::Result;
use mcb_domain::ports::{ChunkSplitter, DocumentStore, Scraper};
use mcb_providers::{DefaultChunkSplitter, SqliteDocumentStore};

use crate::config::{paths, AppConfig};

/// Everything a CLI or MCP transport needs, assembled once at startup.
pub struct AppContext {
    /// The shared, opened document store.
    pub store: Arc<dyn DocumentStore>,
    /// Library/version listing, selection, and search use cases (§6).
    pub document_management: DocumentManagementService,
    /// The job scheduler (§4.6). Not started; callers invoke
    /// [`mcb_domain::ports::IPipeline::start`] once ready to consume the
    /// queue.
    pub pipeline: PipelineManager,
}

impl AppContext {
    /// Build the composition root from `config`, opening (and migrating)
    /// the document store at the configured data directory, resolving
    /// the configured embedding provider, and wiring the pipeline manager
    /// over `scraper`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be resolved/created,
    /// the store file cannot be opened, or the configured embedding
    /// provider cannot be constructed (missing credentials, unknown
    /// provider name).
    pub async fn build(config: &AppConfig, scraper: Arc<dyn Scraper>) -> Result<Self> {
        let embedding = mcb_domain::registry::resolve_embedding_provider(&config.embedding)?;
        let splitter: Arc<dyn ChunkSplitter> = Arc::new(DefaultChunkSplitter::new());

        let db_path = match &config.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                std::path::Path::new(dir).join(mcb_domain::constants::STORE_DB_FILE)
            }
            None => paths::store_db_path()?,
        };

        let store: Arc<dyn DocumentStore> =
            Arc::new(SqliteDocumentStore::open(db_path, embedding, splitter).await?);

        let document_management = DocumentManagementService::new(Arc::clone(&store));

        let pipeline = PipelineManager::new(
            Arc::clone(&store),
            scraper,
            PipelineManagerConfig {
                concurrency: config.concurrency,
                recover_on_start: config.recover_on_start,
            },
        );

        Ok(Self {
            store,
            document_management,
            pipeline,
        })
    }
}

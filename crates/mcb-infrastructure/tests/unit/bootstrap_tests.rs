//! `AppContext::build` composition-root wiring (§9 design note).

use std::sync::Arc;

use async_trait::async_trait;
use mcb_domain::error::Result;
use mcb_domain::ports::Scraper;
use mcb_domain::value_objects::{CancellationToken, EmbeddingProviderConfig, ScraperOptions};
use mcb_infrastructure::config::AppConfig;
use mcb_infrastructure::AppContext;
use serial_test::serial;

/// A scraper that never discovers anything, for tests that only need a
/// valid `Arc<dyn Scraper>` to complete wiring.
struct NoopScraper;

#[async_trait]
impl Scraper for NoopScraper {
    async fn scrape(
        &self,
        _options: &ScraperOptions,
        _on_progress: mcb_domain::ports::ProgressCallback<'_>,
        _cancellation: &CancellationToken,
    ) -> Result<()> {
        Ok(())
    }
}

fn config_with_data_dir(dir: &std::path::Path) -> AppConfig {
    AppConfig {
        data_dir: Some(dir.display().to_string()),
        concurrency: 2,
        recover_on_start: true,
        embedding: EmbeddingProviderConfig::new("openai").with_api_key("test-key"),
    }
}

#[tokio::test]
#[serial]
async fn build_opens_store_and_wires_services() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_data_dir(dir.path());

    let ctx = AppContext::build(&config, Arc::new(NoopScraper)).await.unwrap();

    let libraries = ctx.document_management.list_libraries().await.unwrap();
    assert!(libraries.is_empty());
    assert!(dir.path().join(mcb_domain::constants::STORE_DB_FILE).exists());
}

#[tokio::test]
#[serial]
async fn build_fails_for_unknown_embedding_provider() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_with_data_dir(dir.path());
    config.embedding = EmbeddingProviderConfig::new("not-a-real-provider");

    let result = AppContext::build(&config, Arc::new(NoopScraper)).await;
    assert!(result.is_err());
}

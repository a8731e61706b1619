//! External provider port interfaces (§2): the boundary traits that
//! application use cases depend on and provider implementations satisfy.

mod embedding;
mod logging;
mod pipeline;
mod scraper;
mod splitter;
mod store;

pub use embedding::EmbeddingProvider;
pub use logging::{LogLevel, OperationLogger};
pub use pipeline::{IPipeline, PipelineCallbacks};
pub use scraper::{ProgressCallback, Scraper};
pub use splitter::ChunkSplitter;
pub use store::{DocumentStore, NewChunk, RemoveVersionOutcome, StoredScraperOptions};

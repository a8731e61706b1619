//! Chunk Splitter port (C1).

use crate::error::Result;
use crate::value_objects::{ContentChunk, SplitterSizes};

/// Converts a document's body into a deterministic, order-preserving
/// sequence of [`ContentChunk`]s.
///
/// Implementations never perform I/O, URL resolution, or Markdown
/// conversion — those are the scraper's content-processing middleware's
/// responsibility.
pub trait ChunkSplitter: Send + Sync {
    /// Split `text` into chunks. `mime_type` hints at Markdown vs. source
    /// code so the splitter can preserve language-appropriate structure.
    fn split(&self, text: &str, mime_type: Option<&str>) -> Result<Vec<ContentChunk>>;

    /// The size thresholds this splitter honors (preferred, max, min).
    fn sizes(&self) -> SplitterSizes {
        SplitterSizes::default()
    }
}

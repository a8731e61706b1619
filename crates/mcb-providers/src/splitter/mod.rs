//! Chunk Splitter (C1) implementation: Markdown heading-sectioning for
//! prose, line-bounded code-block splitting for source text (§4.1).

mod code;
mod markdown;

use mcb_domain::error::Result;
use mcb_domain::ports::ChunkSplitter;
use mcb_domain::value_objects::{ContentChunk, ContentKind, SplitterSizes};

/// The default splitter, dispatching on the caller-supplied MIME type.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultChunkSplitter {
    sizes: SplitterSizes,
}

impl DefaultChunkSplitter {
    /// Construct a splitter using [`SplitterSizes::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a splitter with explicit size thresholds.
    #[must_use]
    pub fn with_sizes(sizes: SplitterSizes) -> Self {
        Self { sizes }
    }
}

impl ChunkSplitter for DefaultChunkSplitter {
    fn split(&self, text: &str, mime_type: Option<&str>) -> Result<Vec<ContentChunk>> {
        let chunks = match ContentKind::from_mime_type(mime_type) {
            ContentKind::Markdown => markdown::split(text, self.sizes),
            ContentKind::Code { .. } => code::split(text, self.sizes),
        };
        Ok(chunks)
    }

    fn sizes(&self) -> SplitterSizes {
        self.sizes
    }
}

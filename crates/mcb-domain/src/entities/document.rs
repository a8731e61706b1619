//! Document (chunk) entity: the smallest unit of retrieval.

use serde::{Deserialize, Serialize};

use crate::value_objects::{DocumentId, LibraryId, Section, VersionId};

/// Metadata carried alongside a chunk's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Title of the source page.
    pub title: Option<String>,
    /// Source URL the chunk was extracted from.
    pub url: String,
    /// Hierarchical path/level within the source page.
    pub section: Section,
    /// MIME type of the original content, if known.
    pub mime_type: Option<String>,
}

/// A splitter output unit persisted by the store: `(library_id,
/// version_id, url)` groups all chunks from one source page; within a
/// group `sort_order` is strictly increasing and matches splitter-emission
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Monotone rowid assigned by the store.
    pub id: DocumentId,
    /// Owning library.
    pub library_id: LibraryId,
    /// Owning version.
    pub version_id: VersionId,
    /// Source URL.
    pub url: String,
    /// Chunk content.
    pub content: String,
    /// Structured metadata.
    pub metadata: DocumentMetadata,
    /// Insertion order within the `(library_id, version_id, url)` group.
    pub sort_order: u32,
    /// Timestamp this chunk was indexed (Unix epoch seconds).
    pub indexed_at: i64,
}

impl Document {
    /// The hierarchical path this chunk belongs to.
    pub fn path(&self) -> &[String] {
        &self.metadata.section.path
    }

    /// The heading depth this chunk belongs to.
    pub fn level(&self) -> u32 {
        self.metadata.section.level
    }
}

//! Output of the Chunk Splitter (C1): hierarchical content chunks.

use serde::{Deserialize, Serialize};

/// Hierarchical position of a chunk within its source document.
///
/// `path` runs outer→inner (e.g. `["Guide", "Installation"]`); `level` is
/// the heading depth that produced the chunk (0 for content with no
/// enclosing heading).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Section {
    /// Heading path from the document root to this chunk, outer→inner.
    pub path: Vec<String>,
    /// Heading depth (0 = no enclosing heading).
    pub level: u32,
}

impl Section {
    /// A section with no enclosing heading.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether `other` is a direct child section of this one: one level
    /// deeper with this section's path as a strict prefix.
    pub fn is_direct_child_of(&self, parent: &Section) -> bool {
        self.path.len() == parent.path.len() + 1 && self.path.starts_with(&parent.path)
    }

    /// The section one level up, or `None` if this is already root.
    pub fn parent(&self) -> Option<Section> {
        if self.path.is_empty() {
            return None;
        }
        let mut path = self.path.clone();
        path.pop();
        Some(Section {
            level: self.level.saturating_sub(1),
            path,
        })
    }
}

/// A single unit of splitter output: text content plus its hierarchical
/// position. Splitter output order is significant and deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentChunk {
    /// The chunk's text content.
    pub content: String,
    /// Hierarchical path/level this chunk belongs to.
    pub section: Section,
}

impl ContentChunk {
    /// Construct a chunk at the given section.
    pub fn new(content: impl Into<String>, section: Section) -> Self {
        Self {
            content: content.into(),
            section,
        }
    }
}

/// MIME type hint passed to the splitter, distinguishing Markdown/prose
/// content from source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    /// Markdown or unspecified prose text — sectioned by headings.
    Markdown,
    /// Source code in the given language — chunked as code blocks.
    Code {
        /// Language identifier (e.g. "rust", "typescript").
        language: String,
    },
}

impl ContentKind {
    /// Classify a MIME type string into a splitter content kind.
    pub fn from_mime_type(mime_type: Option<&str>) -> Self {
        match mime_type {
            Some(mime) if mime.starts_with("text/x-") || mime.contains("code") => {
                let language = mime
                    .rsplit(['-', '/'])
                    .next()
                    .unwrap_or("text")
                    .to_owned();
                Self::Code { language }
            }
            _ => Self::Markdown,
        }
    }
}

/// Size thresholds honored by the splitter, in that priority order:
/// preferred, then max (hard cap), then min (coalesce below this).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitterSizes {
    /// Preferred chunk size in characters.
    pub preferred: usize,
    /// Hard cap; a chunk never exceeds this size.
    pub max: usize,
    /// Minimum size below which adjacent chunks are coalesced.
    pub min: usize,
}

impl Default for SplitterSizes {
    fn default() -> Self {
        Self {
            preferred: 1500,
            max: 3000,
            min: 500,
        }
    }
}

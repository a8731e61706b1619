//! Version entity: `(library_id, name)` unique, with `name = ""` denoting
//! the unversioned variant.

use serde::{Deserialize, Serialize};

use crate::value_objects::{LibraryId, PersistedScraperOptions, VersionId, VersionStatus};

/// A version of a library's documentation. Stored name is always
/// lowercased; `""` is canonical for "unversioned" and semver comparisons
/// operate on the stored string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    /// Durable identifier.
    pub id: VersionId,
    /// The owning library.
    pub library_id: LibraryId,
    /// Version name, lowercased; "" for unversioned.
    pub name: String,
    /// Durable lifecycle status, mirrored from Job status transitions.
    pub status: VersionStatus,
    /// Pages scraped so far for the current/last job.
    pub progress_pages: u32,
    /// Total pages expected for the current/last job.
    pub progress_max_pages: u32,
    /// Error message from the most recent failed job.
    pub error_message: Option<String>,
    /// Seed URL this version was last indexed from.
    pub source_url: Option<String>,
    /// Serialized scraper options, stored for reproducible re-index.
    pub scraper_options: Option<PersistedScraperOptions>,
    /// Creation timestamp (Unix epoch seconds).
    pub created_at: i64,
    /// Last-updated timestamp (Unix epoch seconds).
    pub updated_at: i64,
}

impl Version {
    /// The canonical stored name for "unversioned".
    pub const UNVERSIONED: &'static str = "";

    /// Normalize a user-supplied version string: lowercase, with
    /// `None`/empty treated as unversioned.
    pub fn normalize_name(version: Option<&str>) -> String {
        version
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| Self::UNVERSIONED.to_owned())
    }

    /// Whether this version is the unversioned variant.
    pub fn is_unversioned(&self) -> bool {
        self.name == Self::UNVERSIONED
    }
}

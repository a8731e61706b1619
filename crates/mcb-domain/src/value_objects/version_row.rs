//! Durable Version row projections used by the management surface.

use serde::{Deserialize, Serialize};

use crate::value_objects::VersionId;

/// Durable status of a Version row. Mirrors Job status (§4.6) except for
/// `Cancelling`, which stays `Running` in the DB until a terminal state
/// is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    /// Indexing has not started for this version yet.
    NotIndexed,
    /// A job for this version is queued.
    Queued,
    /// A job for this version is running.
    Running,
    /// The most recent job for this version completed successfully.
    Completed,
    /// The most recent job for this version failed.
    Failed,
    /// The most recent job for this version was cancelled.
    Cancelled,
}

impl VersionStatus {
    /// Render the canonical lowercase status string stored in the DB.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotIndexed => "not_indexed",
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A single library/version row as surfaced by `queryLibraryVersions` and
/// `getVersionsByStatus`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionRow {
    /// Owning library name (lowercased). Redundant with the grouping key
    /// when this row came from `queryLibraryVersions`, but required by
    /// `getVersionsByStatus`, which is not grouped by library.
    pub library: String,
    /// Version name, as stored (lowercased, "" for unversioned).
    pub version: String,
    /// The version's durable id.
    pub version_id: VersionId,
    /// Current durable status.
    pub status: VersionStatus,
    /// Pages scraped so far for the in-progress (or most recent) job.
    pub progress_pages: u32,
    /// Total pages expected for the in-progress (or most recent) job.
    pub progress_max_pages: u32,
    /// Error message from the most recent failed job, if any.
    pub error_message: Option<String>,
    /// Seed URL this version was last indexed from.
    pub source_url: Option<String>,
    /// Number of chunks stored for this version.
    pub document_count: u64,
    /// Number of distinct source URLs represented among those chunks.
    pub unique_url_count: u64,
    /// Timestamp of the most recent chunk insert (Unix epoch seconds).
    pub indexed_at: Option<i64>,
}

/// Summary of one library and its versions, as surfaced by `listLibraries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySummary {
    /// Library name (lowercased).
    pub name: String,
    /// Versions known for this library, sorted unversioned-first then
    /// ascending semver (lexicographic fallback on parse failure).
    pub versions: Vec<VersionRow>,
}

//! Strong-typed identifiers for domain entities.

crate::define_id!(LibraryId, "Unique identifier for a Library.");
crate::define_id!(VersionId, "Unique identifier for a Version.");
crate::define_id!(JobId, "Unique identifier for a pipeline Job.");

/// Identifier for a Document (chunk).
///
/// Documents are identified by a monotone rowid assigned by the store,
/// not a UUID — hierarchy queries and `sort_order` comparisons rely on
/// this being a plain ordered integer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct DocumentId(i64);

impl DocumentId {
    /// Wrap a raw rowid.
    pub fn new(rowid: i64) -> Self {
        Self(rowid)
    }

    /// The underlying rowid.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

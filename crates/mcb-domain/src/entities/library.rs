//! Library entity: the top of the Library→Version→Document containment
//! hierarchy.

use serde::{Deserialize, Serialize};

use crate::value_objects::LibraryId;

/// A documented library, identified by a case-insensitive unique name.
/// Created on first reference; deleted only when its last Version is
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Durable identifier.
    pub id: LibraryId,
    /// Library name, stored lowercased.
    pub name: String,
}

impl Library {
    /// Normalize a user-supplied library name to its canonical stored
    /// form (lowercased).
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

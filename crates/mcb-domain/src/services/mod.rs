//! Pure domain services: algorithms that depend only on value objects and
//! entities already loaded into memory, with no I/O of their own.

mod library_suggestions;
mod version_selection;

pub use library_suggestions::suggest_libraries;
pub use version_selection::{find_best_version, BestVersionMatch};

//! Document Store (C3) provider implementations.

mod schema;
mod sqlite;

pub use sqlite::SqliteDocumentStore;

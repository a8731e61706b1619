//! # Domain Layer
//!
//! Core business logic and types for the documentation indexing pipeline
//! and its hybrid-search document store.
//!
//! ## Architecture
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`entities`] | Library/Version/Document entities with identity |
//! | [`value_objects`] | Immutable value objects (chunks, embeddings, search results) |
//! | [`ports`] | External provider port interfaces (store, embeddings, scraper) |
//! | [`services`] | Pure algorithms over loaded entities (version selection, suggestions) |
//! | [`constants`] | Batching, RRF and provider constants |
//! | [`error`] | Domain error taxonomy |
//!
//! ## Clean Architecture Principles
//!
//! - **Entities** are at the center with business rules
//! - **Value Objects** are immutable and compared by value
//! - **No external dependencies** - only standard library and core traits
//! - **Pure business logic** - no infrastructure or transport concerns

/// Common macros
#[macro_use]
pub mod macros;

/// Domain-level constants
pub mod constants;
/// Core business entities with identity
pub mod entities;
/// Domain error types
pub mod error;
/// Domain-owned infrastructure seams (logging facade)
pub mod infra;
/// External provider port interfaces
pub mod ports;
/// Provider auto-registration registry
pub mod registry;
/// Pure domain services (version selection, library suggestions)
pub mod services;
/// Immutable value objects
pub mod value_objects;

pub use constants::*;
pub use entities::{Document, Library, Version};
pub use error::{Error, Result};
pub use value_objects::*;

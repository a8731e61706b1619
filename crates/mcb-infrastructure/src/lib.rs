//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns for the documentation indexing
//! pipeline: logging wiring, config loading, and the composition root
//! that assembles `mcb-providers` adapters into `mcb-application`
//! services.
//!
//! ## Architecture
//!
//! | Module | Responsibility |
//! |--------|-----------------|
//! | [`logging`] | Installs `tracing-subscriber` and registers the domain's log dispatch facade |
//! | [`config`] | Figment-based TOML + env config loader; data-directory and installation-id resolution |
//! | [`bootstrap`] | Composition root: wires a [`mcb_providers::SqliteDocumentStore`], an embedding provider, and a [`mcb_application::PipelineManager`] together |
//!
//! CLI argument parsing, the MCP/tRPC transport, and telemetry sinks are
//! out of scope (consumers of this crate's [`bootstrap::AppContext`]).

/// Composition root: wires concrete providers into application services.
pub mod bootstrap;
/// Figment-based configuration loader and data-directory resolution.
pub mod config;
/// `tracing-subscriber` installation and domain log-facade registration.
pub mod logging;

pub use bootstrap::AppContext;
pub use config::AppConfig;

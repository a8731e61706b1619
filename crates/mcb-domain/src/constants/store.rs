//! Vector-store width and environment layout constants.

/// Fixed store vector width (`D_store`). Embedding vectors with a native
/// dimension (`D_model`) narrower than this are zero-padded; wider ones
/// are rejected with [`crate::error::Error::Dimension`].
pub const D_STORE_DEFAULT: usize = 1536;

/// Environment variable overriding the data directory for the durable
/// store file. When unset, an OS-appropriate per-user data path is used.
pub const STORE_PATH_ENV: &str = "DOCS_MCP_STORE_PATH";

/// Filename of the installation id file that lives beside the database,
/// used for telemetry correlation.
pub const INSTALLATION_ID_FILE: &str = "installation.id";

/// Filename of the durable document-store database file.
pub const STORE_DB_FILE: &str = "documents.sqlite";

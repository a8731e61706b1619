//! Configuration: the loaded [`AppConfig`] shape, the `figment`-backed
//! [`ConfigLoader`], and data-directory/installation-id resolution (§10.3,
//! §10.5).

mod loader;
/// Data directory and installation-id file resolution (§6, §10.5).
pub mod paths;
mod types;

pub use loader::ConfigLoader;
pub use types::AppConfig;

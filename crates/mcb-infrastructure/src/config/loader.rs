//! Configuration loader (§10.3): TOML file plus environment overrides,
//! merged by `figment`.
//!
//! Resolution order (later wins): built-in [`AppConfig::default`] values,
//! an optional TOML file (`mcb.toml` in the current directory unless an
//! explicit path is set via [`ConfigLoader::with_config_path`]), then
//! `MCB_`-prefixed environment variables (`MCB_CONCURRENCY=5`,
//! `MCB_EMBEDDING.PROVIDER=openai`, …).

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use mcb_domain::error::{Error, Result};

use super::types::AppConfig;

/// Default config filename searched for in the current directory.
const DEFAULT_CONFIG_FILE: &str = "mcb.toml";

/// Environment variable prefix for config overrides (`figment`'s `Env`
/// provider strips this and lowercases/nests on `_`/`.`).
const ENV_PREFIX: &str = "MCB_";

/// Loads [`AppConfig`] from defaults, an optional TOML file, and
/// `MCB_`-prefixed environment variables.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that searches for [`DEFAULT_CONFIG_FILE`] in the
    /// current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit TOML file path instead of searching the current
    /// directory.
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_owned());
        self
    }

    /// Load and merge configuration. A missing TOML file is not an error
    /// (defaults apply); a present-but-malformed file is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the TOML file exists but fails to
    /// parse, or if the merged document does not deserialize into
    /// [`AppConfig`].
    pub fn load(&self) -> Result<AppConfig> {
        let toml_path = self
            .config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if toml_path.exists() {
            figment = figment.merge(Toml::file(&toml_path));
        } else if let Some(explicit) = &self.config_path {
            return Err(Error::config(format!(
                "configuration file not found: {}",
                explicit.display()
            )));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("_"));

        figment
            .extract()
            .map_err(|e| Error::config(format!("failed to load configuration: {e}")))
    }
}

//! Data-directory and installation-id resolution (§6, §10.5).
//!
//! The durable store file, and the installation id file that lives beside
//! it, both resolve relative to the same data directory: `$DOCS_MCP_STORE_PATH`
//! if set, otherwise an OS-appropriate per-user data path
//! (`dirs::data_dir()/mcb-docs`).

use std::path::PathBuf;

use mcb_domain::constants::{INSTALLATION_ID_FILE, STORE_DB_FILE, STORE_PATH_ENV};
use mcb_domain::error::{Error, Result};

/// Subdirectory created under the OS data directory when
/// [`STORE_PATH_ENV`] is unset.
const DEFAULT_DATA_SUBDIR: &str = "mcb-docs";

/// Resolve the data directory, creating it if absent.
///
/// # Errors
///
/// Returns [`Error::Config`] if the environment override is empty, or if
/// no OS-appropriate per-user data directory can be determined. Returns
/// [`Error::Io`] if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var(STORE_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        Ok(_) => return Err(Error::config(format!("{STORE_PATH_ENV} is set but empty"))),
        Err(_) => dirs::data_dir()
            .ok_or_else(|| Error::config("unable to determine a per-user data directory"))?
            .join(DEFAULT_DATA_SUBDIR),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Path to the durable document-store database file within [`data_dir`].
///
/// # Errors
///
/// Propagates [`data_dir`]'s errors.
pub fn store_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(STORE_DB_FILE))
}

/// Read the installation id beside the database file, creating it (a
/// random UUID) on first access.
///
/// # Errors
///
/// Propagates [`data_dir`]'s errors, plus [`Error::Io`] if the id file
/// cannot be read or written.
pub fn installation_id() -> Result<String> {
    let path = data_dir()?.join(INSTALLATION_ID_FILE);
    if let Ok(existing) = std::fs::read_to_string(&path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_owned());
        }
    }
    let fresh = uuid::Uuid::new_v4().to_string();
    std::fs::write(&path, &fresh)?;
    Ok(fresh)
}

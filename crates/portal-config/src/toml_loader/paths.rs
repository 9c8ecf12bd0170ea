//! Where the portal keeps its config file, and first-run creation of it.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use portal_common::ConfigError;
use tracing::{debug, info};

use super::template::default_config_toml;

const APP_DIR: &str = "smart-portal";
const CONFIG_FILE: &str = "config.toml";

/// `<config_dir>/smart-portal/config.toml` for the current platform.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| config_path_in(&base))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

pub(super) fn config_path_in(base: &Path) -> PathBuf {
    base.join(APP_DIR).join(CONFIG_FILE)
}

/// Write the commented default config to `path`.
///
/// A file that already exists is left untouched, so two launches racing
/// on first run cannot clobber each other or a user's edits.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| io_error("create config directory", parent, e))?;
    }

    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("config already present at {}", path.display());
            return Ok(());
        }
        Err(e) => return Err(io_error("create default config", path, e)),
    };

    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_error("write default config", path, e))?;

    info!("created default config at {}", path.display());
    Ok(())
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> ConfigError {
    ConfigError::ParseError(format!("failed to {action} at {}: {err}", path.display()))
}

//! Portal configuration system.
//!
//! TOML-based configuration with validation. Every section has defaults,
//! so partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{PortalConfig, CONFIG_SCHEMA_VERSION};

use portal_common::ConfigError;
use std::path::Path;

/// Load config from `path` if given, else from the platform default path
/// (creating it on first run), and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<PortalConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Startup load. A config file named explicitly must load and validate;
/// a failure at the default location falls back to built-in defaults and
/// hands back the cause so it can be logged once logging is up.
pub fn load_startup_config(
    path: Option<&Path>,
) -> Result<(PortalConfig, Option<ConfigError>), ConfigError> {
    settle_startup(path.is_some(), load_config(path))
}

fn settle_startup(
    explicit: bool,
    loaded: Result<PortalConfig, ConfigError>,
) -> Result<(PortalConfig, Option<ConfigError>), ConfigError> {
    match loaded {
        Ok(config) => Ok((config, None)),
        Err(e) if explicit => Err(e),
        Err(e) => Ok((PortalConfig::default(), Some(e))),
    }
}

/// Serialize a config to pretty-printed JSON with the API key removed.
pub fn config_to_json(config: &PortalConfig) -> String {
    let mut redacted = config.clone();
    if redacted.gemini.api_key.is_some() {
        redacted.gemini.api_key = Some("[REDACTED]".into());
    }
    serde_json::to_string_pretty(&redacted)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

//! Configuration file discovery, loading and validation.

use crate::error::ConfigError;
use crate::types::VgenConfig;
use std::path::{Path, PathBuf};
use tracing::debug;
use vgen_template::{store, GenerationKind};

/// Name of the configuration file looked up by [`discover_config`].
pub const CONFIG_FILE_NAME: &str = "vgen.toml";

/// Finds the nearest `vgen.toml` in `start` or any of its ancestors.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let found = start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file());
    if let Some(path) = &found {
        debug!(path = %path.display(), "found configuration file");
    }
    found
}

/// Loads and validates the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<VgenConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `vgen.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<VgenConfig, ConfigError> {
    let config: VgenConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks file name patterns and template names.
fn validate_config(config: &VgenConfig) -> Result<(), ConfigError> {
    for kind in GenerationKind::ALL {
        if config.output(kind).file_name.as_deref() == Some("") {
            return Err(ConfigError::ValidationError(format!(
                "{kind}.file_name must not be empty"
            )));
        }
        if let Some(name) = config.templates.selected(kind) {
            store::validate_name(name).map_err(|e| {
                ConfigError::ValidationError(format!("templates.{kind}: {e}"))
            })?;
        }
    }
    if config.templates.custom_dir.is_empty() {
        return Err(ConfigError::ValidationError(
            "templates.custom_dir must not be empty".to_string(),
        ));
    }
    Ok(())
}

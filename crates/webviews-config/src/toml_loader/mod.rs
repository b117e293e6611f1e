//! Reading and creating the TOML config file.
//!
//! Every load path validates: a file that parses but holds out-of-range
//! values is reported as `ConfigError::ValidationError`, so callers get
//! one place to decide whether to fall back to defaults.

mod template;

#[cfg(test)]
mod tests;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use webviews_common::ConfigError;

use crate::schema::WebviewsConfig;
use crate::validation;

use template::default_config_toml;

/// `<platform config dir>/webviews/config.toml`.
///
/// On macOS: `~/Library/Application Support/webviews/config.toml`
/// On Linux: `~/.config/webviews/config.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("webviews").join("config.toml"))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

/// Parse and validate config text. Missing fields take defaults.
pub fn parse_config(text: &str) -> Result<WebviewsConfig, ConfigError> {
    let config: WebviewsConfig =
        toml::from_str(text).map_err(|e| ConfigError::ParseError(format!("invalid TOML: {e}")))?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate the config at `path`.
pub fn load_from_path(path: &Path) -> Result<WebviewsConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("failed to read {}: {e}", path.display())),
    })?;
    let config = parse_config(&text)?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load the config at `path`, writing the commented template there first
/// when the file does not exist yet.
pub fn load_or_create(path: &Path) -> Result<WebviewsConfig, ConfigError> {
    match load_from_path(path) {
        Err(ConfigError::FileNotFound(_)) => {
            write_default_config(path)?;
            Ok(WebviewsConfig::default())
        }
        other => other,
    }
}

/// Load the config from [`default_config_path`], creating it on first run.
pub fn load_default() -> Result<WebviewsConfig, ConfigError> {
    load_or_create(&default_config_path()?)
}

/// Write the commented default template to `path`, creating parent
/// directories as needed.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |what: &str, target: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("failed to {what} {}: {e}", target.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| write_err("create directory", parent, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| write_err("write", path, e))?;

    debug!(path = %path.display(), "default config written");
    Ok(())
}

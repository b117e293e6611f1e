//! Webviews configuration.
//!
//! TOML-based defaults for new windows, timers and logging. Every
//! section uses serde defaults so partial configs work out of the box.
//!
//! ```rust,no_run
//! use webviews_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}x{}", config.window.width, config.window.height);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LogLevel, LoggingConfig, TimersConfig, WebviewsConfig, WindowConfig};
pub use toml_loader::{
    default_config_path, load_default, load_from_path, load_or_create, parse_config,
    write_default_config,
};

use webviews_common::ConfigError;

/// Load the config from the platform default path.
///
/// Creates a commented default file when none exists yet. Out-of-range
/// values are reported as `ConfigError::ValidationError`.
pub fn load_config() -> Result<WebviewsConfig, ConfigError> {
    toml_loader::load_default()
}

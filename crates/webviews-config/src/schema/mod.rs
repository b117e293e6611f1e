//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod system;
mod window;

pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WebviewsConfig {
    pub window: WindowConfig,
    pub timers: TimersConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: WebviewsConfig = toml::from_str("").unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.timers.min_interval_ms, 0);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn sections_parse_independently() {
        let config: WebviewsConfig = toml::from_str(
            r#"
[timers]
min_interval_ms = 4

[logging]
level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.timers.min_interval_ms, 4);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.window.height, 768);
    }
}

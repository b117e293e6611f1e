//! Timer and logging configuration types.

use serde::{Deserialize, Serialize};

/// Event-loop timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TimersConfig {
    /// Lower bound applied to every timeout interval (valid range: 0-60000).
    pub min_interval_ms: u32,
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Extra `EnvFilter` directives appended after the level, e.g. `"wry=warn"`.
    pub filter: Option<String>,
}

impl LoggingConfig {
    /// Build an `EnvFilter`-style directive string for the webviews crates.
    pub fn directive(&self) -> String {
        let level = self.level.as_str();
        let mut directive = format!("webviews={level},webviews_core={level}");
        if let Some(extra) = self.filter.as_deref().map(str::trim) {
            if !extra.is_empty() {
                directive.push(',');
                directive.push_str(extra);
            }
        }
        directive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive() {
        let config = LoggingConfig::default();
        assert_eq!(config.directive(), "webviews=info,webviews_core=info");
    }

    #[test]
    fn directive_appends_filter() {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            filter: Some(" wry=warn ".into()),
        };
        assert_eq!(
            config.directive(),
            "webviews=debug,webviews_core=debug,wry=warn"
        );
    }

    #[test]
    fn blank_filter_is_ignored() {
        let config = LoggingConfig {
            level: LogLevel::Error,
            filter: Some("   ".into()),
        };
        assert_eq!(config.directive(), "webviews=error,webviews_core=error");
    }

    #[test]
    fn log_level_parses_lowercase() {
        let level: LogLevel = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(level, LogLevel::Warn);
    }
}
